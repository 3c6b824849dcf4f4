// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

pub use action::{connect, disconnect, run};
pub use status::{print_view, status};

mod action;
mod status;
