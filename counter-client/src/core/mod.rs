// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

pub mod api;
pub mod c32;
pub mod clarity;
pub mod dispatch;
pub mod poller;
pub mod session;
pub mod wallet;
