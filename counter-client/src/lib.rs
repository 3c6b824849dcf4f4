// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Client for the counter contract: polls its read-only state, manages a
//! wallet session and submits signed actions.

#[macro_use]
mod macros;

pub mod config;
pub mod core;
pub(crate) mod error;
pub mod ops;
pub mod utils;

pub use config::{ClientConfig, Network};
pub use error::{Error, Result};
