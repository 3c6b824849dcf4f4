// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Failure modes of the counter and their numeric codes.
//!
//! Each failure reverts with a Solidity custom error. Clients that only see
//! numeric codes can map a [`CounterError`] with [`CounterError::code`].

use alloy_sol_types::sol;
use stylus_sdk::prelude::*;

/// Caller is not the current owner.
pub const ERR_NOT_OWNER: u32 = 1000;
/// Decrement attempted while the counter is zero.
pub const ERR_UNDERFLOW: u32 = 1001;
/// Increment or decrement attempted while paused.
pub const ERR_PAUSED: u32 = 1002;
/// Increment attempted at the maximum representable value.
pub const ERR_OVERFLOW: u32 = 1003;

sol! {
    error NotOwner(address account);
    error Underflow();
    error EnforcedPause();
    error CounterOverflow();
}

/// Represents the ways counter methods may fail.
#[derive(SolidityError)]
pub enum CounterError {
    NotOwner(NotOwner),
    Underflow(Underflow),
    Paused(EnforcedPause),
    Overflow(CounterOverflow),
}

impl CounterError {
    /// Numeric code reported for this failure.
    pub const fn code(&self) -> u32 {
        match self {
            Self::NotOwner(_) => ERR_NOT_OWNER,
            Self::Underflow(_) => ERR_UNDERFLOW,
            Self::Paused(_) => ERR_PAUSED,
            Self::Overflow(_) => ERR_OVERFLOW,
        }
    }
}
