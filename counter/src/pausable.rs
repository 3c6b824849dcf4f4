// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use alloy_primitives::Address;
use alloy_sol_types::sol;
use stylus_sdk::{prelude::*, storage::StorageBool};

use crate::errors::{CounterError, EnforcedPause};

sol! {
    event Paused(address account);
    event Unpaused(address account);
}

#[storage]
pub struct Pausable {
    /// Indicates whether the contract is paused
    paused: StorageBool,
}

/// Event produced by flipping the paused flag.
pub enum PauseChange {
    Paused(Paused),
    Unpaused(Unpaused),
}

// Internal methods
impl Pausable {
    pub fn paused(&self) -> bool {
        self.paused.get()
    }

    pub fn when_not_paused(&self) -> Result<(), CounterError> {
        if self.paused.get() {
            return Err(EnforcedPause {}.into());
        }
        Ok(())
    }

    /// Flips the flag on behalf of `account`.
    pub fn toggle(&mut self, account: Address) -> PauseChange {
        let paused = !self.paused.get();
        self.paused.set(paused);
        if paused {
            PauseChange::Paused(Paused { account })
        } else {
            PauseChange::Unpaused(Unpaused { account })
        }
    }
}
