// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use alloy_primitives::Address;
use alloy_sol_types::sol;
use stylus_sdk::{prelude::*, storage::StorageAddress};

use crate::errors::{CounterError, NotOwner};

sol! {
    event OwnershipTransferred(address indexed previous_owner, address indexed new_owner);
}

/// Single-owner access control.
#[storage]
pub struct Ownable {
    owner: StorageAddress,
}

// Internal methods
impl Ownable {
    pub fn owner(&self) -> Address {
        self.owner.get()
    }

    pub fn only_owner(&self, caller: Address) -> Result<(), CounterError> {
        if caller != self.owner.get() {
            return Err(NotOwner { account: caller }.into());
        }
        Ok(())
    }

    /// Replaces the owner without any access check, returning the event to emit.
    pub fn transfer_ownership_impl(&mut self, new_owner: Address) -> OwnershipTransferred {
        let previous_owner = self.owner.get();
        self.owner.set(new_owner);
        OwnershipTransferred {
            previous_owner,
            new_owner,
        }
    }
}
