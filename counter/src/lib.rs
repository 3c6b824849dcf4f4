// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! A counter with owner and pause controls.
//!
//! The counter never goes below zero. Anyone may increment or decrement it
//! while the contract is active; only the owner may overwrite the value,
//! pause or resume the contract, or hand ownership to another account.

// Only run this as a WASM if the export-abi feature is not set.
#![cfg_attr(not(any(test, feature = "export-abi")), no_main)]
extern crate alloc;

mod errors;
mod ownable;
mod pausable;

pub use crate::errors::*;

use alloy_primitives::{Address, U256};
use alloy_sol_types::sol;
use stylus_sdk::{prelude::*, storage::StorageU256};

use crate::{
    ownable::Ownable,
    pausable::{PauseChange, Pausable},
};

sol! {
    event CounterUpdated(address indexed caller, uint256 prev_value, uint256 new_value);
}

#[storage]
#[entrypoint]
pub struct Counter {
    count: StorageU256,
    ownable: Ownable,
    pausable: Pausable,
}

#[public]
impl Counter {
    /// The owner is the account that deployed the contract.
    #[constructor]
    pub fn constructor(&mut self) {
        // Use tx_origin instead of msg_sender because we use a factory contract in deployment.
        let owner = self.vm().tx_origin();
        let event = self.ownable.transfer_ownership_impl(owner);
        self.vm().log(event);
    }

    pub fn get_counter(&self) -> U256 {
        self.count.get()
    }

    pub fn get_owner(&self) -> Address {
        self.ownable.owner()
    }

    pub fn is_paused(&self) -> bool {
        self.pausable.paused()
    }

    /// Adds one to the counter and returns the new value.
    pub fn increment(&mut self) -> Result<U256, CounterError> {
        self.pausable.when_not_paused()?;
        let prev = self.count.get();
        let Some(next) = prev.checked_add(U256::from(1)) else {
            return Err(CounterOverflow {}.into());
        };
        self.update(prev, next);
        Ok(next)
    }

    /// Subtracts one from the counter and returns the new value.
    /// Fails instead of going below zero.
    pub fn decrement(&mut self) -> Result<U256, CounterError> {
        self.pausable.when_not_paused()?;
        let prev = self.count.get();
        if prev.is_zero() {
            return Err(Underflow {}.into());
        }
        let next = prev - U256::from(1);
        self.update(prev, next);
        Ok(next)
    }

    /// Overwrites the counter. Owner only; allowed while paused.
    pub fn set_counter(&mut self, value: U256) -> Result<U256, CounterError> {
        self.ownable.only_owner(self.vm().msg_sender())?;
        let prev = self.count.get();
        self.update(prev, value);
        Ok(value)
    }

    /// Hands the contract to `new_owner`. Owner only.
    pub fn transfer_ownership(&mut self, new_owner: Address) -> Result<(), CounterError> {
        self.ownable.only_owner(self.vm().msg_sender())?;
        let event = self.ownable.transfer_ownership_impl(new_owner);
        self.vm().log(event);
        Ok(())
    }

    /// Pauses an active contract or resumes a paused one, returning the new flag.
    /// Owner only.
    pub fn toggle_pause(&mut self) -> Result<bool, CounterError> {
        let caller = self.vm().msg_sender();
        self.ownable.only_owner(caller)?;
        match self.pausable.toggle(caller) {
            PauseChange::Paused(event) => {
                self.vm().log(event);
                Ok(true)
            }
            PauseChange::Unpaused(event) => {
                self.vm().log(event);
                Ok(false)
            }
        }
    }
}

impl Counter {
    fn update(&mut self, prev: U256, next: U256) {
        self.count.set(next);
        self.vm().log(CounterUpdated {
            caller: self.vm().msg_sender(),
            prev_value: prev,
            new_value: next,
        });
    }
}
