// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Wallet session: which account, if any, is signed in.

use std::sync::{Arc, RwLock};

use super::{
    c32::StandardPrincipal,
    wallet::{Account, Wallet, WalletError},
};
use crate::config::{ClientConfig, Network};

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("no wallet is configured")]
    NoWallet,
    #[error(transparent)]
    Wallet(#[from] WalletError),
}

pub struct Session {
    config: Arc<ClientConfig>,
    wallet: Option<Arc<dyn Wallet>>,
    account: RwLock<Option<Account>>,
}

impl Session {
    pub fn new(config: Arc<ClientConfig>, wallet: Option<Arc<dyn Wallet>>) -> Self {
        Self {
            config,
            wallet,
            account: RwLock::new(None),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn wallet(&self) -> Result<&Arc<dyn Wallet>, SessionError> {
        self.wallet.as_ref().ok_or(SessionError::NoWallet)
    }

    /// Connects the wallet, or returns the account already signed in.
    pub async fn sign_in(&self) -> Result<Account, SessionError> {
        if let Some(account) = self.account() {
            return Ok(account);
        }
        let wallet = self.wallet()?;
        let account = wallet.connect().await?;
        let mainnet = self.config.network == Network::Mainnet;
        if account.address.is_mainnet() != mainnet {
            log::warn!(
                "account {} does not belong to {}",
                account.address,
                self.config.network
            );
        }
        log::info!("signed in as {} via {} wallet", account.address, wallet.name());
        self.set_account(Some(account.clone()));
        Ok(account)
    }

    /// Forgets the account. Signing out while signed out is a no-op.
    pub async fn sign_out(&self) -> Result<(), SessionError> {
        let Some(account) = self.account() else {
            return Ok(());
        };
        self.set_account(None);
        if let Some(wallet) = &self.wallet {
            wallet.disconnect().await?;
        }
        log::info!("signed out {}", account.address);
        Ok(())
    }

    pub fn is_signed_in(&self) -> bool {
        self.account().is_some()
    }

    pub fn account(&self) -> Option<Account> {
        self.account
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn address(&self) -> Option<StandardPrincipal> {
        self.account().map(|account| account.address)
    }

    /// True only when signed in and the address equals the known owner.
    pub fn is_owner(&self, owner: Option<&StandardPrincipal>) -> bool {
        match (self.address(), owner) {
            (Some(address), Some(owner)) => address == *owner,
            _ => false,
        }
    }

    fn set_account(&self, account: Option<Account>) {
        *self
            .account
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = account;
    }
}
