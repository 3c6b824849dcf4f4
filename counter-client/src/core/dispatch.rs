// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! User actions and their submission through the wallet.

use std::{
    fmt,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

use super::{
    c32::StandardPrincipal,
    clarity::ClarityValue,
    poller::{CounterView, Poller},
    session::{Session, SessionError},
    wallet::{ContractCall, TxId, WalletError},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Increment,
    Decrement,
    SetCounter(u128),
    TogglePause,
    TransferOwnership(StandardPrincipal),
}

/// Whether an action makes sense given the current view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    Available,
    Paused,
    OwnerOnly,
}

impl Action {
    pub fn function_name(&self) -> &'static str {
        match self {
            Self::Increment => "increment",
            Self::Decrement => "decrement",
            Self::SetCounter(_) => "set-counter",
            Self::TogglePause => "toggle-pause",
            Self::TransferOwnership(_) => "transfer-ownership",
        }
    }

    pub fn args(&self) -> Vec<ClarityValue> {
        match self {
            Self::SetCounter(value) => vec![ClarityValue::UInt(*value)],
            Self::TransferOwnership(owner) => vec![ClarityValue::Principal(*owner)],
            _ => vec![],
        }
    }

    pub fn is_owner_only(&self) -> bool {
        matches!(
            self,
            Self::SetCounter(_) | Self::TogglePause | Self::TransferOwnership(_)
        )
    }

    /// Advisory gating for user interfaces; the contract enforces the real rules.
    pub fn availability(&self, view: &CounterView, is_owner: bool) -> Availability {
        if self.is_owner_only() {
            if is_owner {
                Availability::Available
            } else {
                Availability::OwnerOnly
            }
        } else if view.paused {
            Availability::Paused
        } else {
            Availability::Available
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.function_name())?;
        match self {
            Self::SetCounter(value) => write!(f, " {value}"),
            Self::TransferOwnership(owner) => write!(f, " {owner}"),
            _ => Ok(()),
        }
    }
}

/// Parses user input for a new counter value.
pub fn parse_counter_value(input: &str) -> Result<u128, DispatchError> {
    let input = input.trim();
    if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DispatchError::InvalidValue(input.to_string()));
    }
    input
        .parse()
        .map_err(|_| DispatchError::InvalidValue(input.to_string()))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Submitted(TxId),
    Cancelled,
}

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("connect a wallet first")]
    NotSignedIn,
    #[error("Please enter a valid number")]
    InvalidValue(String),
    #[error("transaction failed: {0}")]
    Wallet(#[from] WalletError),
}

impl From<SessionError> for DispatchError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::NoWallet => Self::NotSignedIn,
            SessionError::Wallet(err) => Self::Wallet(err),
        }
    }
}

/// Submits actions for the signed-in account and re-polls after each one.
pub struct ActionDispatcher {
    session: Arc<Session>,
    poller: Poller,
    in_flight: AtomicUsize,
}

impl ActionDispatcher {
    pub fn new(session: Arc<Session>, poller: Poller) -> Self {
        Self {
            session,
            poller,
            in_flight: AtomicUsize::new(0),
        }
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub fn poller(&self) -> &Poller {
        &self.poller
    }

    /// True while any dispatch is waiting on the wallet.
    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    pub fn availability(&self, action: &Action) -> Availability {
        let view = self.poller.view();
        action.availability(&view, self.session.is_owner(view.owner.as_ref()))
    }

    pub async fn dispatch(&self, action: Action) -> Result<Outcome, DispatchError> {
        if !self.session.is_signed_in() {
            return Err(DispatchError::NotSignedIn);
        }
        let wallet = self.session.wallet()?;
        let config = self.session.config();
        let call = ContractCall {
            contract_address: config.contract_address,
            contract_name: config.contract_name.clone(),
            function_name: action.function_name().to_string(),
            function_args: action.args(),
            network: config.network,
        };

        let _loading = Loading::start(&self.in_flight);
        log::debug!("requesting signature for {call}");
        match wallet.call_contract(&call).await {
            Ok(txid) => {
                info!(@mint, "{} submitted: {}", action, txid);
                info!(@grey, "view on explorer: {}", config.explorer_tx_url(&txid.0));
                self.poller.refresh_after(config.refresh_delay);
                Ok(Outcome::Submitted(txid))
            }
            Err(WalletError::Cancelled) => {
                info!(@grey, "{} cancelled", action);
                Ok(Outcome::Cancelled)
            }
            Err(err) => {
                log::error!("{action} failed: {err}");
                Err(err.into())
            }
        }
    }
}

/// Counts one in-flight dispatch for as long as it lives.
struct Loading<'a>(&'a AtomicUsize);

impl<'a> Loading<'a> {
    fn start(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for Loading<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}
