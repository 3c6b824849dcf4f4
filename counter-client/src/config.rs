// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Client configuration, built once at startup and shared by every component.

use std::{fmt, str::FromStr, time::Duration};

use crate::core::c32::StandardPrincipal;

/// Address of the deployed counter contract.
pub const DEFAULT_CONTRACT_ADDRESS: &str = "SP2GTM2ZVYXQKNYMT3MNJY49RQ2MW8Q1DGXZF8519";
/// Name of the deployed counter contract.
pub const DEFAULT_CONTRACT_NAME: &str = "counter";
/// The default read-only API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.hiro.so";
/// The default block explorer.
pub const DEFAULT_EXPLORER_URL: &str = "https://explorer.hiro.so";
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);
pub const DEFAULT_REFRESH_DELAY: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Network {
    #[default]
    Mainnet,
    Testnet,
}

impl Network {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Testnet => "testnet",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mainnet" => Ok(Self::Mainnet),
            "testnet" => Ok(Self::Testnet),
            other => Err(format!("unknown network {other:?}")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub contract_address: StandardPrincipal,
    pub contract_name: String,
    pub api_url: String,
    pub explorer_url: String,
    pub network: Network,
    /// Sender reported for read-only calls; the contract address when unset.
    pub sender: Option<StandardPrincipal>,
    pub poll_interval: Duration,
    /// Delay between a submitted action and the re-poll it triggers.
    pub refresh_delay: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            contract_address: DEFAULT_CONTRACT_ADDRESS
                .parse()
                .expect("default contract address is valid"),
            contract_name: DEFAULT_CONTRACT_NAME.into(),
            api_url: DEFAULT_API_URL.into(),
            explorer_url: DEFAULT_EXPLORER_URL.into(),
            network: Network::default(),
            sender: None,
            poll_interval: DEFAULT_POLL_INTERVAL,
            refresh_delay: DEFAULT_REFRESH_DELAY,
        }
    }
}

impl ClientConfig {
    /// `<address>.<name>`
    pub fn contract_id(&self) -> String {
        format!("{}.{}", self.contract_address, self.contract_name)
    }

    pub fn sender(&self) -> StandardPrincipal {
        self.sender.unwrap_or(self.contract_address)
    }

    pub fn read_only_url(&self, function: &str) -> String {
        format!(
            "{}/v2/contracts/call-read/{}/{}/{function}",
            self.api_url.trim_end_matches('/'),
            self.contract_address,
            self.contract_name,
        )
    }

    pub fn explorer_contract_url(&self) -> String {
        self.explorer_tx_url(&self.contract_id())
    }

    pub fn explorer_tx_url(&self, id: &str) -> String {
        format!(
            "{}/txid/{id}?chain={}",
            self.explorer_url.trim_end_matches('/'),
            self.network
        )
    }
}
