// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::{sync::Arc, time::Duration};

use counter_client::{
    config::{
        ClientConfig, Network, DEFAULT_API_URL, DEFAULT_CONTRACT_ADDRESS, DEFAULT_CONTRACT_NAME,
        DEFAULT_EXPLORER_URL,
    },
    core::{
        api::HttpReadOnlyApi,
        c32::StandardPrincipal,
        dispatch::ActionDispatcher,
        poller::Poller,
        session::Session,
        wallet::{PromptWallet, ProviderWallet, Wallet},
    },
};
use tokio::{
    io::{BufReader, Stdin},
    sync::Mutex,
};

/// Standard input, shared between the console and a prompt wallet.
pub type Input = Arc<Mutex<BufReader<Stdin>>>;

pub fn stdin_input() -> Input {
    Arc::new(Mutex::new(BufReader::new(tokio::io::stdin())))
}

#[derive(Debug, clap::Args)]
pub struct ClientArgs {
    /// Address of the account that deployed the counter contract
    #[arg(long, global = true, default_value = DEFAULT_CONTRACT_ADDRESS)]
    contract_address: StandardPrincipal,
    /// Name of the counter contract
    #[arg(long, global = true, default_value = DEFAULT_CONTRACT_NAME)]
    contract_name: String,
    /// Base URL of the read-only API
    #[arg(long, global = true, default_value = DEFAULT_API_URL)]
    api_url: String,
    /// Base URL of the block explorer used for links
    #[arg(long, global = true, default_value = DEFAULT_EXPLORER_URL)]
    explorer_url: String,
    /// Network the contract lives on (mainnet or testnet)
    #[arg(long, global = true, default_value = "mainnet")]
    network: Network,
    /// Sender reported for read-only calls, defaults to the contract address
    #[arg(long, global = true)]
    sender: Option<StandardPrincipal>,
    /// Seconds between polls of the contract state
    #[arg(long, global = true, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    poll_interval_secs: u64,
    /// Seconds to wait after a submitted transaction before polling again
    #[arg(long, global = true, default_value_t = 3)]
    refresh_delay_secs: u64,
}

impl ClientArgs {
    pub fn config(&self) -> ClientConfig {
        ClientConfig {
            contract_address: self.contract_address,
            contract_name: self.contract_name.clone(),
            api_url: self.api_url.clone(),
            explorer_url: self.explorer_url.clone(),
            network: self.network,
            sender: self.sender,
            poll_interval: Duration::from_secs(self.poll_interval_secs),
            refresh_delay: Duration::from_secs(self.refresh_delay_secs),
        }
    }

    /// Wires the poller, session and dispatcher around one shared config.
    pub fn build_dispatcher(&self, wallet: Option<Arc<dyn Wallet>>) -> ActionDispatcher {
        let config = Arc::new(self.config());
        log::debug!("using contract {}", config.contract_id());
        let api = Arc::new(HttpReadOnlyApi::new(config.clone()));
        let poller = Poller::new(api, config.poll_interval);
        let session = Arc::new(Session::new(config, wallet));
        ActionDispatcher::new(session, poller)
    }
}

#[derive(Debug, clap::Args)]
pub struct WalletArgs {
    /// JSON-RPC endpoint of a wallet provider
    #[arg(long, global = true)]
    wallet_endpoint: Option<String>,
    /// Approve wallet requests by pasting results into the terminal
    #[arg(long, global = true, conflicts_with = "wallet_endpoint")]
    prompt_wallet: bool,
}

impl WalletArgs {
    pub fn is_configured(&self) -> bool {
        self.wallet_endpoint.is_some() || self.prompt_wallet
    }

    pub fn build_wallet(&self, network: Network, input: &Input) -> Option<Arc<dyn Wallet>> {
        if let Some(endpoint) = &self.wallet_endpoint {
            return Some(Arc::new(ProviderWallet::new(endpoint.clone(), network)));
        }
        if self.prompt_wallet {
            return Some(Arc::new(PromptWallet::new(input.clone(), tokio::io::stdout())));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use pretty_assertions::assert_eq;

    #[derive(Debug, Parser)]
    struct Cli {
        #[command(flatten)]
        client: ClientArgs,
        #[command(flatten)]
        wallet: WalletArgs,
    }

    #[test]
    fn defaults_match_client_config() {
        let cli = Cli::parse_from(["counter-dapp"]);
        let config = cli.client.config();
        let default = ClientConfig::default();
        assert_eq!(config.contract_id(), default.contract_id());
        assert_eq!(config.api_url, default.api_url);
        assert_eq!(config.poll_interval, default.poll_interval);
        assert_eq!(config.refresh_delay, default.refresh_delay);
        assert!(!cli.wallet.is_configured());
    }

    #[test]
    fn overrides_apply() {
        let cli = Cli::parse_from([
            "counter-dapp",
            "--network",
            "testnet",
            "--poll-interval-secs",
            "2",
            "--sender",
            "SP2J6ZY48GV1EZ5V2V5RB9MP66SW86PYKKNRV9EJ7",
            "--wallet-endpoint",
            "http://localhost:9000",
        ]);
        let config = cli.client.config();
        assert_eq!(config.network, Network::Testnet);
        assert_eq!(config.poll_interval, Duration::from_secs(2));
        assert_eq!(
            config.sender().to_string(),
            "SP2J6ZY48GV1EZ5V2V5RB9MP66SW86PYKKNRV9EJ7"
        );
        assert!(cli.wallet.is_configured());
    }

    #[test]
    fn rejects_bad_values() {
        for args in [
            &["counter-dapp", "--contract-address", "SPNOTANADDRESS"][..],
            &["counter-dapp", "--poll-interval-secs", "0"],
            &["counter-dapp", "--network", "devnet"],
            &["counter-dapp", "--prompt-wallet", "--wallet-endpoint", "http://x"],
        ] {
            assert!(Cli::try_parse_from(args).is_err(), "{args:?}");
        }
    }
}
