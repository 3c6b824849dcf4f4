// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Wallet capabilities: connecting an account and signing contract calls.
//!
//! Two ways of reaching a wallet are supported. [`ProviderWallet`] talks to a
//! provider's request API directly over JSON-RPC. [`PromptWallet`] walks the
//! user through an approval flow on a terminal, reading the answer back.

use std::{
    fmt,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt},
    sync::Mutex,
};

use super::{
    c32::{C32Error, StandardPrincipal},
    clarity::ClarityValue,
};
use crate::config::Network;

/// JSON-RPC error code a provider returns when the user declines a request.
pub const USER_REJECTED_CODE: i64 = 4001;

#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    #[error("request cancelled by the user")]
    Cancelled,
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("wallet error {code}: {message}")]
    Rpc { code: i64, message: String },
    #[error("unexpected wallet response: {0}")]
    InvalidResponse(String),
    #[error("wallet returned no usable account")]
    NoAccount,
    #[error("invalid address: {0}")]
    Address(#[from] C32Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub address: StandardPrincipal,
}

/// Identifier of a submitted transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxId(pub String);

impl fmt::Display for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A contract call for the wallet to sign and broadcast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractCall {
    pub contract_address: StandardPrincipal,
    pub contract_name: String,
    pub function_name: String,
    pub function_args: Vec<ClarityValue>,
    pub network: Network,
}

impl ContractCall {
    pub fn contract_id(&self) -> String {
        format!("{}.{}", self.contract_address, self.contract_name)
    }
}

impl fmt::Display for ContractCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}(", self.contract_id(), self.function_name)?;
        for (i, arg) in self.function_args.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{arg}")?;
        }
        write!(f, ") on {}", self.network)
    }
}

#[async_trait]
pub trait Wallet: Send + Sync {
    /// Human-readable name for logs.
    fn name(&self) -> &str;

    async fn connect(&self) -> Result<Account, WalletError>;

    async fn disconnect(&self) -> Result<(), WalletError> {
        Ok(())
    }

    /// Asks the user to sign `call`. Declining yields [`WalletError::Cancelled`].
    async fn call_contract(&self, call: &ContractCall) -> Result<TxId, WalletError>;
}

#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorBody>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    code: i64,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct AddressEntry {
    address: String,
    #[serde(default)]
    symbol: Option<String>,
}

/// Wallet reached through a provider's JSON-RPC request endpoint.
#[derive(Debug)]
pub struct ProviderWallet {
    client: reqwest::Client,
    endpoint: String,
    network: Network,
    next_id: AtomicU64,
}

impl ProviderWallet {
    pub fn new(endpoint: impl Into<String>, network: Network) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            network,
            next_id: AtomicU64::new(1),
        }
    }

    async fn request(&self, method: &str, params: Value) -> Result<Value, WalletError> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            method,
            params,
        };
        log::debug!("wallet request {method} to {}", self.endpoint);
        let response: RpcResponse = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        if let Some(error) = response.error {
            if error.code == USER_REJECTED_CODE {
                return Err(WalletError::Cancelled);
            }
            return Err(WalletError::Rpc {
                code: error.code,
                message: error.message,
            });
        }
        response
            .result
            .ok_or_else(|| WalletError::InvalidResponse(format!("{method} returned no result")))
    }
}

#[async_trait]
impl Wallet for ProviderWallet {
    fn name(&self) -> &str {
        "provider"
    }

    async fn connect(&self) -> Result<Account, WalletError> {
        let result = self.request("stx_getAddresses", json!({})).await?;
        let entries: Vec<AddressEntry> = serde_json::from_value(
            result.get("addresses").cloned().unwrap_or(Value::Null),
        )
        .map_err(|err| WalletError::InvalidResponse(err.to_string()))?;

        let mainnet = self.network == Network::Mainnet;
        entries
            .iter()
            .filter(|entry| entry.symbol.as_deref().map_or(true, |s| s == "STX"))
            .filter_map(|entry| entry.address.parse::<StandardPrincipal>().ok())
            .find(|address| address.is_mainnet() == mainnet)
            .map(|address| Account { address })
            .ok_or(WalletError::NoAccount)
    }

    async fn call_contract(&self, call: &ContractCall) -> Result<TxId, WalletError> {
        let params = json!({
            "contract": call.contract_id(),
            "functionName": call.function_name,
            "functionArgs": call.function_args.iter().map(ClarityValue::encode_hex).collect::<Vec<_>>(),
            "network": call.network.as_str(),
        });
        let result = self.request("stx_callContract", params).await?;
        result
            .get("txid")
            .and_then(Value::as_str)
            .map(|txid| TxId(txid.to_string()))
            .ok_or_else(|| WalletError::InvalidResponse("stx_callContract returned no txid".into()))
    }
}

/// Wallet driven by the user on a terminal: requests are printed, and the
/// account address or transaction id is read back. An empty line cancels.
pub struct PromptWallet<R, W> {
    input: Arc<Mutex<R>>,
    output: Mutex<W>,
}

impl<R, W> PromptWallet<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    /// `input` may be shared with other readers of the same stream.
    pub fn new(input: Arc<Mutex<R>>, output: W) -> Self {
        Self {
            input,
            output: Mutex::new(output),
        }
    }

    async fn ask(&self, prompt: &str) -> Result<String, WalletError> {
        {
            let mut output = self.output.lock().await;
            output.write_all(prompt.as_bytes()).await?;
            output.flush().await?;
        }
        let mut line = String::new();
        let read = self.input.lock().await.read_line(&mut line).await?;
        let answer = line.trim();
        if read == 0 || answer.is_empty() {
            return Err(WalletError::Cancelled);
        }
        Ok(answer.to_string())
    }
}

#[async_trait]
impl<R, W> Wallet for PromptWallet<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    fn name(&self) -> &str {
        "prompt"
    }

    async fn connect(&self) -> Result<Account, WalletError> {
        let answer = self
            .ask("Approve the connection in your wallet, then paste your account address (empty to cancel): ")
            .await?;
        Ok(Account {
            address: answer.parse()?,
        })
    }

    async fn call_contract(&self, call: &ContractCall) -> Result<TxId, WalletError> {
        let prompt = format!(
            "Sign {call} in your wallet, then paste the transaction id (empty to cancel): "
        );
        Ok(TxId(self.ask(&prompt).await?))
    }
}
