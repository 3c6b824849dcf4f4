// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Read-only contract calls against the remote API.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::clarity::{ClarityValue, DecodeError};
use crate::config::ClientConfig;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("api returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("call rejected: {0}")]
    Rejected(String),
    #[error("response has no result")]
    MissingResult,
    #[error("could not decode result: {0}")]
    Decode(#[from] DecodeError),
}

/// Evaluates a contract function without a transaction.
#[async_trait]
pub trait ReadOnlyApi: Send + Sync {
    async fn call_read(
        &self,
        function: &str,
        args: &[ClarityValue],
    ) -> Result<ClarityValue, ApiError>;
}

#[derive(Debug, Serialize)]
struct CallReadRequest {
    sender: String,
    arguments: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct CallReadResponse {
    okay: bool,
    #[serde(default)]
    result: Option<String>,
    #[serde(default)]
    cause: Option<String>,
}

/// [`ReadOnlyApi`] over the node's `call-read` HTTP endpoint.
#[derive(Debug, Clone)]
pub struct HttpReadOnlyApi {
    client: reqwest::Client,
    config: Arc<ClientConfig>,
}

impl HttpReadOnlyApi {
    pub fn new(config: Arc<ClientConfig>) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    pub fn with_client(client: reqwest::Client, config: Arc<ClientConfig>) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl ReadOnlyApi for HttpReadOnlyApi {
    async fn call_read(
        &self,
        function: &str,
        args: &[ClarityValue],
    ) -> Result<ClarityValue, ApiError> {
        let url = self.config.read_only_url(function);
        let request = CallReadRequest {
            sender: self.config.sender().to_string(),
            arguments: args.iter().map(ClarityValue::encode_hex).collect(),
        };
        log::debug!("POST {url}");
        let response = self.client.post(&url).json(&request).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        let response: CallReadResponse = response.json().await?;
        if !response.okay {
            return Err(ApiError::Rejected(
                response.cause.unwrap_or_else(|| "unknown cause".into()),
            ));
        }
        let result = response.result.ok_or(ApiError::MissingResult)?;
        Ok(ClarityValue::decode_hex(&result)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Path, http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};
    use std::sync::Mutex;
    use tokio::net::TcpListener;

    type Seen = Arc<Mutex<Vec<(String, Value)>>>;

    async fn serve(seen: Seen) -> String {
        let app = Router::new().route(
            "/v2/contracts/call-read/:address/:name/:function",
            post(
                move |Path((_address, _name, function)): Path<(String, String, String)>,
                      Json(body): Json<Value>| {
                    let seen = seen.clone();
                    async move {
                        seen.lock().unwrap().push((function.clone(), body));
                        match function.as_str() {
                            "get-counter" => (
                                StatusCode::OK,
                                Json(json!({"okay": true, "result": "0x0100000000000000000000000000000007"})),
                            ),
                            "is-paused" => (
                                StatusCode::OK,
                                Json(json!({"okay": false, "cause": "Unchecked(NoSuchContract)"})),
                            ),
                            "get-owner" => (
                                StatusCode::OK,
                                Json(json!({"okay": true, "result": "0x05"})),
                            ),
                            "no-result" => (StatusCode::OK, Json(json!({"okay": true}))),
                            _ => (StatusCode::NOT_FOUND, Json(json!({"error": "unknown"}))),
                        }
                    }
                },
            ),
        );
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    async fn api(seen: Seen) -> HttpReadOnlyApi {
        let config = ClientConfig {
            api_url: serve(seen).await,
            ..Default::default()
        };
        HttpReadOnlyApi::new(Arc::new(config))
    }

    #[tokio::test]
    async fn posts_sender_and_arguments() {
        let seen = Seen::default();
        let api = api(seen.clone()).await;

        let value = api
            .call_read("get-counter", &[ClarityValue::UInt(1)])
            .await
            .unwrap();
        assert_eq!(value, ClarityValue::UInt(7));

        let seen = seen.lock().unwrap();
        let (function, body) = &seen[0];
        assert_eq!(function, "get-counter");
        assert_eq!(
            body,
            &json!({
                "sender": "SP2GTM2ZVYXQKNYMT3MNJY49RQ2MW8Q1DGXZF8519",
                "arguments": ["0x0100000000000000000000000000000001"],
            })
        );
    }

    #[tokio::test]
    async fn reports_rejection_cause() {
        let api = api(Seen::default()).await;
        let err = api.call_read("is-paused", &[]).await.unwrap_err();
        assert!(matches!(err, ApiError::Rejected(cause) if cause.contains("NoSuchContract")));
    }

    #[tokio::test]
    async fn reports_decode_failure() {
        let api = api(Seen::default()).await;
        let err = api.call_read("get-owner", &[]).await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(DecodeError::Truncated { .. })));
    }

    #[tokio::test]
    async fn reports_missing_result() {
        let api = api(Seen::default()).await;
        let err = api.call_read("no-result", &[]).await.unwrap_err();
        assert!(matches!(err, ApiError::MissingResult));
    }

    #[tokio::test]
    async fn reports_http_status() {
        let api = api(Seen::default()).await;
        let err = api.call_read("missing", &[]).await.unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 404, .. }));
    }
}
