//! # Node Client
//!
//! The three calls a submission needs from a node: an anchor token, a fee
//! quote and the final `POST /tx`. They sit behind the [`NetworkClient`]
//! trait so the publish flow can run against a stub in tests.
//!
//! | Call                 | HTTP                     | Body            |
//! |----------------------|--------------------------|-----------------|
//! | `get_anchor`         | `GET {node}/tx_anchor`   | text            |
//! | `get_price(n)`       | `GET {node}/price/{n}`   | decimal text    |
//! | `post_transaction`   | `POST {node}/tx`         | JSON record     |
//!
//! Nothing here retries. A rejected submission is reported with the node's
//! status and body verbatim; resubmitting is the caller's decision.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::{
    ACCEPTED_SUBMIT_STATUSES, ANCHOR_PATH, CONNECT_TIMEOUT, DEFAULT_NODE_URL, PRICE_PATH,
    REQUEST_TIMEOUT, SUBMIT_PATH,
};
use crate::transaction::types::validate_decimal;
use crate::transaction::Transaction;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors talking to a node.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// The request never produced a response (DNS, connect, timeout, TLS).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The node answered with a status outside the accepted set.
    #[error("node rejected request with HTTP {status}: {body}")]
    Rejected { status: u16, body: String },

    /// The node answered but the body is not what the call expects.
    #[error("invalid response from node: {0}")]
    InvalidResponse(String),
}

/// Outcome of an accepted submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitStatus {
    /// HTTP status the node answered with (one of 200, 202, 208).
    pub status: u16,
    /// Response body as sent by the node.
    pub body: String,
}

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// Capability to reach a node.
#[async_trait]
pub trait NetworkClient: Send + Sync {
    /// Fetches the anchor to use as `last_tx`. An empty anchor is legal.
    async fn get_anchor(&self) -> Result<String, NetworkError>;

    /// Fetches the fee, in winston, for storing `byte_count` bytes.
    ///
    /// A quote of `"0"` is returned as-is; whether to submit with it is the
    /// caller's policy.
    async fn get_price(&self, byte_count: u64) -> Result<String, NetworkError>;

    /// Submits a signed record exactly once.
    async fn post_transaction(&self, tx: &Transaction) -> Result<SubmitStatus, NetworkError>;
}

// ---------------------------------------------------------------------------
// HTTP implementation
// ---------------------------------------------------------------------------

/// Connection settings for [`HttpNetworkClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the node, e.g. `http://localhost:1984`.
    pub node_url: String,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            node_url: DEFAULT_NODE_URL.to_string(),
            request_timeout: REQUEST_TIMEOUT,
            connect_timeout: CONNECT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Default timeouts against the given node.
    pub fn with_node(node_url: impl Into<String>) -> Self {
        Self {
            node_url: node_url.into(),
            ..Self::default()
        }
    }
}

/// [`NetworkClient`] over HTTP with `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpNetworkClient {
    http: reqwest::Client,
    base: String,
}

impl HttpNetworkClient {
    /// Builds the underlying HTTP client with the configured timeouts.
    pub fn new(config: ClientConfig) -> Result<Self, NetworkError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        Ok(Self {
            http,
            base: config.node_url.trim_end_matches('/').to_string(),
        })
    }

    /// The node base URL, without a trailing slash.
    pub fn node_url(&self) -> &str {
        &self.base
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base, path)
    }

    /// GET `url`, requiring a 2xx status, and return the body text.
    async fn get_text(&self, url: &str) -> Result<String, NetworkError> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(NetworkError::Rejected {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }
}

#[async_trait]
impl NetworkClient for HttpNetworkClient {
    async fn get_anchor(&self) -> Result<String, NetworkError> {
        let anchor = self.get_text(&self.url(ANCHOR_PATH)).await?;
        let anchor = anchor.trim().to_string();
        tracing::debug!(%anchor, "fetched anchor");
        Ok(anchor)
    }

    async fn get_price(&self, byte_count: u64) -> Result<String, NetworkError> {
        let url = self.url(&format!("{PRICE_PATH}/{byte_count}"));
        let body = self.get_text(&url).await?;
        let price = body.trim();

        validate_decimal("price", price)
            .map_err(|_| NetworkError::InvalidResponse(format!("price is not a decimal: {price:?}")))?;

        tracing::debug!(byte_count, %price, "fetched price");
        Ok(price.to_string())
    }

    async fn post_transaction(&self, tx: &Transaction) -> Result<SubmitStatus, NetworkError> {
        let response = self.http.post(self.url(SUBMIT_PATH)).json(tx).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        if ACCEPTED_SUBMIT_STATUSES.contains(&status) {
            tracing::info!(id = tx.id(), status, "transaction accepted");
            Ok(SubmitStatus { status, body })
        } else {
            tracing::info!(id = tx.id(), status, %body, "transaction rejected");
            Err(NetworkError::Rejected { status, body })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_points_at_local_node() {
        let config = ClientConfig::default();
        assert_eq!(config.node_url, "http://localhost:1984");
        assert_eq!(config.request_timeout, REQUEST_TIMEOUT);
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = HttpNetworkClient::new(ClientConfig::with_node("http://node:1984/")).unwrap();
        assert_eq!(client.node_url(), "http://node:1984");
        assert_eq!(client.url("price/5"), "http://node:1984/price/5");
    }

    #[test]
    fn rejected_error_carries_status_and_body() {
        let err = NetworkError::Rejected {
            status: 400,
            body: "Transaction verification failed.".into(),
        };
        assert_eq!(
            err.to_string(),
            "node rejected request with HTTP 400: Transaction verification failed."
        );
    }
}
