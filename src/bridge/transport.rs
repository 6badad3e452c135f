use async_trait::async_trait;
use serde_json::{json, Value};
use thiserror::Error;

/// Transport-level failures when talking to the relay
#[derive(Debug, Error)]
pub enum TransportError {
    /// The relay answered with a non-success HTTP status; carries the
    /// status text
    #[error("{0}")]
    Status(String),

    /// The request never completed, or the reply was not JSON
    #[error("{0}")]
    Request(String),
}

/// A transport capable of posting one relay action and returning the
/// relay's JSON reply
#[async_trait]
pub trait RelayTransport: Send + Sync {
    async fn send(&self, action: &str, args: Value) -> Result<Value, TransportError>;
}

/// HTTP transport posting `{action, args}` to the Mission Control relay
///
/// Built explicitly from a base URL; the reqwest client is stateless, so
/// no teardown is needed.
pub struct HttpRelayTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpRelayTransport {
    /// Creates a transport for a relay at `base_url`
    /// (e.g. `http://localhost:3000`)
    pub fn new(base_url: impl Into<String>) -> Self {
        let base = base_url.into();
        Self {
            client: reqwest::Client::new(),
            endpoint: format!("{}/api/relay", base.trim_end_matches('/')),
        }
    }
}

#[async_trait]
impl RelayTransport for HttpRelayTransport {
    async fn send(&self, action: &str, args: Value) -> Result<Value, TransportError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&json!({ "action": action, "args": args }))
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = status
                .canonical_reason()
                .map(str::to_string)
                .unwrap_or_else(|| status.to_string());
            return Err(TransportError::Status(text));
        }

        response
            .json()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))
    }
}
