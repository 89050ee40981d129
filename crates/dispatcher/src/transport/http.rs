//! HttpTransport - one JSON POST per document

use contracts::{ContractError, DocumentTransport};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument};

/// Transport that POSTs documents over HTTP(S)
#[derive(Debug, Clone)]
pub struct HttpTransport {
    name: String,
    client: Client,
}

impl HttpTransport {
    /// Create a transport relying on the client's default timeouts
    pub fn new() -> Result<Self, ContractError> {
        Self::with_timeout(None)
    }

    /// Create a transport with an overall per-request timeout
    pub fn with_timeout(timeout: Option<Duration>) -> Result<Self, ContractError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ContractError::transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            name: "http".to_string(),
            client,
        })
    }
}

impl DocumentTransport for HttpTransport {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(name = "http_transport_post", skip(self, body), fields(bytes = body.len()))]
    async fn post_json(&self, url: &str, body: Vec<u8>) -> Result<u16, ContractError> {
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| ContractError::transport(e.to_string()))?;

        let status = response.status().as_u16();

        // Drain so the connection goes back to the pool
        if let Err(e) = response.bytes().await {
            debug!(url, status, error = %e, "Failed to drain response body");
        }

        Ok(status)
    }
}
