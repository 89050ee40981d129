//! LogTransport - logs documents via tracing instead of sending them

use contracts::{ContractError, DocumentTransport};
use tracing::{info, instrument};

/// Status answered for every logged document
const LOGGED_STATUS: u16 = 201;

/// Transport for dry runs: every document is logged and reported as created
pub struct LogTransport {
    name: String,
}

impl LogTransport {
    /// Create a new LogTransport with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl DocumentTransport for LogTransport {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(name = "log_transport_post", skip(self, body), fields(transport = %self.name))]
    async fn post_json(&self, url: &str, body: Vec<u8>) -> Result<u16, ContractError> {
        info!(
            transport = %self.name,
            url,
            bytes = body.len(),
            document = %String::from_utf8_lossy(&body),
            "Document received"
        );
        Ok(LOGGED_STATUS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_log_transport_post() {
        let transport = LogTransport::new("dry_run");
        let status = transport
            .post_json("http://localhost:9200/log/message", br#"{"Data":1}"#.to_vec())
            .await
            .unwrap();
        assert_eq!(status, 201);
    }

    #[tokio::test]
    async fn test_log_transport_name() {
        let transport = LogTransport::new("my_logger");
        assert_eq!(transport.name(), "my_logger");
    }
}
