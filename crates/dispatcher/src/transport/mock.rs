//! Mock transport shared by the dispatcher tests

use contracts::{ContractError, DocumentTransport};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::time::{sleep, Duration};

/// Records every request and answers a fixed status
#[derive(Clone)]
pub(crate) struct MockTransport {
    pub status: u16,
    pub fail: bool,
    pub delay_ms: u64,
    pub calls: Arc<AtomicU64>,
    pub completed: Arc<AtomicU64>,
    pub requests: Arc<Mutex<Vec<(String, serde_json::Value)>>>,
}

impl MockTransport {
    pub fn with_status(status: u16) -> Self {
        Self {
            status,
            fail: false,
            delay_ms: 0,
            calls: Arc::new(AtomicU64::new(0)),
            completed: Arc::new(AtomicU64::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn unreachable() -> Self {
        Self {
            fail: true,
            ..Self::with_status(0)
        }
    }

    pub fn delayed(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn completed(&self) -> u64 {
        self.completed.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<(String, serde_json::Value)> {
        self.requests.lock().unwrap().clone()
    }
}

impl DocumentTransport for MockTransport {
    fn name(&self) -> &str {
        "mock"
    }

    async fn post_json(&self, url: &str, body: Vec<u8>) -> Result<u16, ContractError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let document = serde_json::from_slice(&body).unwrap();
        self.requests.lock().unwrap().push((url.to_string(), document));

        if self.delay_ms > 0 {
            sleep(Duration::from_millis(self.delay_ms)).await;
        }
        self.completed.fetch_add(1, Ordering::SeqCst);

        if self.fail {
            return Err(ContractError::transport("connection refused"));
        }
        Ok(self.status)
    }
}
