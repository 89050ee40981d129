//! Publish metrics
//!
//! Counters and histograms emitted through the `metrics` facade. Without an
//! installed recorder every call is a no-op.

use metrics::{counter, histogram};

/// Outcome label of a single document send
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentOutcome {
    /// Destination answered 200 or 201
    Success,
    /// Destination answered any other status
    Rejected,
    /// Destination unreachable
    TransportError,
    /// Document could not be encoded as JSON
    SerializationError,
    /// Send task panicked or was cancelled
    TaskError,
}

impl DocumentOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Rejected => "rejected",
            Self::TransportError => "transport_error",
            Self::SerializationError => "serialization_error",
            Self::TaskError => "task_error",
        }
    }
}

/// Record one document send
pub fn record_document_published(outcome: DocumentOutcome) {
    counter!(
        "es_publisher_documents_total",
        "outcome" => outcome.as_str()
    )
    .increment(1);
}

/// Record one publish call and its batch size
pub fn record_batch(size: usize) {
    counter!("es_publisher_batches_total").increment(1);
    histogram!("es_publisher_batch_size").record(size as f64);
}

/// Record wall time of a full publish call
pub fn record_publish_latency_ms(latency_ms: f64) {
    histogram!("es_publisher_publish_latency_ms").record(latency_ms);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_labels() {
        assert_eq!(DocumentOutcome::Success.as_str(), "success");
        assert_eq!(DocumentOutcome::Rejected.as_str(), "rejected");
        assert_eq!(DocumentOutcome::TransportError.as_str(), "transport_error");
    }

    #[test]
    fn test_recording_without_recorder_is_noop() {
        record_document_published(DocumentOutcome::Success);
        record_batch(3);
        record_publish_latency_ms(1.5);
    }
}
