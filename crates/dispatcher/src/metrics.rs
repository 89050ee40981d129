//! Dispatch statistics for observability

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use observability::DocumentOutcome;

use crate::error::PublishError;

/// Counters accumulated across publish calls of one dispatcher
#[derive(Debug, Default)]
pub struct DispatchStats {
    /// Non-empty batches dispatched
    batches: AtomicU64,
    /// Documents accepted with 200/201
    sent: AtomicU64,
    /// Documents answered with any other status
    rejected: AtomicU64,
    /// Destination unreachable
    transport_failures: AtomicU64,
    /// Documents that could not be encoded
    serialization_failures: AtomicU64,
    /// Send tasks that never reported
    task_failures: AtomicU64,
}

impl DispatchStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inc_batches(&self) {
        self.batches.fetch_add(1, Ordering::Relaxed);
    }

    /// Count one per-metric outcome and forward it to the metrics recorder
    pub fn record(&self, outcome: &Result<(), PublishError>) {
        let (counter, label) = match outcome {
            Ok(()) => (&self.sent, DocumentOutcome::Success),
            Err(PublishError::Status { .. }) => (&self.rejected, DocumentOutcome::Rejected),
            Err(PublishError::Transport { .. }) => {
                (&self.transport_failures, DocumentOutcome::TransportError)
            }
            Err(PublishError::Serialization { .. }) => {
                (&self.serialization_failures, DocumentOutcome::SerializationError)
            }
            Err(PublishError::Task { .. } | PublishError::Config(_)) => {
                (&self.task_failures, DocumentOutcome::TaskError)
            }
        };
        counter.fetch_add(1, Ordering::Relaxed);
        observability::record_document_published(label);
    }

    pub fn batches(&self) -> u64 {
        self.batches.load(Ordering::Relaxed)
    }

    pub fn sent(&self) -> u64 {
        self.sent.load(Ordering::Relaxed)
    }

    pub fn failed(&self) -> u64 {
        self.rejected.load(Ordering::Relaxed)
            + self.transport_failures.load(Ordering::Relaxed)
            + self.serialization_failures.load(Ordering::Relaxed)
            + self.task_failures.load(Ordering::Relaxed)
    }

    /// Get snapshot of all counters
    pub fn snapshot(&self) -> DispatchSnapshot {
        DispatchSnapshot {
            batches: self.batches(),
            sent: self.sent(),
            rejected: self.rejected.load(Ordering::Relaxed),
            transport_failures: self.transport_failures.load(Ordering::Relaxed),
            serialization_failures: self.serialization_failures.load(Ordering::Relaxed),
            task_failures: self.task_failures.load(Ordering::Relaxed),
        }
    }
}

/// Snapshot of dispatch counters (for reporting)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchSnapshot {
    pub batches: u64,
    pub sent: u64,
    pub rejected: u64,
    pub transport_failures: u64,
    pub serialization_failures: u64,
    pub task_failures: u64,
}

impl DispatchSnapshot {
    pub fn failed(&self) -> u64 {
        self.rejected + self.transport_failures + self.serialization_failures + self.task_failures
    }
}

impl fmt::Display for DispatchSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Dispatch Summary ===")?;
        writeln!(f, "Batches: {}", self.batches)?;
        writeln!(f, "Documents sent: {}", self.sent)?;
        writeln!(f, "Documents failed: {}", self.failed())?;
        writeln!(f, "  rejected: {}", self.rejected)?;
        writeln!(f, "  transport: {}", self.transport_failures)?;
        writeln!(f, "  serialization: {}", self.serialization_failures)?;
        write!(f, "  incomplete tasks: {}", self.task_failures)
    }
}
