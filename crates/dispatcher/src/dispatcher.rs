//! Dispatcher - concurrent fan-out of one request per metric

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, error, info, instrument};

use contracts::{DocumentTransport, MetricRecord, PublishField};

use crate::error::PublishError;
use crate::fields::FieldSelection;
use crate::metrics::{DispatchSnapshot, DispatchStats};
use crate::projector::build_document;

/// Statuses the document store answers on success
const ACCEPTED_STATUSES: [u16; 2] = [200, 201];

/// Fans a batch out to one concurrent send per metric
pub struct Dispatcher<T> {
    transport: Arc<T>,
    stats: Arc<DispatchStats>,
}

impl<T> Dispatcher<T>
where
    T: DocumentTransport + Sync + 'static,
{
    /// Create a new Dispatcher over a transport
    pub fn new(transport: T) -> Self {
        Self {
            transport: Arc::new(transport),
            stats: Arc::new(DispatchStats::new()),
        }
    }

    /// Name of the underlying transport
    pub fn transport_name(&self) -> &str {
        self.transport.name()
    }

    /// Get accumulated counters
    pub fn stats(&self) -> DispatchSnapshot {
        self.stats.snapshot()
    }

    /// Send every metric of the batch and wait for all of them
    ///
    /// Returns once every send has finished. When one or more sends fail, the
    /// first failure read back from the result channel is returned; the others
    /// are only logged.
    #[instrument(
        name = "dispatcher_publish_batch",
        skip(self, metrics, fields),
        fields(batch = metrics.len(), transport = %self.transport.name())
    )]
    pub async fn publish_batch(
        &self,
        metrics: &[MetricRecord],
        url: &str,
        fields: &FieldSelection,
    ) -> Result<(), PublishError> {
        if metrics.is_empty() {
            debug!("Empty batch, nothing to publish");
            return Ok(());
        }
        self.stats.inc_batches();

        let (tx, mut rx) = mpsc::channel(metrics.len());
        let url: Arc<str> = Arc::from(url);
        let fields: Arc<[PublishField]> = Arc::from(fields.fields());

        let mut tasks = JoinSet::new();
        for metric in metrics {
            let metric = metric.clone();
            let transport = Arc::clone(&self.transport);
            let stats = Arc::clone(&self.stats);
            let url = Arc::clone(&url);
            let fields = Arc::clone(&fields);
            let tx = tx.clone();

            tasks.spawn(async move {
                let outcome = send_metric(transport.as_ref(), &metric, &url, &fields).await;
                stats.record(&outcome);
                // Capacity equals batch size, so this never waits
                let _ = tx.send(outcome).await;
            });
        }
        drop(tx);

        let mut incomplete = None;
        while let Some(joined) = tasks.join_next().await {
            if let Err(e) = joined {
                error!(error = %e, "Publish task did not complete");
                let outcome = Err(PublishError::Task {
                    message: e.to_string(),
                });
                self.stats.record(&outcome);
                incomplete = incomplete.or(outcome.err());
            }
        }

        let mut first_error = None;
        let mut sent = 0usize;
        while let Some(outcome) = rx.recv().await {
            match outcome {
                Ok(()) => sent += 1,
                Err(e) => first_error = first_error.or(Some(e)),
            }
        }

        info!(
            sent,
            failed = metrics.len() - sent,
            url = %url,
            "Batch dispatched"
        );

        match first_error.or(incomplete) {
            Some(e) => {
                error!(status = %e, "Publishing failed");
                Err(e)
            }
            None => Ok(()),
        }
    }
}

/// Project, serialize, and POST a single metric
async fn send_metric<T: DocumentTransport>(
    transport: &T,
    metric: &MetricRecord,
    url: &str,
    fields: &[PublishField],
) -> Result<(), PublishError> {
    let namespace = metric.namespace.key();

    let body = serde_json::to_vec(&build_document(metric, fields)).map_err(|source| {
        error!(namespace = %namespace, error = %source, "Failed to serialize metric");
        PublishError::Serialization {
            namespace: namespace.clone(),
            source,
        }
    })?;

    let status = transport.post_json(url, body).await.map_err(|e| {
        error!(namespace = %namespace, url, error = %e, "Failed to send metric");
        PublishError::Transport {
            namespace: namespace.clone(),
            message: e.to_string(),
        }
    })?;

    if ACCEPTED_STATUSES.contains(&status) {
        debug!(namespace = %namespace, status, "Metric published");
        Ok(())
    } else {
        error!(
            namespace = %namespace,
            url,
            status,
            "Unable to publish metric"
        );
        Err(PublishError::Status { namespace, status })
    }
}
