//! Publisher - entry point invoked by the hosting framework
//!
//! Resolves the destination, parses the field selection, then dispatches.
//! Configuration failures short-circuit before any HTTP activity.

use std::time::Instant;

use tracing::{info, instrument};

use contracts::{keys, ConfigPolicy, ConfigReader, ContractError, DocumentTransport, MetricRecord};

use crate::destination::{
    self, DEFAULT_ADDRESS, DEFAULT_INDEX, DEFAULT_INDEX_TIMESTAMP, DEFAULT_PORT, DEFAULT_PROTOCOL,
    DEFAULT_TYPE,
};
use crate::dispatcher::Dispatcher;
use crate::error::PublishError;
use crate::fields::{self, DEFAULT_PUBLISH_FIELDS};
use crate::metrics::DispatchSnapshot;
use crate::transport::HttpTransport;

/// Configuration keys accepted by the publisher, with defaults
pub fn config_policy() -> ConfigPolicy {
    ConfigPolicy::new()
        .add_string_rule(keys::PROTOCOL, false, Some(DEFAULT_PROTOCOL))
        .add_string_rule(keys::ADDRESS, false, Some(DEFAULT_ADDRESS))
        .add_int_rule(keys::PORT, false, Some(DEFAULT_PORT))
        .add_string_rule(keys::INDEX, false, Some(DEFAULT_INDEX))
        .add_string_rule(keys::TYPE, false, Some(DEFAULT_TYPE))
        .add_bool_rule(keys::INDEX_TIMESTAMP, false, Some(DEFAULT_INDEX_TIMESTAMP))
        .add_string_rule(keys::PUBLISH_FIELDS, false, Some(DEFAULT_PUBLISH_FIELDS))
}

/// Publishes metric batches as JSON documents
pub struct Publisher<T = HttpTransport> {
    dispatcher: Dispatcher<T>,
}

impl Publisher<HttpTransport> {
    /// Publisher over plain HTTP with default client settings
    pub fn http() -> Result<Self, PublishError> {
        Ok(Self::new(HttpTransport::new()?))
    }
}

impl<T> Publisher<T>
where
    T: DocumentTransport + Sync + 'static,
{
    pub fn new(transport: T) -> Self {
        Self {
            dispatcher: Dispatcher::new(transport),
        }
    }

    /// Configuration policy exposed to the hosting framework
    pub fn config_policy(&self) -> ConfigPolicy {
        config_policy()
    }

    /// Accumulated dispatch counters
    pub fn stats(&self) -> DispatchSnapshot {
        self.dispatcher.stats()
    }

    /// Publish one batch
    ///
    /// # Errors
    /// - `PublishError::Config` when either input is absent or a key is
    ///   missing/mistyped; no request is issued
    /// - the first per-metric failure otherwise
    #[instrument(name = "publisher_publish", skip_all, fields(transport = %self.dispatcher.transport_name()))]
    pub async fn publish(
        &self,
        metrics: Option<&[MetricRecord]>,
        config: Option<&dyn ConfigReader>,
    ) -> Result<(), PublishError> {
        let config = config.ok_or(ContractError::InputMissing {
            what: "configuration",
        })?;
        let metrics = metrics.ok_or(ContractError::InputMissing {
            what: "metric batch",
        })?;

        let started = Instant::now();
        let url = destination::resolve(config)?;
        let fields = fields::parse_fields(config)?;

        info!(
            url = %url,
            batch = metrics.len(),
            fields = fields.len(),
            "Publishing batch"
        );
        observability::record_batch(metrics.len());

        let result = self.dispatcher.publish_batch(metrics, &url, &fields).await;
        observability::record_publish_latency_ms(started.elapsed().as_secs_f64() * 1000.0);
        result
    }
}
