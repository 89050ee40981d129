//! # Dispatcher
//!
//! Metric publishing core.
//!
//! Responsibilities:
//! - Resolve the time-partitioned destination URL
//! - Parse the configured field selection
//! - Project each metric into a flat JSON document
//! - Fan out one concurrent POST per metric and aggregate the outcomes

pub mod destination;
pub mod dispatcher;
pub mod error;
pub mod fields;
pub mod metrics;
pub mod projector;
pub mod publisher;
pub mod transport;

pub use contracts::{DocumentTransport, MetricRecord, PublishField};
pub use destination::{resolve, resolve_at, Destination};
pub use dispatcher::Dispatcher;
pub use error::PublishError;
pub use fields::{parse_fields, FieldSelection, DEFAULT_PUBLISH_FIELDS};
pub use metrics::{DispatchSnapshot, DispatchStats};
pub use projector::{build_document, project, Document, FieldValue};
pub use publisher::{config_policy, Publisher};
pub use transport::{HttpTransport, LogTransport};
