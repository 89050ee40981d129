//! # Contracts
//!
//! Frozen interface contracts shared by every crate in the publisher workspace.
//! Business crates depend only on this crate, never on each other's internals.
//!
//! ## Data Model
//! - `MetricRecord` is produced by the upstream collector and is read-only here
//! - `PublishField` is the closed vocabulary of projectable metric attributes
//! - `ConfigReader` is the typed view of the run configuration

mod config;
mod error;
mod field;
mod metric;
mod policy;
mod transport;

pub use config::*;
pub use error::*;
pub use field::PublishField;
pub use metric::*;
pub use policy::*;
pub use transport::*;
