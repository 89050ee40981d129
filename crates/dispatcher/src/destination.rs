//! Destination resolution - configuration to endpoint URL
//!
//! The index may carry a date suffix (e.g. `log-2016.10.16`). The date is read
//! from the host clock on every call so the index rotates daily.

use chrono::{Local, NaiveDate};
use contracts::{keys, ConfigReader, ContractError};
use std::fmt;

pub const DEFAULT_PROTOCOL: &str = "http";
pub const DEFAULT_ADDRESS: &str = "localhost";
pub const DEFAULT_PORT: i64 = 9200;
pub const DEFAULT_INDEX: &str = "log";
pub const DEFAULT_TYPE: &str = "message";
pub const DEFAULT_INDEX_TIMESTAMP: bool = true;

/// Date suffix format of a rotated index
pub const INDEX_DATE_FORMAT: &str = "%Y.%m.%d";

/// Resolved document-store endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    pub protocol: String,
    pub address: String,
    pub port: i64,
    /// Final index name, date suffix included
    pub index: String,
    pub doc_type: String,
}

impl Destination {
    /// Read the endpoint from configuration, stamping the index with `today`
    ///
    /// # Errors
    /// Any key missing or of the wrong kind.
    pub fn from_config(config: &dyn ConfigReader, today: NaiveDate) -> Result<Self, ContractError> {
        let protocol = config.get_string(keys::PROTOCOL)?;
        let address = config.get_string(keys::ADDRESS)?;
        let port = config.get_int(keys::PORT)?;
        let index_timestamp = config.get_bool(keys::INDEX_TIMESTAMP)?;
        let prefix = config.get_string(keys::INDEX)?;
        let doc_type = config.get_string(keys::TYPE)?;

        Ok(Self {
            protocol,
            address,
            port,
            index: index_name(&prefix, index_timestamp, today),
            doc_type,
        })
    }

    pub fn url(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}://{}:{}/{}/{}",
            self.protocol, self.address, self.port, self.index, self.doc_type
        )
    }
}

/// Index name, optionally suffixed with `-YYYY.MM.DD`
pub fn index_name(prefix: &str, with_date: bool, date: NaiveDate) -> String {
    if with_date {
        format!("{}-{}", prefix, date.format(INDEX_DATE_FORMAT))
    } else {
        prefix.to_string()
    }
}

/// Resolve the target URL using today's local date
pub fn resolve(config: &dyn ConfigReader) -> Result<String, ContractError> {
    resolve_at(config, Local::now().date_naive())
}

/// Resolve the target URL for a given date
pub fn resolve_at(config: &dyn ConfigReader, date: NaiveDate) -> Result<String, ContractError> {
    Destination::from_config(config, date).map(|d| d.url())
}
