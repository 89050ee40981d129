//! Field-selection parsing

use contracts::{keys, ConfigReader, ContractError, PublishField};
use tracing::warn;

/// Separator between field names in `publish_fields`
pub const FIELD_SEPARATOR: char = '|';

/// Default `publish_fields` value: every field, canonical order
pub const DEFAULT_PUBLISH_FIELDS: &str = "Namespace|Config|Data|Description|Timestamp|Unit|Version";

/// Ordered list of recognized fields to publish
///
/// Duplicates are preserved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSelection(Vec<PublishField>);

impl FieldSelection {
    /// Every field, canonical order
    pub fn all() -> Self {
        Self(PublishField::ALL.to_vec())
    }

    /// Parse a pipe-delimited list; unsupported names are dropped with a warning
    pub fn parse(raw: &str) -> Self {
        let fields = raw
            .split(FIELD_SEPARATOR)
            .filter_map(|name| match name.parse::<PublishField>() {
                Ok(field) => Some(field),
                Err(_) => {
                    warn!(field_to_publish = %name, "Unsupported field passed, skipping");
                    None
                }
            })
            .collect();
        Self(fields)
    }

    pub fn fields(&self) -> &[PublishField] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<PublishField>> for FieldSelection {
    fn from(fields: Vec<PublishField>) -> Self {
        Self(fields)
    }
}

/// Read and parse `publish_fields` from the configuration
///
/// # Errors
/// Only when the key is missing or not a string.
pub fn parse_fields(config: &dyn ConfigReader) -> Result<FieldSelection, ContractError> {
    let raw = config.get_string(keys::PUBLISH_FIELDS)?;
    Ok(FieldSelection::parse(&raw))
}
