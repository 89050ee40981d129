//! MetricRecord - upstream collector output
//!
//! One timestamped, named measurement handed to the publisher.

use chrono::{DateTime, Utc};
use serde::ser::Error as _;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Placeholder value of a dynamic namespace element before collection
pub const DYNAMIC_PLACEHOLDER: &str = "*";

/// Single path segment of a metric namespace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceElement {
    /// Concrete segment value
    pub value: String,

    /// Set only for dynamic elements (e.g. "host")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Human-readable explanation of a dynamic element
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl NamespaceElement {
    pub fn new_static(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            name: None,
            description: None,
        }
    }

    pub fn new_dynamic(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            value: DYNAMIC_PLACEHOLDER.to_string(),
            name: Some(name.into()),
            description: Some(description.into()),
        }
    }

    pub fn is_dynamic(&self) -> bool {
        self.name.is_some()
    }
}

/// Hierarchical metric name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Namespace(pub Vec<NamespaceElement>);

impl Namespace {
    /// Build a namespace of static elements
    pub fn new<S: AsRef<str>>(segments: &[S]) -> Self {
        Self(
            segments
                .iter()
                .map(|s| NamespaceElement::new_static(s.as_ref()))
                .collect(),
        )
    }

    pub fn add_static_element(mut self, value: impl Into<String>) -> Self {
        self.0.push(NamespaceElement::new_static(value));
        self
    }

    pub fn add_dynamic_element(
        mut self,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        self.0.push(NamespaceElement::new_dynamic(name, description));
        self
    }

    /// Segment values in order
    pub fn strings(&self) -> Vec<&str> {
        self.0.iter().map(|e| e.value.as_str()).collect()
    }

    /// Slash-joined path, the form stored in documents and used in logs
    pub fn key(&self) -> String {
        self.strings().join("/")
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

/// Measured value or config entry, shaped like a JSON value
///
/// Serialization fails for non-finite floats, which JSON cannot represent.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum MetricData {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<MetricData>),
    Map(BTreeMap<String, MetricData>),
}

impl Serialize for MetricData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Int(i) => serializer.serialize_i64(*i),
            Self::Float(f) if f.is_finite() => serializer.serialize_f64(*f),
            Self::Float(f) => Err(S::Error::custom(format!("unsupported float value: {f}"))),
            Self::Text(s) => serializer.serialize_str(s),
            Self::List(items) => serializer.collect_seq(items),
            Self::Map(map) => serializer.collect_map(map),
        }
    }
}

impl From<i64> for MetricData {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for MetricData {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for MetricData {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for MetricData {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for MetricData {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

/// Metric record
///
/// Owned by the upstream collector; the publisher only reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricRecord {
    /// Hierarchical name
    pub namespace: Namespace,

    /// Measured value
    #[serde(default)]
    pub data: MetricData,

    #[serde(default)]
    pub unit: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    /// Collection-time configuration (informational)
    #[serde(default)]
    pub config: BTreeMap<String, MetricData>,

    /// Free-form tags merged verbatim into the outgoing document
    #[serde(default)]
    pub tags: BTreeMap<String, String>,

    /// Collection time (UTC)
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,

    #[serde(default)]
    pub version: i64,
}

impl MetricRecord {
    /// Create a record stamped with the current time
    pub fn new(namespace: Namespace, data: impl Into<MetricData>) -> Self {
        Self {
            namespace,
            data: data.into(),
            unit: None,
            description: None,
            config: BTreeMap::new(),
            tags: BTreeMap::new(),
            timestamp: Utc::now(),
            version: 0,
        }
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_config(mut self, key: impl Into<String>, value: impl Into<MetricData>) -> Self {
        self.config.insert(key.into(), value.into());
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn with_version(mut self, version: i64) -> Self {
        self.version = version;
        self
    }
}
