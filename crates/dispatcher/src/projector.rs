//! Field projection - metric record to flat document

use chrono::{DateTime, Utc};
use contracts::{MetricData, MetricRecord, PublishField};
use serde::Serialize;
use std::borrow::Cow;
use std::collections::BTreeMap;

/// Value stored under one document key
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue<'a> {
    Text(Cow<'a, str>),
    Data(&'a MetricData),
    Config(&'a BTreeMap<String, MetricData>),
    Timestamp(DateTime<Utc>),
    Version(i64),
}

/// Outgoing document; keys serialize in sorted order
pub type Document<'a> = BTreeMap<String, FieldValue<'a>>;

/// Attribute of `metric` selected by `field`
pub fn field_value(metric: &MetricRecord, field: PublishField) -> FieldValue<'_> {
    match field {
        PublishField::Namespace => FieldValue::Text(Cow::Owned(metric.namespace.key())),
        PublishField::Config => FieldValue::Config(&metric.config),
        PublishField::Data => FieldValue::Data(&metric.data),
        PublishField::Description => {
            FieldValue::Text(Cow::Borrowed(metric.description.as_deref().unwrap_or_default()))
        }
        PublishField::Timestamp => FieldValue::Timestamp(metric.timestamp),
        PublishField::Unit => FieldValue::Text(Cow::Borrowed(metric.unit.as_deref().unwrap_or_default())),
        PublishField::Version => FieldValue::Version(metric.version),
    }
}

/// Project the selected fields of a metric
///
/// A field listed twice is written twice under the same key.
pub fn project<'a>(metric: &'a MetricRecord, fields: &[PublishField]) -> Document<'a> {
    fields
        .iter()
        .map(|&field| (field.as_str().to_string(), field_value(metric, field)))
        .collect()
}

/// Projected fields plus every tag; a tag overrides a projected key
pub fn build_document<'a>(metric: &'a MetricRecord, fields: &[PublishField]) -> Document<'a> {
    let mut document = project(metric, fields);
    for (key, value) in &metric.tags {
        document.insert(key.clone(), FieldValue::Text(Cow::Borrowed(value)));
    }
    document
}
