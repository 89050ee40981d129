//! Typed configuration reader
//!
//! The hosting framework hands the publisher a flat key/value store.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::ContractError;

/// Recognized configuration keys
pub mod keys {
    pub const PROTOCOL: &str = "protocol";
    pub const ADDRESS: &str = "address";
    pub const PORT: &str = "port";
    pub const INDEX: &str = "index";
    pub const TYPE: &str = "type";
    pub const INDEX_TIMESTAMP: &str = "index_timestamp";
    pub const PUBLISH_FIELDS: &str = "publish_fields";
}

/// Single configuration value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl ConfigValue {
    /// Kind name used in type-mismatch errors
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) => "string",
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<i64> for ConfigValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<bool> for ConfigValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

/// Typed getters over a configuration store
///
/// # Errors
/// Absent key yields `ConfigMissing`, wrong kind yields `ConfigType`.
pub trait ConfigReader: Send + Sync {
    fn get_string(&self, key: &str) -> Result<String, ContractError>;

    fn get_int(&self, key: &str) -> Result<i64, ContractError>;

    fn get_bool(&self, key: &str) -> Result<bool, ContractError>;
}

/// In-memory plugin configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PluginConfig {
    values: BTreeMap<String, ConfigValue>,
}

impl PluginConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ConfigValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ConfigValue>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.values.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn lookup(&self, key: &str) -> Result<&ConfigValue, ContractError> {
        self.values
            .get(key)
            .ok_or_else(|| ContractError::config_missing(key))
    }
}

impl ConfigReader for PluginConfig {
    fn get_string(&self, key: &str) -> Result<String, ContractError> {
        match self.lookup(key)? {
            ConfigValue::String(s) => Ok(s.clone()),
            other => Err(ContractError::config_type(key, "string", other.kind())),
        }
    }

    fn get_int(&self, key: &str) -> Result<i64, ContractError> {
        match self.lookup(key)? {
            ConfigValue::Int(i) => Ok(*i),
            other => Err(ContractError::config_type(key, "int", other.kind())),
        }
    }

    fn get_bool(&self, key: &str) -> Result<bool, ContractError> {
        match self.lookup(key)? {
            ConfigValue::Bool(b) => Ok(*b),
            other => Err(ContractError::config_type(key, "bool", other.kind())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_getters() {
        let cfg = PluginConfig::new()
            .with(keys::ADDRESS, "h")
            .with(keys::PORT, 9200_i64)
            .with(keys::INDEX_TIMESTAMP, false);

        assert_eq!(cfg.get_string(keys::ADDRESS).unwrap(), "h");
        assert_eq!(cfg.get_int(keys::PORT).unwrap(), 9200);
        assert!(!cfg.get_bool(keys::INDEX_TIMESTAMP).unwrap());
    }

    #[test]
    fn test_missing_key() {
        let cfg = PluginConfig::new();
        let err = cfg.get_string(keys::PROTOCOL).unwrap_err();
        assert!(matches!(err, ContractError::ConfigMissing { .. }));
        assert!(err.is_config());
    }

    #[test]
    fn test_wrong_type() {
        let cfg = PluginConfig::new().with(keys::PORT, "9200");
        let err = cfg.get_int(keys::PORT).unwrap_err();
        assert!(
            matches!(err, ContractError::ConfigType { expected: "int", found: "string", .. }),
            "got: {err}"
        );
    }

    #[test]
    fn test_deserialize_mixed_values() {
        let cfg: PluginConfig =
            serde_json::from_str(r#"{"port": 9200, "address": "h", "index_timestamp": true}"#)
                .unwrap();
        assert_eq!(cfg.get(keys::PORT), Some(&ConfigValue::Int(9200)));
        assert_eq!(cfg.get(keys::INDEX_TIMESTAMP), Some(&ConfigValue::Bool(true)));
        assert_eq!(cfg.len(), 3);
    }
}
