//! ConfigPolicy - descriptive declaration of accepted configuration keys
//!
//! Exposed to the hosting framework so a configuration UI or validator can
//! present the keys, their kinds, and their defaults.

use serde::{Deserialize, Serialize};

use crate::{ConfigValue, PluginConfig};

/// Kind of a configuration value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    String,
    Int,
    Bool,
}

impl ValueKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Int => "int",
            Self::Bool => "bool",
        }
    }

    /// Whether `value` has this kind
    pub fn matches(self, value: &ConfigValue) -> bool {
        matches!(
            (self, value),
            (Self::String, ConfigValue::String(_))
                | (Self::Int, ConfigValue::Int(_))
                | (Self::Bool, ConfigValue::Bool(_))
        )
    }
}

/// Rule for a single configuration key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigRule {
    pub key: String,
    pub kind: ValueKind,
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<ConfigValue>,
}

/// Full policy of a plugin
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigPolicy {
    pub rules: Vec<ConfigRule>,
}

impl ConfigPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_string_rule(self, key: &str, required: bool, default: Option<&str>) -> Self {
        self.add_rule(key, ValueKind::String, required, default.map(ConfigValue::from))
    }

    pub fn add_int_rule(self, key: &str, required: bool, default: Option<i64>) -> Self {
        self.add_rule(key, ValueKind::Int, required, default.map(ConfigValue::Int))
    }

    pub fn add_bool_rule(self, key: &str, required: bool, default: Option<bool>) -> Self {
        self.add_rule(key, ValueKind::Bool, required, default.map(ConfigValue::Bool))
    }

    fn add_rule(
        mut self,
        key: &str,
        kind: ValueKind,
        required: bool,
        default: Option<ConfigValue>,
    ) -> Self {
        self.rules.push(ConfigRule {
            key: key.to_string(),
            kind,
            required,
            default,
        });
        self
    }

    pub fn rule(&self, key: &str) -> Option<&ConfigRule> {
        self.rules.iter().find(|r| r.key == key)
    }

    /// Fill absent keys from rule defaults; present keys are left untouched
    pub fn apply_defaults(&self, config: &mut PluginConfig) {
        for rule in &self.rules {
            if let Some(default) = &rule.default {
                if !config.contains_key(&rule.key) {
                    config.insert(rule.key.clone(), default.clone());
                }
            }
        }
    }
}
