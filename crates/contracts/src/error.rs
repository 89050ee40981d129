//! Layered error definitions
//!
//! Categorized by source: config / input / transport

use thiserror::Error;

/// Unified error type
#[derive(Debug, Error)]
pub enum ContractError {
    // ===== Configuration Errors =====
    /// Required configuration key is absent
    #[error("config key '{key}' is missing")]
    ConfigMissing { key: String },

    /// Configuration key holds a value of the wrong kind
    #[error("config key '{key}' has wrong type: expected {expected}, found {found}")]
    ConfigType {
        key: String,
        expected: &'static str,
        found: &'static str,
    },

    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== Input Errors =====
    /// A mandatory input of the publish call was not supplied
    #[error("missing input: {what}")]
    InputMissing { what: &'static str },

    // ===== Transport Errors =====
    /// Network-level failure reaching the destination
    #[error("transport error: {message}")]
    Transport { message: String },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ContractError {
    /// Create missing configuration key error
    pub fn config_missing(key: impl Into<String>) -> Self {
        Self::ConfigMissing { key: key.into() }
    }

    /// Create configuration type mismatch error
    pub fn config_type(key: impl Into<String>, expected: &'static str, found: &'static str) -> Self {
        Self::ConfigType {
            key: key.into(),
            expected,
            found,
        }
    }

    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Whether this error belongs to the configuration category
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Self::ConfigMissing { .. }
                | Self::ConfigType { .. }
                | Self::ConfigParse { .. }
                | Self::ConfigValidation { .. }
                | Self::InputMissing { .. }
        )
    }
}
