//! # Config Loader
//!
//! Plugin configuration loading module.
//!
//! Responsibilities:
//! - Parse TOML/JSON configuration files into a `PluginConfig`
//! - Fill absent keys from the plugin's `ConfigPolicy` defaults
//! - Validate value kinds and ranges
//!
//! # Example
//!
//! ```no_run
//! use config_loader::ConfigLoader;
//! use contracts::ConfigPolicy;
//! use std::path::Path;
//!
//! let policy = ConfigPolicy::new().add_string_rule("address", false, Some("localhost"));
//! let config = ConfigLoader::load_from_path(Path::new("publisher.toml"), &policy).unwrap();
//! println!("keys: {}", config.len());
//! ```

mod parser;
mod validator;

pub use contracts::PluginConfig;
pub use parser::ConfigFormat;

use contracts::{ConfigPolicy, ContractError};
use std::path::Path;

/// Configuration loader
///
/// Provides static methods to load configuration from files or strings.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from file path
    ///
    /// Automatically detects format from file extension (.toml / .json).
    ///
    /// # Errors
    /// - File read failure
    /// - Unsupported format
    /// - Parse failure
    /// - Validation failure
    pub fn load_from_path(path: &Path, policy: &ConfigPolicy) -> Result<PluginConfig, ContractError> {
        let format = Self::detect_format(path)?;
        let content = Self::read_file(path)?;
        Self::load_from_str(&content, format, policy)
    }

    /// Load configuration from string
    ///
    /// # Errors
    /// - Parse failure
    /// - Validation failure
    pub fn load_from_str(
        content: &str,
        format: ConfigFormat,
        policy: &ConfigPolicy,
    ) -> Result<PluginConfig, ContractError> {
        let mut config = parser::parse(content, format)?;
        policy.apply_defaults(&mut config);
        validator::validate(&config, policy)?;
        Ok(config)
    }

    /// Keys present in the configuration that the policy does not declare
    pub fn unknown_keys(config: &PluginConfig, policy: &ConfigPolicy) -> Vec<String> {
        config
            .keys()
            .filter(|key| policy.rule(key).is_none())
            .map(str::to_string)
            .collect()
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(config: &PluginConfig) -> Result<String, ContractError> {
        toml::to_string_pretty(config)
            .map_err(|e| ContractError::config_parse(format!("TOML serialize error: {e}")))
    }

    /// Serialize configuration to JSON string
    pub fn to_json(config: &PluginConfig) -> Result<String, ContractError> {
        serde_json::to_string_pretty(config)
            .map_err(|e| ContractError::config_parse(format!("JSON serialize error: {e}")))
    }
}

impl ConfigLoader {
    /// Infer configuration format from file extension
    fn detect_format(path: &Path) -> Result<ConfigFormat, ContractError> {
        let ext = path.extension().and_then(|e| e.to_str()).ok_or_else(|| {
            ContractError::config_parse("cannot determine file format from extension")
        })?;

        ConfigFormat::from_extension(ext).ok_or_else(|| {
            ContractError::config_parse(format!("unsupported config format: .{ext}"))
        })
    }

    /// Read configuration file content
    fn read_file(path: &Path) -> Result<String, ContractError> {
        Ok(std::fs::read_to_string(path)?)
    }
}
