//! Configuration validation
//!
//! Rules:
//! - every required policy key is present
//! - every present policy key has the declared kind
//! - port is within 1..=65535
//! - protocol is http or https

use contracts::{keys, ConfigPolicy, ConfigReader, ContractError, PluginConfig};

const SUPPORTED_PROTOCOLS: [&str; 2] = ["http", "https"];

/// Validate a configuration against a policy
///
/// Returns the first error encountered, or Ok(()).
pub fn validate(config: &PluginConfig, policy: &ConfigPolicy) -> Result<(), ContractError> {
    validate_rules(config, policy)?;
    validate_port(config)?;
    validate_protocol(config)?;
    Ok(())
}

/// Check presence and kind of every policy key
fn validate_rules(config: &PluginConfig, policy: &ConfigPolicy) -> Result<(), ContractError> {
    for rule in &policy.rules {
        match config.get(&rule.key) {
            Some(value) if !rule.kind.matches(value) => {
                return Err(ContractError::config_type(
                    &rule.key,
                    rule.kind.as_str(),
                    value.kind(),
                ));
            }
            None if rule.required => return Err(ContractError::config_missing(&rule.key)),
            _ => {}
        }
    }
    Ok(())
}

fn validate_port(config: &PluginConfig) -> Result<(), ContractError> {
    if !config.contains_key(keys::PORT) {
        return Ok(());
    }
    let port = config.get_int(keys::PORT)?;
    if !(1..=i64::from(u16::MAX)).contains(&port) {
        return Err(ContractError::config_validation(
            keys::PORT,
            format!("port must be within 1..=65535, got {port}"),
        ));
    }
    Ok(())
}

fn validate_protocol(config: &PluginConfig) -> Result<(), ContractError> {
    if !config.contains_key(keys::PROTOCOL) {
        return Ok(());
    }
    let protocol = config.get_string(keys::PROTOCOL)?;
    if !SUPPORTED_PROTOCOLS.contains(&protocol.as_str()) {
        return Err(ContractError::config_validation(
            keys::PROTOCOL,
            format!("unsupported protocol '{protocol}', expected http or https"),
        ));
    }
    Ok(())
}
