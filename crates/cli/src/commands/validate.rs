//! `validate` command implementation.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use config_loader::ConfigLoader;
use contracts::{ConfigReader, PluginConfig};
use dispatcher::parse_fields;

use crate::cli::ValidateArgs;

/// Validation result for JSON output
#[derive(Serialize)]
struct ValidationResult {
    valid: bool,
    config_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warnings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<ConfigSummary>,
}

#[derive(Serialize)]
struct ConfigSummary {
    url: String,
    publish_fields: Vec<String>,
}

/// Execute the `validate` command
pub fn run_validate(args: &ValidateArgs) -> Result<()> {
    info!(config = %args.config.display(), "Validating configuration");

    let result = validate_config(args);

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .context("Failed to serialize validation result")?;
        println!("{}", json);
    } else {
        print_validation_result(&result);
    }

    if result.valid {
        Ok(())
    } else {
        anyhow::bail!("Configuration validation failed")
    }
}

fn validate_config(args: &ValidateArgs) -> ValidationResult {
    let config_path = args.config.display().to_string();

    if !args.config.exists() {
        return invalid(config_path, format!("File not found: {}", args.config.display()));
    }

    let policy = dispatcher::config_policy();
    let config = match ConfigLoader::load_from_path(&args.config, &policy) {
        Ok(config) => config,
        Err(e) => return invalid(config_path, e.to_string()),
    };

    match summarize(&config) {
        Ok(summary) => {
            let mut warnings: Vec<String> = ConfigLoader::unknown_keys(&config, &policy)
                .into_iter()
                .map(|key| format!("Unknown key '{key}' is ignored"))
                .collect();
            if summary.publish_fields.is_empty() {
                warnings.push("publish_fields selects nothing - only tags will be sent".to_string());
            }

            ValidationResult {
                valid: true,
                config_path,
                error: None,
                warnings: if warnings.is_empty() {
                    None
                } else {
                    Some(warnings)
                },
                summary: Some(summary),
            }
        }
        Err(e) => invalid(config_path, e.to_string()),
    }
}

fn summarize(config: &PluginConfig) -> Result<ConfigSummary> {
    let reader: &dyn ConfigReader = config;
    let url = dispatcher::resolve(reader)?;
    let publish_fields = parse_fields(reader)?
        .fields()
        .iter()
        .map(|f| f.to_string())
        .collect();
    Ok(ConfigSummary {
        url,
        publish_fields,
    })
}

fn invalid(config_path: String, error: String) -> ValidationResult {
    ValidationResult {
        valid: false,
        config_path,
        error: Some(error),
        warnings: None,
        summary: None,
    }
}

fn print_validation_result(result: &ValidationResult) {
    if result.valid {
        println!("✓ Configuration is valid: {}", result.config_path);

        if let Some(ref summary) = result.summary {
            println!("\n  URL: {}", summary.url);
            println!("  Fields: {}", summary.publish_fields.join("|"));
        }

        if let Some(ref warnings) = result.warnings {
            println!("\n⚠ Warnings:");
            for warning in warnings {
                println!("  - {}", warning);
            }
        }
    } else {
        println!("✗ Configuration is invalid: {}", result.config_path);
        if let Some(ref error) = result.error {
            println!("\n  Error: {}", error);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn args_for(content: &str) -> (tempfile::NamedTempFile, ValidateArgs) {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        let args = ValidateArgs {
            config: file.path().to_path_buf(),
            json: true,
        };
        (file, args)
    }

    #[test]
    fn test_valid_config_summary() {
        let (_file, args) = args_for(
            "address = \"es\"\nindex_timestamp = false\npublish_fields = \"Data|Bogus\"\nextra = 1\n",
        );
        let result = validate_config(&args);
        assert!(result.valid);

        let summary = result.summary.unwrap();
        assert_eq!(summary.url, "http://es:9200/log/message");
        assert_eq!(summary.publish_fields, vec!["Data"]);
        assert_eq!(result.warnings.unwrap().len(), 1);
    }

    #[test]
    fn test_invalid_port() {
        let (_file, args) = args_for("port = 70000\n");
        let result = validate_config(&args);
        assert!(!result.valid);
        assert!(result.error.unwrap().contains("port"));
        assert!(run_validate(&args).is_err());
    }

    #[test]
    fn test_missing_file() {
        let args = ValidateArgs {
            config: "/nonexistent/publisher.toml".into(),
            json: false,
        };
        let result = validate_config(&args);
        assert!(!result.valid);
        assert!(result.error.unwrap().contains("File not found"));
    }
}
