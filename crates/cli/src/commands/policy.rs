//! `policy` command implementation.

use anyhow::{Context, Result};
use contracts::{ConfigPolicy, ConfigValue};

use crate::cli::PolicyArgs;

/// Execute the `policy` command
pub fn run_policy(args: &PolicyArgs) -> Result<()> {
    let policy = dispatcher::config_policy();

    if args.json {
        let json =
            serde_json::to_string_pretty(&policy).context("Failed to serialize config policy")?;
        println!("{}", json);
    } else {
        print!("{}", render(&policy));
    }
    Ok(())
}

fn render(policy: &ConfigPolicy) -> String {
    let mut out = String::from("\n=== Configuration Policy ===\n\n");
    for rule in &policy.rules {
        let default = match &rule.default {
            Some(ConfigValue::String(s)) => format!("\"{s}\""),
            Some(ConfigValue::Int(i)) => i.to_string(),
            Some(ConfigValue::Bool(b)) => b.to_string(),
            Some(ConfigValue::Float(f)) => f.to_string(),
            None => "-".to_string(),
        };
        out.push_str(&format!(
            "  {:<16} {:<7} {:<9} default: {}\n",
            rule.key,
            rule.kind.as_str(),
            if rule.required { "required" } else { "optional" },
            default
        ));
    }
    out
}
