//! Config command handlers

use anyhow::{bail, Context, Result};
use std::path::PathBuf;

use linkshelf_core::Config;

use crate::output::{print_json, Output, OutputFormat};

/// Show current configuration
pub fn show(config_path: Option<&PathBuf>, output: &Output) -> Result<()> {
    let config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;
    let effective_path = config_path
        .cloned()
        .unwrap_or_else(Config::config_file_path);

    match output.format {
        OutputFormat::Json => print_json(&config),
        OutputFormat::Quiet => println!("{}", config.data_dir.display()),
        OutputFormat::Human => {
            println!("Configuration:");
            println!("  data_dir:  {}", config.data_dir.display());
            println!(
                "  log_file:  {}",
                config
                    .log_file
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "(stderr)".to_string())
            );
            println!("  log_level: {}", config.log_level());
            println!();
            println!("Config file: {}", effective_path.display());
        }
    }

    Ok(())
}

/// Set a configuration value
pub fn set(
    key: String,
    value: String,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    let mut config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    apply(&mut config, &key, &value)?;

    let save_path = config_path
        .cloned()
        .unwrap_or_else(Config::config_file_path);
    config
        .save_to_path(&save_path)
        .context("Failed to save configuration")?;

    output.success(&format!("Set {} = {}", key, value));

    Ok(())
}

/// Apply one key/value pair; "none" or "" clears optional keys
fn apply(config: &mut Config, key: &str, value: &str) -> Result<()> {
    let cleared = value.is_empty() || value == "none";
    match key {
        "data_dir" => {
            if cleared {
                bail!("data_dir cannot be empty");
            }
            config.data_dir = value.into();
        }
        "log_file" => {
            config.log_file = if cleared { None } else { Some(value.into()) };
        }
        "log_level" => {
            if !cleared && !LOG_LEVELS.contains(&value.to_lowercase().as_str()) {
                bail!(
                    "Invalid log level '{}'. Use one of: {}",
                    value,
                    LOG_LEVELS.join(", ")
                );
            }
            config.log_level = if cleared {
                None
            } else {
                Some(value.to_lowercase())
            };
        }
        _ => {
            bail!(
                "Unknown configuration key: '{}'\n\
                 Valid keys: data_dir, log_file, log_level",
                key
            );
        }
    }
    Ok(())
}

const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];
