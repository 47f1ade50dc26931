//! Handler functions for `treeline config` subcommands.
//!
//! Implements `path`, `show`, `get`, `init` and `export`, plus the TOML
//! dotted-key lookup they share.

use std::path::PathBuf;

use treeline_core::{Error, Result};

use crate::cli::ConfigAction;
use crate::config::TreelineConfig;

// ============================================================================
// Command dispatch
// ============================================================================

/// Handle a config subcommand.
///
/// Receives the raw `--config` path (not a loaded config) because some
/// commands (path, init) work before a config file exists.
pub fn handle_config_command(config_path: Option<&str>, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Path => {
            println!("{}", cmd_config_path(config_path)?);
            Ok(())
        }
        ConfigAction::Show => {
            let config = TreelineConfig::load(config_path)?;
            print!("{}", cmd_config_show(&config)?);
            Ok(())
        }
        ConfigAction::Get { key } => {
            let config = TreelineConfig::load(config_path)?;
            println!("{}", cmd_config_get(&config, &key)?);
            Ok(())
        }
        ConfigAction::Init { file, force } => {
            let path = cmd_config_init(file.as_deref(), force)?;
            println!("Config file created at {}", path.display());
            Ok(())
        }
        ConfigAction::Export { docker_env } => {
            let config = TreelineConfig::load(config_path)?;
            for line in cmd_config_export(&config, docker_env)? {
                println!("{line}");
            }
            Ok(())
        }
    }
}

// ============================================================================
// Command handlers
// ============================================================================

/// The resolved config file path, annotated when the file is missing.
fn cmd_config_path(config_path: Option<&str>) -> Result<String> {
    let path = TreelineConfig::resolve_config_path(config_path).ok_or_else(|| {
        Error::config("Could not determine config directory for this platform")
    })?;
    if path.exists() {
        Ok(path.display().to_string())
    } else {
        Ok(format!(
            "{} (does not exist; run `treeline config init` to create it)",
            path.display()
        ))
    }
}

/// The effective configuration as TOML, password masked.
fn cmd_config_show(config: &TreelineConfig) -> Result<String> {
    config.redacted().to_toml_string()
}

/// A configuration value by dotted key. The password is never printed.
fn cmd_config_get(config: &TreelineConfig, key: &str) -> Result<String> {
    let value =
        toml::Value::try_from(config.redacted()).map_err(|e| Error::config(e.to_string()))?;
    get_nested_value(&value, key)
        .map(format_toml_value)
        .ok_or_else(|| Error::config(format!("Key '{key}' not found in configuration")))
}

/// Write a default configuration file and return its path.
fn cmd_config_init(file: Option<&str>, force: bool) -> Result<PathBuf> {
    let path = match file {
        Some(p) => PathBuf::from(p),
        None => TreelineConfig::default_config_path()
            .ok_or_else(|| Error::config("Could not determine config directory"))?,
    };

    if path.exists() && !force {
        return Err(Error::config(format!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        )));
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::io_with_path(e, parent))?;
    }

    let toml_str = TreelineConfig::default().to_toml_string()?;
    std::fs::write(&path, toml_str).map_err(|e| Error::io_with_path(e, &path))?;

    Ok(path)
}

/// Configuration as `KEY=value` lines, or Docker `--env` flags.
fn cmd_config_export(config: &TreelineConfig, docker_env: bool) -> Result<Vec<String>> {
    let lines = config
        .to_env_vars()?
        .into_iter()
        .map(|(key, value)| {
            if docker_env {
                format!("--env {key}={value}")
            } else {
                format!("{key}={value}")
            }
        })
        .collect();
    Ok(lines)
}

// ============================================================================
// TOML dotted-key helpers
// ============================================================================

/// Navigate a dotted key path in a TOML value tree.
fn get_nested_value<'a>(value: &'a toml::Value, key: &str) -> Option<&'a toml::Value> {
    let mut current = value;
    for part in key.split('.') {
        current = current.as_table()?.get(part)?;
    }
    Some(current)
}

/// Format a TOML value for display on stdout.
fn format_toml_value(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Integer(i) => i.to_string(),
        toml::Value::Float(f) => f.to_string(),
        toml::Value::Boolean(b) => b.to_string(),
        toml::Value::Datetime(dt) => dt.to_string(),
        toml::Value::Array(_) | toml::Value::Table(_) => {
            toml::to_string_pretty(value).unwrap_or_else(|_| format!("{value:?}"))
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
