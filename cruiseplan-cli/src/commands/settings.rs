//! Settings management CLI commands.
//!
//! Provides `settings get`, `settings set`, `settings list`, and
//! `settings path` for viewing and modifying the settings file the planner
//! resolves its configuration from.

use std::path::Path;

use clap::Subcommand;
use cruiseplan::settings::{IniSettingsStore, ParamKey, SettingsStore, ValueKind};

use super::common::{open_settings, settings_path};
use crate::error::CliError;

/// Settings subcommands.
#[derive(Debug, Subcommand)]
pub enum SettingsCommands {
    /// Get a settings value
    Get {
        /// Settings key (e.g., MTSCEnabled); case-insensitive
        key: String,
    },

    /// Set a settings value
    Set {
        /// Settings key (e.g., MTSCLimit); case-insensitive
        key: String,

        /// Value to set (booleans accept 0/1/true/false)
        value: String,
    },

    /// List all known settings
    List,

    /// Show the settings file path
    Path,
}

/// Run a settings subcommand.
pub fn run(command: SettingsCommands, path: Option<&Path>) -> Result<(), CliError> {
    match command {
        SettingsCommands::Get { key } => run_get(&open_settings(path)?, &key),
        SettingsCommands::Set { key, value } => run_set(&open_settings(path)?, &key, &value),
        SettingsCommands::List => run_list(&open_settings(path)?),
        SettingsCommands::Path => {
            println!("{}", settings_path(path).display());
            Ok(())
        }
    }
}

fn parse_key(key: &str) -> Result<ParamKey, CliError> {
    key.parse().map_err(|_| {
        CliError::Config(format!(
            "Unknown settings key '{}'. Use 'cruiseplan settings list' to see available keys.",
            key
        ))
    })
}

/// Validate `value` for `kind` and return the stored form.
fn normalize(kind: ValueKind, value: &str) -> Result<String, CliError> {
    let value = value.trim();
    let invalid = |expected: &str| {
        CliError::Config(format!("Invalid value '{}': expected {}", value, expected))
    };

    match kind {
        ValueKind::Bool => match value.to_ascii_lowercase().as_str() {
            "1" | "true" | "on" | "yes" => Ok("1".to_string()),
            "0" | "false" | "off" | "no" => Ok("0".to_string()),
            _ => Err(invalid("a boolean (0/1/true/false)")),
        },
        ValueKind::Int => value
            .parse::<i64>()
            .map(|v| v.to_string())
            .map_err(|_| invalid("an integer")),
        ValueKind::Float => match value.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v.to_string()),
            _ => Err(invalid("a finite number")),
        },
    }
}

fn run_get(store: &IniSettingsStore, key: &str) -> Result<(), CliError> {
    let key = parse_key(key)?;
    match store.get_raw(key.as_str()) {
        Some(value) if !value.is_empty() => println!("{}", value),
        _ => println!("(not set)"),
    }
    Ok(())
}

fn run_set(store: &IniSettingsStore, key: &str, value: &str) -> Result<(), CliError> {
    let key = parse_key(key)?;
    let stored = normalize(key.kind(), value)?;
    store.put_raw(key.as_str(), &stored)?;

    tracing::debug!(key = %key, value = %stored, path = %store.path().display(), "Setting written");
    println!("Set {} = {}", key, stored);
    Ok(())
}

fn run_list(store: &IniSettingsStore) -> Result<(), CliError> {
    println!("Settings ({})", store.path().display());
    println!();

    for key in ParamKey::ALL {
        match store.get_raw(key.as_str()) {
            Some(value) if !value.is_empty() => println!("  {} = {}", key, value),
            _ => println!("  {} = (not set)", key),
        }
    }

    let unknown: Vec<_> = store
        .entries()
        .into_iter()
        .filter(|(k, _)| k.parse::<ParamKey>().is_err())
        .collect();
    if !unknown.is_empty() {
        println!();
        println!("Unrecognised entries (ignored by the planner):");
        for (key, value) in unknown {
            println!("  {} = {}", key, value);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_normalize_bool() {
        assert_eq!(normalize(ValueKind::Bool, "true").unwrap(), "1");
        assert_eq!(normalize(ValueKind::Bool, " OFF ").unwrap(), "0");
        assert!(normalize(ValueKind::Bool, "maybe").is_err());
    }

    #[test]
    fn test_normalize_numbers() {
        assert_eq!(normalize(ValueKind::Int, "90").unwrap(), "90");
        assert!(normalize(ValueKind::Int, "9.5").is_err());
        assert_eq!(normalize(ValueKind::Float, "2.50").unwrap(), "2.5");
        assert!(normalize(ValueKind::Float, "NaN").is_err());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = parse_key("NotAKey").unwrap_err();
        assert!(err.to_string().contains("NotAKey"));
    }

    #[test]
    fn test_set_persists_normalized_value() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.ini");
        let store = IniSettingsStore::open(&path).unwrap();

        run_set(&store, "mtscenabled", "true").unwrap();
        run_set(&store, "MTSCLimit", "85").unwrap();

        let reopened = IniSettingsStore::open(&path).unwrap();
        assert!(reopened.get_bool(ParamKey::MtscEnabled));
        assert_eq!(reopened.get_int(ParamKey::MtscLimit), 85);
    }

    #[test]
    fn test_set_rejects_bad_value_without_writing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.ini");
        let store = IniSettingsStore::open(&path).unwrap();

        assert!(run_set(&store, "MTSCLimit", "fast").is_err());
        assert!(!path.exists());
    }
}
