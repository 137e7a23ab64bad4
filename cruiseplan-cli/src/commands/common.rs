//! Common helpers shared across CLI commands.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use cruiseplan::settings::{IniSettingsStore, MemoryStore, SettingsStore};

use crate::error::CliError;

/// Default settings file: `<config dir>/cruiseplan/settings.ini`.
pub fn default_settings_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cruiseplan")
        .join("settings.ini")
}

/// Resolve the settings path from the CLI override or the default.
pub fn settings_path(cli_path: Option<&Path>) -> PathBuf {
    cli_path
        .map(Path::to_path_buf)
        .unwrap_or_else(default_settings_path)
}

/// Open the settings file.
pub fn open_settings(cli_path: Option<&Path>) -> Result<IniSettingsStore, CliError> {
    Ok(IniSettingsStore::open(settings_path(cli_path))?)
}

/// Copy a settings file into memory so writes never reach disk.
pub fn snapshot(store: &IniSettingsStore) -> MemoryStore {
    MemoryStore::from_pairs(store.entries())
}

/// Open the runtime-memory store: an INI file when given, else in-memory.
pub fn open_memory(path: Option<&Path>) -> Result<Arc<dyn SettingsStore>, CliError> {
    Ok(match path {
        Some(path) => Arc::new(IniSettingsStore::open(path)?),
        None => Arc::new(MemoryStore::new()),
    })
}
