//! INI-file-backed settings store.
//!
//! Keys live in the general (unnamed) section, one `Key=value` per line:
//!
//! ```ini
//! IsMetric=1
//! MTSCEnabled=1
//! MTSCLimit=90
//! MTSCAggressiveness=100
//! ```
//!
//! Every write is persisted immediately. Writes are not atomic with respect
//! to other readers of the file.

use std::path::{Path, PathBuf};

use ini::Ini;
use parking_lot::RwLock;

use super::error::SettingsError;
use super::store::SettingsStore;

/// Settings store persisted to an INI file.
pub struct IniSettingsStore {
    path: PathBuf,
    ini: RwLock<Ini>,
}

impl std::fmt::Debug for IniSettingsStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IniSettingsStore")
            .field("path", &self.path)
            .field("entries", &self.ini.read().general_section().len())
            .finish()
    }
}

impl IniSettingsStore {
    /// Load settings from `path`.
    ///
    /// A missing file is treated as an empty store; it is created on the
    /// first write.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if the file exists but cannot be read or parsed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SettingsError> {
        let path = path.into();
        let ini = if path.exists() {
            Ini::load_from_file(&path)?
        } else {
            tracing::debug!(path = %path.display(), "Settings file not found, starting empty");
            Ini::new()
        };
        Ok(Self {
            path,
            ini: RwLock::new(ini),
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sorted snapshot of all entries in the general section.
    pub fn entries(&self) -> Vec<(String, String)> {
        let ini = self.ini.read();
        let mut entries: Vec<_> = ini
            .general_section()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        entries.sort();
        entries
    }

    fn save(&self, ini: &Ini) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        ini.write_to_file(&self.path)?;
        Ok(())
    }
}

impl SettingsStore for IniSettingsStore {
    fn get_raw(&self, key: &str) -> Option<String> {
        self.ini
            .read()
            .general_section()
            .get(key)
            .map(str::to_string)
    }

    fn put_raw(&self, key: &str, value: &str) -> Result<(), SettingsError> {
        let mut ini = self.ini.write();
        ini.with_general_section().set(key, value);
        self.save(&ini)
    }
}
