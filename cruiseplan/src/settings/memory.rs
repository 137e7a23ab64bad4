//! In-memory settings store.
//!
//! Used as the runtime-memory store (values that do not survive a restart)
//! and as the settings store in tests.

use std::collections::HashMap;

use parking_lot::RwLock;

use super::error::SettingsError;
use super::store::SettingsStore;

/// Volatile settings store backed by a `HashMap`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with raw values.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        let values = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            values: RwLock::new(values),
        }
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.values.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.read().is_empty()
    }

    /// Sorted snapshot of all entries.
    pub fn entries(&self) -> Vec<(String, String)> {
        let mut entries: Vec<_> = self
            .values
            .read()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        entries.sort();
        entries
    }
}

impl SettingsStore for MemoryStore {
    fn get_raw(&self, key: &str) -> Option<String> {
        self.values.read().get(key).cloned()
    }

    fn put_raw(&self, key: &str, value: &str) -> Result<(), SettingsError> {
        self.values
            .write()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
