//! The settings store trait.
//!
//! A settings store is a flat string-keyed map of raw values, shared with
//! other processes. Typed accessors parse on read; a missing or unparsable
//! value reads as the type's zero value, matching how the store is used
//! across the stack (an unset toggle is off).

use super::error::SettingsError;
use super::keys::ParamKey;

/// Flat key-value settings storage.
///
/// Implementations use interior locking so a store can be shared through
/// `Arc<dyn SettingsStore>` between the planner, the turn speed estimator
/// and outside writers.
pub trait SettingsStore: Send + Sync {
    /// Raw value for a key, or `None` if unset.
    fn get_raw(&self, key: &str) -> Option<String>;

    /// Store a raw value.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if the backing storage rejects the write.
    fn put_raw(&self, key: &str, value: &str) -> Result<(), SettingsError>;

    /// Read a boolean. Accepts `1`/`0` and `true`/`false`.
    fn get_bool(&self, key: ParamKey) -> bool {
        match self.get_raw(key.as_str()) {
            None => false,
            Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" => true,
                "0" | "false" | "" => false,
                other => {
                    tracing::warn!(key = %key, value = other, "Unparsable boolean setting");
                    false
                }
            },
        }
    }

    /// Read an integer. Float text is truncated toward zero.
    fn get_int(&self, key: ParamKey) -> i64 {
        let Some(raw) = self.get_raw(key.as_str()) else {
            return 0;
        };
        let trimmed = raw.trim();
        if let Ok(value) = trimmed.parse::<i64>() {
            return value;
        }
        match trimmed.parse::<f64>() {
            Ok(value) if value.is_finite() => value as i64,
            _ => {
                tracing::warn!(key = %key, value = trimmed, "Unparsable integer setting");
                0
            }
        }
    }

    /// Read a float.
    fn get_float(&self, key: ParamKey) -> f64 {
        let Some(raw) = self.get_raw(key.as_str()) else {
            return 0.0;
        };
        match raw.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => value,
            _ => {
                tracing::warn!(key = %key, value = raw.trim(), "Unparsable float setting");
                0.0
            }
        }
    }

    /// Write a boolean as `1`/`0`.
    fn put_bool(&self, key: ParamKey, value: bool) -> Result<(), SettingsError> {
        self.put_raw(key.as_str(), if value { "1" } else { "0" })
    }

    /// Write a float.
    fn put_float(&self, key: ParamKey, value: f64) -> Result<(), SettingsError> {
        self.put_raw(key.as_str(), &value.to_string())
    }
}
