//! Settings store error types.

use thiserror::Error;

/// Errors that can occur while reading or writing a settings store.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// I/O error while loading or saving a backing file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing INI file could not be parsed.
    #[error("Failed to parse settings file: {0}")]
    Parse(String),

    /// Unknown key name.
    #[error("Unknown settings key '{0}'")]
    UnknownKey(String),

    /// The store does not accept writes.
    #[error("Settings store is read-only")]
    ReadOnly,
}

impl From<ini::Error> for SettingsError {
    fn from(e: ini::Error) -> Self {
        match e {
            ini::Error::Io(io) => SettingsError::Io(io),
            ini::Error::Parse(parse) => SettingsError::Parse(parse.to_string()),
        }
    }
}
