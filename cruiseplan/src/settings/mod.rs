//! Key-value settings storage.
//!
//! The planner is configured from a flat string-keyed store shared with the
//! rest of the stack. Two stores exist side by side:
//!
//! - **Settings**: persisted user settings (`IniSettingsStore` on disk,
//!   `MemoryStore` in tests)
//! - **Runtime memory**: volatile values exchanged between components while
//!   running (`MemoryStore`)
//!
//! Both implement [`SettingsStore`]. Keys are enumerated by [`ParamKey`].

mod error;
mod ini_file;
mod keys;
mod memory;
mod store;

pub use error::SettingsError;
pub use ini_file::IniSettingsStore;
pub use keys::{ParamKey, ValueKind};
pub use memory::MemoryStore;
pub use store::SettingsStore;
