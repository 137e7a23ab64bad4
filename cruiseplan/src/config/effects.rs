//! External side effects of configuration resolution.
//!
//! Resolving the configuration is not a pure read: enabling some features
//! requires writes to shared stores or reconfiguring a collaborator. These
//! are returned as a list of [`ConfigEffect`] values so callers (and tests)
//! see them explicitly, and applied with [`Resolution::apply`].

use serde::Serialize;

use crate::settings::{ParamKey, SettingsError, SettingsStore};
use crate::units::UnitSystem;

use super::planner::PlannerConfig;

/// One side effect requested by the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum ConfigEffect {
    /// Forward the unit system to the conditional mode evaluator's own
    /// configuration.
    ConfigureConditionalMode { unit_system: UnitSystem },

    /// Write a boolean to the persistent settings store.
    PutParamBool { key: ParamKey, value: bool },

    /// Write a float to the runtime-memory store.
    PutMemoryFloat { key: ParamKey, value: f64 },
}

impl std::fmt::Display for ConfigEffect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigEffect::ConfigureConditionalMode { unit_system } => {
                write!(f, "configure conditional mode ({unit_system})")
            }
            ConfigEffect::PutParamBool { key, value } => {
                write!(f, "settings: {key} = {}", u8::from(*value))
            }
            ConfigEffect::PutMemoryFloat { key, value } => {
                write!(f, "memory: {key} = {value}")
            }
        }
    }
}

/// Result of resolving the settings store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution {
    pub config: PlannerConfig,
    pub effects: Vec<ConfigEffect>,
}

impl Resolution {
    /// Perform the store writes in `effects`.
    ///
    /// `ConfigureConditionalMode` is not a store write and is skipped here;
    /// the planner forwards it to its evaluator. All writes are attempted even
    /// if one fails; the first error is returned. No atomicity is provided
    /// across the two stores.
    ///
    /// # Errors
    ///
    /// Returns the first `SettingsError` raised by either store.
    pub fn apply(
        &self,
        params: &dyn SettingsStore,
        memory: &dyn SettingsStore,
    ) -> Result<(), SettingsError> {
        let mut first_error = None;

        for effect in &self.effects {
            let result = match *effect {
                ConfigEffect::ConfigureConditionalMode { .. } => Ok(()),
                ConfigEffect::PutParamBool { key, value } => params.put_bool(key, value),
                ConfigEffect::PutMemoryFloat { key, value } => memory.put_float(key, value),
            };

            match result {
                Ok(()) => tracing::debug!(effect = %effect, "Applied config effect"),
                Err(e) => {
                    tracing::warn!(effect = %effect, error = %e, "Failed to apply config effect");
                    first_error.get_or_insert(e);
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Unit system to forward to the conditional mode evaluator, if requested.
    pub fn conditional_mode_units(&self) -> Option<UnitSystem> {
        self.effects.iter().find_map(|effect| match effect {
            ConfigEffect::ConfigureConditionalMode { unit_system } => Some(*unit_system),
            _ => None,
        })
    }
}
