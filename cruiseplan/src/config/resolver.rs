//! Settings store → `PlannerConfig` resolution.
//!
//! Resolution runs in two steps:
//!
//! 1. [`RawSettings::read`] reads every key in [`ParamKey::RESOLVED`]
//!    exactly once, typed but uninterpreted.
//! 2. [`ConfigResolver::derive`] applies master-toggle gating and unit
//!    conversion and lists the external effects. This step is pure.
//!
//! Resolution is re-run on demand when the settings store changes, never
//! per cycle.

use crate::settings::{ParamKey, SettingsStore};
use crate::units::UnitSystem;

use super::effects::{ConfigEffect, Resolution};
use super::planner::{AccelerationProfile, MtscSettings, PersonalityTuning, PlannerConfig};

/// Lateral acceleration at 100% MTSC aggressiveness (m/s²).
pub const MTSC_BASE_LAT_ACCEL: f64 = 2.0;

/// One typed read of every recognised settings key.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawSettings {
    pub is_metric: bool,
    pub conditional_experimental: bool,
    pub custom_personalities: bool,
    pub aggressive_follow: f64,
    pub standard_follow: f64,
    pub relaxed_follow: f64,
    pub aggressive_jerk: f64,
    pub standard_jerk: f64,
    pub relaxed_jerk: f64,
    pub custom_ui: bool,
    pub adjacent_path: bool,
    pub blind_spot_path: bool,
    pub longitudinal_tune: bool,
    pub acceleration_profile: i64,
    pub aggressive_acceleration: bool,
    pub stopping_distance: i64,
    pub mtsc_enabled: bool,
    /// Percentage.
    pub mtsc_limit: f64,
    /// Percentage.
    pub mtsc_aggressiveness: i64,
}

impl RawSettings {
    /// Read all resolved keys from `store`, once each.
    pub fn read(store: &dyn SettingsStore) -> Self {
        Self {
            is_metric: store.get_bool(ParamKey::IsMetric),
            conditional_experimental: store.get_bool(ParamKey::ConditionalExperimental),
            custom_personalities: store.get_bool(ParamKey::CustomPersonalities),
            aggressive_follow: store.get_float(ParamKey::AggressiveFollow),
            standard_follow: store.get_float(ParamKey::StandardFollow),
            relaxed_follow: store.get_float(ParamKey::RelaxedFollow),
            aggressive_jerk: store.get_float(ParamKey::AggressiveJerk),
            standard_jerk: store.get_float(ParamKey::StandardJerk),
            relaxed_jerk: store.get_float(ParamKey::RelaxedJerk),
            custom_ui: store.get_bool(ParamKey::CustomUi),
            adjacent_path: store.get_bool(ParamKey::AdjacentPath),
            blind_spot_path: store.get_bool(ParamKey::BlindSpotPath),
            longitudinal_tune: store.get_bool(ParamKey::LongitudinalTune),
            acceleration_profile: store.get_int(ParamKey::AccelerationProfile),
            aggressive_acceleration: store.get_bool(ParamKey::AggressiveAcceleration),
            stopping_distance: store.get_int(ParamKey::StoppingDistance),
            mtsc_enabled: store.get_bool(ParamKey::MtscEnabled),
            mtsc_limit: store.get_float(ParamKey::MtscLimit),
            mtsc_aggressiveness: store.get_int(ParamKey::MtscAggressiveness),
        }
    }
}

/// Builds `PlannerConfig` snapshots from a settings store.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConfigResolver;

impl ConfigResolver {
    pub fn new() -> Self {
        Self
    }

    /// Read `store` and derive the configuration and its effects.
    pub fn resolve(&self, store: &dyn SettingsStore) -> Resolution {
        let raw = RawSettings::read(store);
        let resolution = Self::derive(&raw);

        tracing::debug!(
            units = %resolution.config.unit_system,
            profile = %resolution.config.acceleration_profile,
            mtsc = resolution.config.mtsc_enabled(),
            conditional = resolution.config.conditional_experimental,
            effects = resolution.effects.len(),
            "Resolved planner config"
        );

        resolution
    }

    /// Derive configuration and effects from a raw snapshot.
    pub fn derive(raw: &RawSettings) -> Resolution {
        let unit_system = UnitSystem::from_is_metric(raw.is_metric);
        let mut effects = Vec::new();

        if raw.conditional_experimental {
            effects.push(ConfigEffect::ConfigureConditionalMode { unit_system });
            effects.push(ConfigEffect::PutParamBool {
                key: ParamKey::ExperimentalMode,
                value: true,
            });
        }

        let personality = PersonalityTuning {
            custom_personalities: raw.custom_personalities,
            aggressive_follow: raw.aggressive_follow,
            standard_follow: raw.standard_follow,
            relaxed_follow: raw.relaxed_follow,
            aggressive_jerk: raw.aggressive_jerk,
            standard_jerk: raw.standard_jerk,
            relaxed_jerk: raw.relaxed_jerk,
        };

        let tune = raw.longitudinal_tune;
        let acceleration_profile = if tune {
            AccelerationProfile::from_selector(raw.acceleration_profile)
        } else {
            AccelerationProfile::Standard
        };
        let increased_stopping_distance = if tune {
            raw.stopping_distance as f64 * unit_system.distance_to_meters()
        } else {
            0.0
        };

        let mtsc = raw.mtsc_enabled.then(|| {
            let settings = MtscSettings {
                limit_ratio: raw.mtsc_limit / 100.0,
                target_lat_accel: MTSC_BASE_LAT_ACCEL * (raw.mtsc_aggressiveness as f64 / 100.0),
            };
            effects.push(ConfigEffect::PutMemoryFloat {
                key: ParamKey::MapTargetLatA,
                value: settings.target_lat_accel,
            });
            settings
        });

        let config = PlannerConfig {
            unit_system,
            conditional_experimental: raw.conditional_experimental,
            personality,
            adjacent_lanes: raw.adjacent_path && raw.custom_ui,
            blind_spot_path: raw.blind_spot_path && raw.custom_ui,
            longitudinal_tune: tune,
            acceleration_profile,
            aggressive_acceleration: raw.aggressive_acceleration && tune,
            increased_stopping_distance,
            mtsc,
        };

        Resolution { config, effects }
    }
}
