//! Typed planner configuration.
//!
//! `PlannerConfig` is the immutable snapshot every cycle reads. It is built
//! by [`ConfigResolver`](super::ConfigResolver) and never consulted through
//! string keys in the hot path.

use serde::{Deserialize, Serialize};

use crate::units::UnitSystem;

/// Acceleration profile selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccelerationProfile {
    /// Stock envelope.
    #[default]
    Standard,
    /// Gentle envelope.
    Eco,
    /// Brisk envelope.
    Sport,
    /// Second sport selection; uses the same envelope as `Sport`.
    SportPlus,
}

impl AccelerationProfile {
    /// Map the stored integer selector. Unknown values fall back to `Standard`.
    pub fn from_selector(value: i64) -> Self {
        match value {
            1 => AccelerationProfile::Eco,
            2 => AccelerationProfile::Sport,
            3 => AccelerationProfile::SportPlus,
            _ => AccelerationProfile::Standard,
        }
    }

    pub fn is_sport(&self) -> bool {
        matches!(self, AccelerationProfile::Sport | AccelerationProfile::SportPlus)
    }
}

impl std::fmt::Display for AccelerationProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccelerationProfile::Standard => write!(f, "standard"),
            AccelerationProfile::Eco => write!(f, "eco"),
            AccelerationProfile::Sport => write!(f, "sport"),
            AccelerationProfile::SportPlus => write!(f, "sport+"),
        }
    }
}

/// Following-distance and jerk tuning per driving personality.
///
/// Carried for the longitudinal MPC; the planner core does not interpret it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PersonalityTuning {
    /// Whether the custom values below replace the stock personalities.
    pub custom_personalities: bool,
    /// Follow time gap for the aggressive personality (s).
    pub aggressive_follow: f64,
    /// Follow time gap for the standard personality (s).
    pub standard_follow: f64,
    /// Follow time gap for the relaxed personality (s).
    pub relaxed_follow: f64,
    pub aggressive_jerk: f64,
    pub standard_jerk: f64,
    pub relaxed_jerk: f64,
}

/// Map turn speed controller settings, present only when the feature is on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MtscSettings {
    /// Maximum accepted `target / v_ego` ratio. Larger ratios are treated as
    /// a bad limitation and ignored.
    pub limit_ratio: f64,
    /// Lateral acceleration the turn speed estimator aims for (m/s²).
    pub target_lat_accel: f64,
}

/// Resolved planner configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlannerConfig {
    pub unit_system: UnitSystem,

    /// Conditional experimental mode feature.
    pub conditional_experimental: bool,

    pub personality: PersonalityTuning,

    /// Adjacent lane display. Requires the custom UI master toggle.
    pub adjacent_lanes: bool,

    /// Blind spot path display. Requires the custom UI master toggle.
    pub blind_spot_path: bool,

    /// Longitudinal tune master toggle.
    pub longitudinal_tune: bool,

    /// Acceleration profile. `Standard` unless the longitudinal tune is on.
    pub acceleration_profile: AccelerationProfile,

    /// Aggressive acceleration behind a lead. Requires the longitudinal tune.
    pub aggressive_acceleration: bool,

    /// Extra stopping distance (m). Zero unless the longitudinal tune is on.
    pub increased_stopping_distance: f64,

    /// Map turn speed controller, `None` when disabled.
    pub mtsc: Option<MtscSettings>,
}

impl PlannerConfig {
    pub fn is_metric(&self) -> bool {
        self.unit_system.is_metric()
    }

    /// Whether lane widths are wanted by any display feature.
    pub fn wants_lane_widths(&self) -> bool {
        self.adjacent_lanes || self.blind_spot_path
    }

    pub fn mtsc_enabled(&self) -> bool {
        self.mtsc.is_some()
    }
}
