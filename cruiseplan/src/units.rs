//! Unit system selection and speed/distance conversion factors.

use serde::{Deserialize, Serialize};

/// km/h to m/s.
pub const KPH_TO_MS: f64 = 1.0 / 3.6;

/// m/s to km/h.
pub const MS_TO_KPH: f64 = 3.6;

/// mph to m/s.
pub const MPH_TO_MS: f64 = 1.609344 / 3.6;

/// m/s to mph.
pub const MS_TO_MPH: f64 = 3.6 / 1.609344;

/// Feet to metres.
pub const FOOT_TO_METER: f64 = 0.3048;

/// Unit system used for user-facing values (cluster speed, stopping offsets).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    /// Kilometres per hour, metres.
    #[default]
    Metric,
    /// Miles per hour, feet.
    Imperial,
}

impl UnitSystem {
    /// Resolve from the `IsMetric` flag.
    pub fn from_is_metric(is_metric: bool) -> Self {
        if is_metric {
            UnitSystem::Metric
        } else {
            UnitSystem::Imperial
        }
    }

    pub fn is_metric(&self) -> bool {
        matches!(self, UnitSystem::Metric)
    }

    /// Factor converting m/s into this system's display speed unit.
    pub fn speed_from_ms(&self) -> f64 {
        match self {
            UnitSystem::Metric => MS_TO_KPH,
            UnitSystem::Imperial => MS_TO_MPH,
        }
    }

    /// Factor converting this system's short distance unit into metres.
    pub fn distance_to_meters(&self) -> f64 {
        match self {
            UnitSystem::Metric => 1.0,
            UnitSystem::Imperial => FOOT_TO_METER,
        }
    }
}

impl std::fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnitSystem::Metric => write!(f, "metric"),
            UnitSystem::Imperial => write!(f, "imperial"),
        }
    }
}
