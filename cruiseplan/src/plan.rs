//! Outbound plan message.

use serde::{Deserialize, Serialize};

/// Freshness of the upstream sources the plan depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceChecks {
    /// Car state received and valid this cycle.
    pub car_state: bool,
    /// Controls state received and valid this cycle.
    pub controls_state: bool,
}

impl SourceChecks {
    /// Both sources fresh.
    pub const ALL_FRESH: SourceChecks = SourceChecks {
        car_state: true,
        controls_state: true,
    };

    pub fn all_valid(&self) -> bool {
        self.car_state && self.controls_state
    }
}

/// Plan published once per cycle for the motion controller.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlanMessage {
    /// Set only when every required upstream source was fresh.
    pub valid: bool,
    /// Turn-speed-adjusted cruise speed in display units (km/h or mph).
    pub adjusted_cruise: f64,
    /// Conditional experimental mode is requesting experimental mode.
    pub conditional_experimental: bool,
    /// `safe_obstacle_distance - stopped_equivalence_factor` (m).
    pub desired_follow_distance: f64,
    pub safe_obstacle_distance: f64,
    pub safe_obstacle_distance_stock: f64,
    pub stopped_equivalence_factor: f64,
    /// Left adjacent lane width (m), `0` when not computed.
    pub lane_width_left: f64,
    /// Right adjacent lane width (m), `0` when not computed.
    pub lane_width_right: f64,
    pub red_light: bool,
}
