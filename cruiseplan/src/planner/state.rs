//! Per-cycle planner state.

use serde::{Deserialize, Serialize};

use crate::collaborators::AccelerationEnvelope;

use super::profile::{AccelLimits, AccelRegime};
use super::speed_limiter::LimiterState;

/// Snapshot of everything the planner decided in the last cycle.
///
/// Rewritten in full by each `Planner::update`; read-only between cycles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerState {
    /// Acceleration envelope for this cycle.
    pub accel_limits: AccelLimits,

    /// Rule that produced `accel_limits`.
    pub accel_regime: AccelRegime,

    /// Turn speed target (m/s). Equals the setpoint when disengaged or the
    /// feature is off.
    pub mtsc_target: f64,

    pub limiter_state: LimiterState,

    /// Trailing road curvature estimate, updated at the end of each cycle.
    pub road_curvature: f64,

    /// Requested setpoint this cycle (m/s).
    pub cruise_setpoint: f64,

    /// Enforced ceiling (m/s), never above `cruise_setpoint`.
    pub v_cruise: f64,

    /// Left adjacent lane width (m), `0` when not computed.
    pub lane_width_left: f64,

    /// Right adjacent lane width (m), `0` when not computed.
    pub lane_width_right: f64,

    /// Whether the planner was engaged this cycle.
    pub engaged: bool,

    /// Whether the conditional mode evaluator ran this cycle.
    pub conditional_evaluated: bool,
}

impl PlannerState {
    /// State before the first cycle.
    pub fn initial(envelope: &dyn AccelerationEnvelope) -> Self {
        Self {
            accel_limits: AccelLimits::stock(envelope, 0.0),
            accel_regime: AccelRegime::Stock,
            mtsc_target: 0.0,
            limiter_state: LimiterState::Disabled,
            road_curvature: 0.0,
            cruise_setpoint: 0.0,
            v_cruise: 0.0,
            lane_width_left: 0.0,
            lane_width_right: 0.0,
            engaged: false,
            conditional_evaluated: false,
        }
    }
}
