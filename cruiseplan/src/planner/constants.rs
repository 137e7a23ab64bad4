//! Planner tuning constants.

use crate::units::MPH_TO_MS;

/// Lowest turn speed target the limiter will command (m/s).
pub const MIN_TARGET_V: f64 = 5.0;

/// Margin by which the setpoint must exceed the trailing turn speed target
/// before the stock acceleration envelope takes over (m/s).
pub const MTSC_DEFERRAL_MARGIN: f64 = 1.0;

/// Ego speeds at or below this skip the `target / v_ego` ratio and count as
/// exceeding the limit ratio (m/s).
pub const DEFAULT_RATIO_GUARD_SPEED: f64 = 0.1;

/// Minimum speed for lane width estimation (20 mph in m/s).
pub const LANE_CHANGE_SPEED_MIN: f64 = 20.0 * MPH_TO_MS;
