//! External collaborators of the planner core.
//!
//! The planner orchestrates these through traits and never looks at their
//! internals. Each trait has a reference implementation so the core can run
//! end to end:
//!
//! | Trait | Reference implementation |
//! |-------|--------------------------|
//! | [`AccelerationEnvelope`] | [`TabulatedEnvelope`] |
//! | [`TurnSpeedEstimator`] | [`MapCurvatureTurnSpeed`] |
//! | [`ConditionalModeEvaluator`] | [`PassiveConditionalMode`] |
//! | [`LaneGeometry`] | [`NearestBoundaryWidth`] |
//! | [`RoadCurvatureEstimator`] | [`PredictedLateralCurvature`] |

mod conditional;
mod envelope;
mod lane_width;
mod road_curvature;
mod turn_speed;

pub use conditional::{ConditionalModeEvaluator, ConditionalSignals, PassiveConditionalMode};
pub use envelope::{AccelerationEnvelope, EnvelopeTable, TabulatedEnvelope, A_CRUISE_MIN};
pub use lane_width::{LaneGeometry, NearestBoundaryWidth};
pub use road_curvature::{PredictedLateralCurvature, RoadCurvatureEstimator};
pub use turn_speed::{MapCurvatureTurnSpeed, TurnSpeedEstimator};

/// Piecewise-linear interpolation of `x` over ascending breakpoints `xp`.
///
/// Values outside the table clamp to the end values. Empty tables yield `0.0`,
/// NaN yields the first value.
pub fn interp(x: f64, xp: &[f64], fp: &[f64]) -> f64 {
    let n = xp.len().min(fp.len());
    if n == 0 {
        return 0.0;
    }
    if x.is_nan() || x <= xp[0] {
        return fp[0];
    }
    if x >= xp[n - 1] {
        return fp[n - 1];
    }

    let upper = xp[..n].partition_point(|&bp| bp <= x).clamp(1, n - 1);
    let (x0, x1) = (xp[upper - 1], xp[upper]);
    let (y0, y1) = (fp[upper - 1], fp[upper]);
    if x1 == x0 {
        return y0;
    }
    y0 + (x - x0) * (y1 - y0) / (x1 - x0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interp_clamps() {
        let xp = [0.0, 10.0];
        let fp = [1.0, 2.0];
        assert_eq!(interp(-5.0, &xp, &fp), 1.0);
        assert_eq!(interp(15.0, &xp, &fp), 2.0);
    }

    #[test]
    fn test_interp_midpoint() {
        assert_eq!(interp(5.0, &[0.0, 10.0], &[1.0, 2.0]), 1.5);
        assert_eq!(interp(15.0, &[0.0, 10.0, 20.0], &[0.0, 1.0, 3.0]), 2.0);
    }

    #[test]
    fn test_interp_exact_breakpoint() {
        assert_eq!(interp(10.0, &[0.0, 10.0, 20.0], &[0.0, 1.0, 3.0]), 1.0);
    }

    #[test]
    fn test_interp_degenerate() {
        assert_eq!(interp(1.0, &[], &[]), 0.0);
        assert_eq!(interp(1.0, &[2.0], &[7.0]), 7.0);
    }
}
