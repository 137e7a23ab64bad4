//! Road curvature from the model's predicted plan.

use crate::signals::ModelOutput;

/// Predicted velocities below this are ignored (m/s).
const MIN_PREDICTED_SPEED: f64 = 1.0;

/// Estimates current road curvature.
pub trait RoadCurvatureEstimator {
    /// Non-negative curvature estimate.
    fn curvature(&self, model: &ModelOutput, v_ego: f64) -> f64;
}

/// Curvature from predicted lateral acceleration over predicted speed squared,
/// scaled to the current speed.
///
/// ```text
/// curvature = max_i(|a_y[i]| / v_x[i]²) · v_ego²
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct PredictedLateralCurvature;

impl RoadCurvatureEstimator for PredictedLateralCurvature {
    fn curvature(&self, model: &ModelOutput, v_ego: f64) -> f64 {
        let peak = model
            .velocity_x
            .iter()
            .zip(&model.acceleration_y)
            .filter(|(v, _)| v.abs() >= MIN_PREDICTED_SPEED)
            .map(|(v, a)| a.abs() / (v * v))
            .filter(|ratio| ratio.is_finite())
            .fold(0.0_f64, f64::max);

        let curvature = peak * v_ego * v_ego;
        if curvature.is_finite() {
            curvature
        } else {
            0.0
        }
    }
}
