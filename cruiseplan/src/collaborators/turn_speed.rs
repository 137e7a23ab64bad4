//! Curvature-based turn speed estimation.

use std::sync::Arc;

use crate::settings::{ParamKey, SettingsStore};

/// Curvatures below this are treated as straight road (1/m).
const MIN_CURVATURE: f64 = 1e-5;

/// Suggests a speed for upcoming curves.
pub trait TurnSpeedEstimator {
    /// Candidate target speed (m/s). `f64::INFINITY` means no limit.
    fn target_speed(&mut self, v_ego: f64, a_ego: f64) -> f64;
}

/// Turn speed from the upcoming map curvature and a lateral acceleration target.
///
/// Both inputs are read from the runtime-memory store each call:
/// `MapCurvature` is published by the map daemon and `MapTargetLatA` by
/// configuration resolution.
///
/// ```text
/// v = sqrt(lat_accel / curvature)
/// ```
pub struct MapCurvatureTurnSpeed {
    memory: Arc<dyn SettingsStore>,
}

impl MapCurvatureTurnSpeed {
    pub fn new(memory: Arc<dyn SettingsStore>) -> Self {
        Self { memory }
    }
}

impl std::fmt::Debug for MapCurvatureTurnSpeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapCurvatureTurnSpeed").finish_non_exhaustive()
    }
}

impl TurnSpeedEstimator for MapCurvatureTurnSpeed {
    fn target_speed(&mut self, _v_ego: f64, _a_ego: f64) -> f64 {
        let curvature = self.memory.get_float(ParamKey::MapCurvature).abs();
        let lat_accel = self.memory.get_float(ParamKey::MapTargetLatA);

        if curvature < MIN_CURVATURE || lat_accel <= 0.0 {
            return f64::INFINITY;
        }
        (lat_accel / curvature).sqrt()
    }
}
