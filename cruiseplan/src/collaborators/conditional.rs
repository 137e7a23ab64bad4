//! Conditional experimental mode evaluator seam.

use crate::settings::SettingsStore;
use crate::signals::{ModelOutput, NavigationSignal, RadarState};
use crate::units::UnitSystem;

/// Signals passed to the evaluator on each invocation.
#[derive(Debug, Clone, Copy)]
pub struct ConditionalSignals<'a> {
    pub navigation: &'a NavigationSignal,
    pub model: &'a ModelOutput,
    pub radar: &'a RadarState,
    /// Trailing road curvature from the previous cycle.
    pub road_curvature: f64,
    pub standstill: bool,
    pub v_ego: f64,
}

/// Decides when to switch the downstream controller into experimental mode.
///
/// The evaluator owns its trigger state. Between invocations its outputs
/// hold their last values.
pub trait ConditionalModeEvaluator {
    /// Advance the evaluator by one cycle.
    fn update(&mut self, signals: &ConditionalSignals<'_>);

    /// Whether experimental mode is currently requested.
    fn experimental_mode_active(&self) -> bool;

    /// Whether a red light is currently detected.
    fn red_light_detected(&self) -> bool;

    /// Re-read the evaluator's own settings.
    fn update_config(&mut self, unit_system: UnitSystem, settings: &dyn SettingsStore);
}

/// Evaluator that never triggers.
///
/// Used where no trigger logic is wired in. It counts invocations so callers
/// can observe gating.
#[derive(Debug, Default, Clone)]
pub struct PassiveConditionalMode {
    invocations: u64,
    unit_system: Option<UnitSystem>,
}

impl PassiveConditionalMode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `update` calls received.
    pub fn invocations(&self) -> u64 {
        self.invocations
    }

    /// Unit system last received through `update_config`.
    pub fn unit_system(&self) -> Option<UnitSystem> {
        self.unit_system
    }
}

impl ConditionalModeEvaluator for PassiveConditionalMode {
    fn update(&mut self, _signals: &ConditionalSignals<'_>) {
        self.invocations += 1;
    }

    fn experimental_mode_active(&self) -> bool {
        false
    }

    fn red_light_detected(&self) -> bool {
        false
    }

    fn update_config(&mut self, unit_system: UnitSystem, _settings: &dyn SettingsStore) {
        self.unit_system = Some(unit_system);
    }
}
