//! Gate for the conditional experimental mode evaluator.

use crate::collaborators::{ConditionalModeEvaluator, ConditionalSignals};

/// Calls the evaluator only when the feature is on and the planner is engaged.
///
/// When the gate is closed the evaluator is not touched, so its last outputs
/// carry over unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConditionalModeGate;

impl ConditionalModeGate {
    pub fn is_open(feature_enabled: bool, engaged: bool) -> bool {
        feature_enabled && engaged
    }

    /// Invoke the evaluator if the gate is open. Returns whether it ran.
    pub fn run(
        evaluator: &mut dyn ConditionalModeEvaluator,
        feature_enabled: bool,
        engaged: bool,
        signals: &ConditionalSignals<'_>,
    ) -> bool {
        if !Self::is_open(feature_enabled, engaged) {
            return false;
        }
        evaluator.update(signals);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::PassiveConditionalMode;
    use crate::signals::{ModelOutput, NavigationSignal, RadarState};

    fn with_signals<F: FnOnce(&ConditionalSignals<'_>)>(f: F) {
        let navigation = NavigationSignal::default();
        let model = ModelOutput::default();
        let radar = RadarState::default();
        let signals = ConditionalSignals {
            navigation: &navigation,
            model: &model,
            radar: &radar,
            road_curvature: 0.0,
            standstill: false,
            v_ego: 20.0,
        };
        f(&signals);
    }

    #[test]
    fn test_gate_truth_table() {
        assert!(ConditionalModeGate::is_open(true, true));
        assert!(!ConditionalModeGate::is_open(true, false));
        assert!(!ConditionalModeGate::is_open(false, true));
        assert!(!ConditionalModeGate::is_open(false, false));
    }

    #[test]
    fn test_runs_only_when_open() {
        with_signals(|signals| {
            let mut evaluator = PassiveConditionalMode::new();

            assert!(!ConditionalModeGate::run(&mut evaluator, false, true, signals));
            assert!(!ConditionalModeGate::run(&mut evaluator, true, false, signals));
            assert_eq!(evaluator.invocations(), 0);

            assert!(ConditionalModeGate::run(&mut evaluator, true, true, signals));
            assert_eq!(evaluator.invocations(), 1);
        });
    }
}
