//! Turn speed limiting of the cruise ceiling.
//!
//! # State Machine
//!
//! ```text
//!                 enabled && mtsc on && ratio ok
//!   Unconstrained ------------------------------> Limiting
//!        ^  ^                                        |
//!        |  +-------- ratio exceeded / mtsc off -----+
//!        |                                           |
//!        +---- enabled ----- Disabled <-- !enabled --+
//! ```
//!
//! The state is recomputed from scratch each cycle; it carries no memory
//! beyond what is logged on transitions. Every branch yields a ceiling no
//! higher than the setpoint.

use serde::{Deserialize, Serialize};

use crate::collaborators::TurnSpeedEstimator;
use crate::config::MtscSettings;

use super::constants::{DEFAULT_RATIO_GUARD_SPEED, MIN_TARGET_V};

/// Limiter state for one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LimiterState {
    /// Planner not engaged.
    #[default]
    Disabled,
    /// Engaged, ceiling equals the setpoint.
    Unconstrained,
    /// Engaged, turn speed target reduces the ceiling.
    Limiting,
}

impl std::fmt::Display for LimiterState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LimiterState::Disabled => write!(f, "disabled"),
            LimiterState::Unconstrained => write!(f, "unconstrained"),
            LimiterState::Limiting => write!(f, "limiting"),
        }
    }
}

/// Output of one limiter step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LimiterOutput {
    pub state: LimiterState,
    /// Turn speed target (m/s). Equals the setpoint unless limiting.
    pub mtsc_target: f64,
    /// Enforced ceiling (m/s).
    pub v_cruise: f64,
}

impl LimiterOutput {
    fn passthrough(state: LimiterState, cruise_setpoint: f64) -> Self {
        Self {
            state,
            mtsc_target: cruise_setpoint,
            v_cruise: cruise_setpoint,
        }
    }
}

/// Derives the enforced cruise ceiling from the setpoint and turn speed target.
#[derive(Debug, Clone)]
pub struct SpeedLimiter {
    ratio_guard_speed: f64,
    last_state: LimiterState,
}

impl Default for SpeedLimiter {
    fn default() -> Self {
        Self::new()
    }
}

impl SpeedLimiter {
    pub fn new() -> Self {
        Self {
            ratio_guard_speed: DEFAULT_RATIO_GUARD_SPEED,
            last_state: LimiterState::Disabled,
        }
    }

    /// Override the speed at or below which the ratio check is skipped.
    pub fn with_ratio_guard_speed(mut self, speed: f64) -> Self {
        self.ratio_guard_speed = speed.max(0.0);
        self
    }

    pub fn ratio_guard_speed(&self) -> f64 {
        self.ratio_guard_speed
    }

    /// State produced by the most recent step.
    pub fn state(&self) -> LimiterState {
        self.last_state
    }

    /// Run one cycle.
    ///
    /// # Arguments
    ///
    /// * `enabled` - Whether the planner is engaged
    /// * `mtsc` - Turn speed settings, `None` when the feature is off
    /// * `estimator` - Turn speed candidate source; only queried when engaged
    ///   with the feature on
    /// * `cruise_setpoint` - Requested ceiling (m/s)
    /// * `v_ego`, `a_ego` - Current speed (m/s) and acceleration (m/s²)
    pub fn step(
        &mut self,
        enabled: bool,
        mtsc: Option<&MtscSettings>,
        estimator: &mut dyn TurnSpeedEstimator,
        cruise_setpoint: f64,
        v_ego: f64,
        a_ego: f64,
    ) -> LimiterOutput {
        let output = match (enabled, mtsc) {
            (false, _) => LimiterOutput::passthrough(LimiterState::Disabled, cruise_setpoint),
            (true, None) => LimiterOutput::passthrough(LimiterState::Unconstrained, cruise_setpoint),
            (true, Some(settings)) => {
                let candidate = estimator.target_speed(v_ego, a_ego);
                self.limit(settings, candidate, cruise_setpoint, v_ego)
            }
        };

        if output.state != self.last_state {
            tracing::debug!(
                from = %self.last_state,
                to = %output.state,
                mtsc_target = output.mtsc_target,
                v_cruise = output.v_cruise,
                v_ego = v_ego,
                "Speed limiter transition"
            );
            self.last_state = output.state;
        }

        output
    }

    fn limit(
        &self,
        settings: &MtscSettings,
        candidate: f64,
        cruise_setpoint: f64,
        v_ego: f64,
    ) -> LimiterOutput {
        if candidate.is_nan() {
            return LimiterOutput::passthrough(LimiterState::Unconstrained, cruise_setpoint);
        }

        let target = candidate
            .min(cruise_setpoint)
            .max(MIN_TARGET_V)
            .min(cruise_setpoint.max(0.0));

        if self.ratio_exceeded(target, v_ego, settings.limit_ratio) {
            return LimiterOutput::passthrough(LimiterState::Unconstrained, cruise_setpoint);
        }

        let state = if target < cruise_setpoint {
            LimiterState::Limiting
        } else {
            LimiterState::Unconstrained
        };

        LimiterOutput {
            state,
            mtsc_target: target,
            v_cruise: cruise_setpoint.min(target),
        }
    }

    fn ratio_exceeded(&self, target: f64, v_ego: f64, limit_ratio: f64) -> bool {
        if v_ego <= self.ratio_guard_speed || v_ego.is_nan() {
            return true;
        }
        target / v_ego > limit_ratio
    }
}
