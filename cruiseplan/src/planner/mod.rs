//! Per-cycle planning decisions.
//!
//! The [`Planner`] runs once per control tick and combines its components in
//! a fixed order:
//!
//! ```text
//! PlannerConfig (cached, passed in)
//!      │
//!      ▼
//! ProfileSelector ──► ConditionalModeGate ──► SpeedLimiter ──► LaneGeometryEstimator
//!                                                                      │
//!                                       road curvature update ◄────────┘
//!                                                │
//!                                                ▼
//!                                        PlannerState ──► PlanMessage
//! ```
//!
//! # Module Structure
//!
//! ```text
//! planner/
//! ├── mod.rs               # This file - Planner orchestration
//! ├── constants.rs         # Tuning constants
//! ├── profile.rs           # Acceleration envelope selection
//! ├── conditional_gate.rs  # Conditional mode evaluator gating
//! ├── speed_limiter.rs     # Turn speed ceiling state machine
//! ├── lane_geometry.rs     # Adjacent lane widths
//! └── state.rs             # PlannerState
//! ```
//!
//! # Example
//!
//! ```ignore
//! let mut planner = Planner::new(Collaborators::reference(memory.clone()));
//! let config = planner.reconfigure(&*params, &*memory)?.config;
//!
//! // Each tick
//! planner.update(&config, &inputs);
//! let plan = planner.publish(&config, &mpc, checks);
//! ```

mod conditional_gate;
mod constants;
mod lane_geometry;
mod profile;
mod speed_limiter;
mod state;

use std::sync::Arc;

pub use conditional_gate::ConditionalModeGate;
pub use constants::{
    DEFAULT_RATIO_GUARD_SPEED, LANE_CHANGE_SPEED_MIN, MIN_TARGET_V, MTSC_DEFERRAL_MARGIN,
};
pub use lane_geometry::{LaneGeometryEstimator, LaneWidths};
pub use profile::{AccelLimits, AccelRegime, ProfileSelector};
pub use speed_limiter::{LimiterOutput, LimiterState, SpeedLimiter};
pub use state::PlannerState;

use crate::collaborators::{
    AccelerationEnvelope, ConditionalModeEvaluator, ConditionalSignals, LaneGeometry,
    MapCurvatureTurnSpeed, NearestBoundaryWidth, PassiveConditionalMode,
    PredictedLateralCurvature, RoadCurvatureEstimator, TabulatedEnvelope, TurnSpeedEstimator,
};
use crate::config::{ConfigResolver, PlannerConfig, Resolution};
use crate::plan::{PlanMessage, SourceChecks};
use crate::settings::{SettingsError, SettingsStore};
use crate::signals::{CycleInputs, MpcOutputs};

/// The external collaborators a planner drives.
pub struct Collaborators {
    pub envelope: Box<dyn AccelerationEnvelope>,
    pub turn_speed: Box<dyn TurnSpeedEstimator>,
    pub conditional: Box<dyn ConditionalModeEvaluator>,
    pub lane_geometry: Box<dyn LaneGeometry>,
    pub road_curvature: Box<dyn RoadCurvatureEstimator>,
}

impl Collaborators {
    /// Reference implementations, with turn speed read from `memory`.
    pub fn reference(memory: Arc<dyn SettingsStore>) -> Self {
        Self {
            envelope: Box::new(TabulatedEnvelope::default()),
            turn_speed: Box::new(MapCurvatureTurnSpeed::new(memory)),
            conditional: Box::new(PassiveConditionalMode::new()),
            lane_geometry: Box::new(NearestBoundaryWidth),
            road_curvature: Box::new(PredictedLateralCurvature),
        }
    }
}

/// Per-cycle planning decision layer.
///
/// Owned by the control loop and updated exactly once per tick. Not shared
/// across threads.
pub struct Planner {
    collaborators: Collaborators,
    limiter: SpeedLimiter,
    state: PlannerState,
}

impl std::fmt::Debug for Planner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Planner")
            .field("limiter", &self.limiter)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl Planner {
    pub fn new(collaborators: Collaborators) -> Self {
        let state = PlannerState::initial(&*collaborators.envelope);
        Self {
            collaborators,
            limiter: SpeedLimiter::new(),
            state,
        }
    }

    /// Replace the speed limiter (e.g. to tune the ratio guard speed).
    pub fn with_speed_limiter(mut self, limiter: SpeedLimiter) -> Self {
        self.limiter = limiter;
        self
    }

    /// State decided by the most recent cycle.
    pub fn state(&self) -> &PlannerState {
        &self.state
    }

    /// The conditional mode evaluator, for reading its outputs.
    pub fn conditional(&self) -> &dyn ConditionalModeEvaluator {
        &*self.collaborators.conditional
    }

    /// Re-resolve configuration after the settings store changed.
    ///
    /// Resolves `params`, forwards the unit system to the conditional mode
    /// evaluator when that feature is on, then writes the resolution's effects
    /// to `params` and `memory`.
    ///
    /// # Errors
    ///
    /// Returns the first `SettingsError` raised while writing effects. The
    /// writes that succeeded stay in place.
    pub fn reconfigure(
        &mut self,
        params: &dyn SettingsStore,
        memory: &dyn SettingsStore,
    ) -> Result<Resolution, SettingsError> {
        let resolution = ConfigResolver::new().resolve(params);

        if let Some(unit_system) = resolution.conditional_mode_units() {
            self.collaborators
                .conditional
                .update_config(unit_system, params);
        }
        resolution.apply(params, memory)?;

        let config = &resolution.config;
        tracing::info!(
            units = %config.unit_system,
            profile = %config.acceleration_profile,
            mtsc = config.mtsc_enabled(),
            conditional = config.conditional_experimental,
            lane_widths = config.wants_lane_widths(),
            "Planner configuration updated"
        );

        Ok(resolution)
    }

    /// Run one control cycle.
    pub fn update(&mut self, config: &PlannerConfig, inputs: &CycleInputs<'_>) -> &PlannerState {
        let car = inputs.car_state;
        let enabled = inputs.controls_state.enabled;
        let v_ego = car.v_ego;
        let cruise_setpoint = inputs.controls_state.cruise_setpoint_ms();

        let (accel_regime, accel_limits) = ProfileSelector::select(
            &*self.collaborators.envelope,
            cruise_setpoint,
            self.state.mtsc_target,
            v_ego,
            config.acceleration_profile,
        );

        let signals = ConditionalSignals {
            navigation: inputs.navigation,
            model: inputs.model,
            radar: inputs.radar,
            road_curvature: self.state.road_curvature,
            standstill: car.standstill,
            v_ego,
        };
        let conditional_evaluated = ConditionalModeGate::run(
            &mut *self.collaborators.conditional,
            config.conditional_experimental,
            enabled,
            &signals,
        );

        let limit = self.limiter.step(
            enabled,
            config.mtsc.as_ref(),
            &mut *self.collaborators.turn_speed,
            cruise_setpoint,
            v_ego,
            car.a_ego,
        );

        let widths = LaneGeometryEstimator::estimate(
            &*self.collaborators.lane_geometry,
            config,
            inputs.model,
            v_ego,
        );

        let curvature = self.collaborators.road_curvature.curvature(inputs.model, v_ego);
        let road_curvature = if curvature.is_finite() {
            curvature.abs()
        } else {
            0.0
        };

        if enabled != self.state.engaged {
            tracing::info!(
                engaged = enabled,
                cruise_setpoint = cruise_setpoint,
                v_ego = v_ego,
                "Planner engagement changed"
            );
        }

        self.state = PlannerState {
            accel_limits,
            accel_regime,
            mtsc_target: limit.mtsc_target,
            limiter_state: limit.state,
            road_curvature,
            cruise_setpoint,
            v_cruise: limit.v_cruise,
            lane_width_left: widths.left,
            lane_width_right: widths.right,
            engaged: enabled,
            conditional_evaluated,
        };

        &self.state
    }

    /// Build the plan message for the last cycle.
    pub fn publish(
        &self,
        config: &PlannerConfig,
        mpc: &MpcOutputs,
        checks: SourceChecks,
    ) -> PlanMessage {
        let conditional = &*self.collaborators.conditional;

        PlanMessage {
            valid: checks.all_valid(),
            adjusted_cruise: self.state.mtsc_target * config.unit_system.speed_from_ms(),
            conditional_experimental: conditional.experimental_mode_active(),
            desired_follow_distance: mpc.safe_obstacle_distance - mpc.stopped_equivalence_factor,
            safe_obstacle_distance: mpc.safe_obstacle_distance,
            safe_obstacle_distance_stock: mpc.safe_obstacle_distance_stock,
            stopped_equivalence_factor: mpc.stopped_equivalence_factor,
            lane_width_left: self.state.lane_width_left,
            lane_width_right: self.state.lane_width_right,
            red_light: conditional.red_light_detected(),
        }
    }
}
