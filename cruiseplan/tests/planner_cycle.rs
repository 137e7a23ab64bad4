//! Integration tests for the per-cycle planner.
//!
//! These drive `Planner` through complete cycles the way a control loop does:
//! - settings store → reconfigure → typed config + effects
//! - cycle inputs → update → planner state
//! - state + MPC outputs → publish → plan message
//!
//! Run with: `cargo test --test planner_cycle`

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use cruiseplan::collaborators::{
    ConditionalModeEvaluator, ConditionalSignals, MapCurvatureTurnSpeed, NearestBoundaryWidth,
    PredictedLateralCurvature, RoadCurvatureEstimator, TabulatedEnvelope, TurnSpeedEstimator,
};
use cruiseplan::config::{AccelerationProfile, MtscSettings};
use cruiseplan::planner::{AccelRegime, LimiterState};
use cruiseplan::settings::{MemoryStore, ParamKey, SettingsStore};
use cruiseplan::signals::{
    CarState, ControlsState, CycleInputs, LaneLine, ModelOutput, MpcOutputs, NavigationSignal,
    RadarState,
};
use cruiseplan::units::{UnitSystem, MS_TO_MPH};
use cruiseplan::{Collaborators, Planner, PlannerConfig, PlannerState, SourceChecks};

// ============================================================================
// Helper Functions
// ============================================================================

const EPS: f64 = 1e-9;

/// 108 km/h, i.e. 30 m/s.
const SETPOINT_KPH: f64 = 108.0;

/// Turn speed source returning a fixed candidate.
struct FixedTurnSpeed(f64);

impl TurnSpeedEstimator for FixedTurnSpeed {
    fn target_speed(&mut self, _v_ego: f64, _a_ego: f64) -> f64 {
        self.0
    }
}

/// Evaluator that counts invocations and records the curvature it was given.
struct CountingEvaluator {
    calls: Arc<AtomicU64>,
    last_curvature: Arc<SharedF64>,
}

/// f64 shared with the test body, stored as bits in an atomic.
#[derive(Default)]
struct SharedF64(AtomicU64);

impl SharedF64 {
    fn set(&self, value: f64) {
        self.0.store(value.to_bits(), Ordering::SeqCst);
    }

    fn get(&self) -> f64 {
        f64::from_bits(self.0.load(Ordering::SeqCst))
    }
}

impl ConditionalModeEvaluator for CountingEvaluator {
    fn update(&mut self, signals: &ConditionalSignals<'_>) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.last_curvature.set(signals.road_curvature);
    }

    fn experimental_mode_active(&self) -> bool {
        true
    }

    fn red_light_detected(&self) -> bool {
        false
    }

    fn update_config(&mut self, _unit_system: UnitSystem, _settings: &dyn SettingsStore) {}
}

/// Curvature source returning a fixed value.
struct FixedCurvature(f64);

impl RoadCurvatureEstimator for FixedCurvature {
    fn curvature(&self, _model: &ModelOutput, _v_ego: f64) -> f64 {
        self.0
    }
}

fn collaborators(turn_speed: Box<dyn TurnSpeedEstimator>) -> Collaborators {
    Collaborators {
        envelope: Box::new(TabulatedEnvelope::default()),
        turn_speed,
        conditional: Box::new(cruiseplan::collaborators::PassiveConditionalMode::new()),
        lane_geometry: Box::new(NearestBoundaryWidth),
        road_curvature: Box::new(PredictedLateralCurvature),
    }
}

fn mtsc_config(limit_ratio: f64) -> PlannerConfig {
    PlannerConfig {
        mtsc: Some(MtscSettings {
            limit_ratio,
            target_lat_accel: 1.0,
        }),
        ..Default::default()
    }
}

/// One cycle's worth of upstream messages.
struct Cycle {
    car: CarState,
    controls: ControlsState,
    model: ModelOutput,
    navigation: NavigationSignal,
    radar: RadarState,
}

impl Cycle {
    fn new(enabled: bool, setpoint_kph: f64, v_ego: f64) -> Self {
        Self {
            car: CarState {
                v_ego,
                ..Default::default()
            },
            controls: ControlsState {
                enabled,
                v_cruise: setpoint_kph,
                v_cruise_cluster: 0.0,
            },
            model: ModelOutput::default(),
            navigation: NavigationSignal::default(),
            radar: RadarState::default(),
        }
    }

    fn with_model(mut self, model: ModelOutput) -> Self {
        self.model = model;
        self
    }

    fn run(&self, planner: &mut Planner, config: &PlannerConfig) -> PlannerState {
        let inputs = CycleInputs {
            car_state: &self.car,
            controls_state: &self.controls,
            model: &self.model,
            navigation: &self.navigation,
            radar: &self.radar,
        };
        planner.update(config, &inputs).clone()
    }
}

fn straight(offset: f64) -> LaneLine {
    LaneLine::new(vec![0.0, 25.0, 50.0], vec![offset; 3])
}

// ============================================================================
// Speed Limiting Scenarios
// ============================================================================

#[test]
fn test_mtsc_off_passes_setpoint_with_stock_envelope() {
    let mut planner = Planner::new(collaborators(Box::new(FixedTurnSpeed(5.0))));
    let config = PlannerConfig::default();
    let cycle = Cycle::new(true, SETPOINT_KPH, 20.0);

    cycle.run(&mut planner, &config);
    let state = cycle.run(&mut planner, &config);

    assert!((state.mtsc_target - 30.0).abs() < EPS);
    assert!((state.v_cruise - 30.0).abs() < EPS);
    assert_eq!(state.accel_regime, AccelRegime::Stock);
    let stock = TabulatedEnvelope::default();
    assert_eq!(
        state.accel_limits,
        cruiseplan::planner::AccelLimits::stock(&stock, 20.0)
    );
}

#[test]
fn test_turn_speed_limits_when_ratio_allows() {
    let mut planner = Planner::new(collaborators(Box::new(FixedTurnSpeed(20.0))));
    let state = Cycle::new(true, SETPOINT_KPH, 25.0).run(&mut planner, &mtsc_config(0.9));

    assert_eq!(state.limiter_state, LimiterState::Limiting);
    assert!((state.mtsc_target - 20.0).abs() < EPS);
    assert!((state.v_cruise - 20.0).abs() < EPS);
}

#[test]
fn test_low_speed_falls_back_to_setpoint() {
    let mut planner = Planner::new(collaborators(Box::new(FixedTurnSpeed(20.0))));
    let state = Cycle::new(true, SETPOINT_KPH, 1.0).run(&mut planner, &mtsc_config(0.9));

    assert_eq!(state.limiter_state, LimiterState::Unconstrained);
    assert!((state.mtsc_target - 30.0).abs() < EPS);
    assert!((state.v_cruise - 30.0).abs() < EPS);
}

#[test]
fn test_disengage_mid_limiting_snaps_back_same_cycle() {
    let mut planner = Planner::new(collaborators(Box::new(FixedTurnSpeed(20.0))));
    let config = mtsc_config(0.9);

    let limiting = Cycle::new(true, SETPOINT_KPH, 25.0).run(&mut planner, &config);
    assert_eq!(limiting.limiter_state, LimiterState::Limiting);

    let released = Cycle::new(false, SETPOINT_KPH, 25.0).run(&mut planner, &config);
    assert_eq!(released.limiter_state, LimiterState::Disabled);
    assert!((released.mtsc_target - 30.0).abs() < EPS);
    assert!((released.v_cruise - 30.0).abs() < EPS);
    assert!(!released.engaged);
}

#[test]
fn test_limiting_target_selects_stock_envelope_next_cycle() {
    let mut planner = Planner::new(collaborators(Box::new(FixedTurnSpeed(20.0))));
    let config = PlannerConfig {
        acceleration_profile: AccelerationProfile::Sport,
        ..mtsc_config(0.9)
    };

    Cycle::new(true, SETPOINT_KPH, 25.0).run(&mut planner, &config);
    let state = Cycle::new(true, SETPOINT_KPH, 25.0).run(&mut planner, &config);

    // Trailing target 20 sits well below the 30 setpoint.
    assert_eq!(state.accel_regime, AccelRegime::TurnLimited);
}

#[test]
fn test_map_curvature_drives_limit_end_to_end() {
    let params = MemoryStore::from_pairs([
        ("MTSCEnabled", "1"),
        ("MTSCLimit", "90"),
        ("MTSCAggressiveness", "50"),
    ]);
    let memory: Arc<MemoryStore> = Arc::new(MemoryStore::new());
    let shared: Arc<dyn SettingsStore> = memory.clone();

    let mut planner = Planner::new(Collaborators::reference(shared));
    let config = planner
        .reconfigure(&params, &*memory)
        .expect("memory stores accept writes")
        .config;
    assert!((memory.get_float(ParamKey::MapTargetLatA) - 1.0).abs() < EPS);

    // sqrt(1.0 / 0.0025) = 20 m/s
    memory.put_float(ParamKey::MapCurvature, 0.0025).unwrap();
    let state = Cycle::new(true, SETPOINT_KPH, 25.0).run(&mut planner, &config);

    assert_eq!(state.limiter_state, LimiterState::Limiting);
    assert!((state.v_cruise - 20.0).abs() < 1e-6);

    // Straight road again
    memory.put_float(ParamKey::MapCurvature, 0.0).unwrap();
    let state = Cycle::new(true, SETPOINT_KPH, 25.0).run(&mut planner, &config);
    assert_eq!(state.limiter_state, LimiterState::Unconstrained);
    assert!((state.v_cruise - 30.0).abs() < EPS);
}

#[test]
fn test_map_turn_speed_is_standalone_usable() {
    let memory = Arc::new(MemoryStore::from_pairs([
        ("MapCurvature", "0.01"),
        ("MapTargetLatA", "1.0"),
    ]));
    let mut estimator = MapCurvatureTurnSpeed::new(memory);
    assert!((estimator.target_speed(20.0, 0.0) - 10.0).abs() < 1e-9);
}

// ============================================================================
// Conditional Mode Gating
// ============================================================================

#[test]
fn test_conditional_evaluator_only_runs_when_gated_open() {
    let calls = Arc::new(AtomicU64::new(0));
    let last_curvature = Arc::new(SharedF64::default());
    let mut collab = collaborators(Box::new(FixedTurnSpeed(f64::INFINITY)));
    collab.conditional = Box::new(CountingEvaluator {
        calls: calls.clone(),
        last_curvature: last_curvature.clone(),
    });
    let mut planner = Planner::new(collab);

    let off = PlannerConfig::default();
    let on = PlannerConfig {
        conditional_experimental: true,
        ..Default::default()
    };

    Cycle::new(true, SETPOINT_KPH, 20.0).run(&mut planner, &off);
    Cycle::new(false, SETPOINT_KPH, 20.0).run(&mut planner, &on);
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    let state = Cycle::new(true, SETPOINT_KPH, 20.0).run(&mut planner, &on);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(state.conditional_evaluated);
}

#[test]
fn test_conditional_evaluator_sees_trailing_curvature() {
    let calls = Arc::new(AtomicU64::new(0));
    let last_curvature = Arc::new(SharedF64::default());
    let collab = Collaborators {
        conditional: Box::new(CountingEvaluator {
            calls: calls.clone(),
            last_curvature: last_curvature.clone(),
        }),
        road_curvature: Box::new(FixedCurvature(0.7)),
        ..collaborators(Box::new(FixedTurnSpeed(f64::INFINITY)))
    };
    let mut planner = Planner::new(collab);
    let config = PlannerConfig {
        conditional_experimental: true,
        ..Default::default()
    };

    let first = Cycle::new(true, SETPOINT_KPH, 20.0).run(&mut planner, &config);
    assert_eq!(last_curvature.get(), 0.0);
    assert!((first.road_curvature - 0.7).abs() < EPS);

    Cycle::new(true, SETPOINT_KPH, 20.0).run(&mut planner, &config);
    assert!((last_curvature.get() - 0.7).abs() < EPS);
}

#[test]
fn test_non_finite_curvature_is_zeroed() {
    let collab = Collaborators {
        road_curvature: Box::new(FixedCurvature(f64::NAN)),
        ..collaborators(Box::new(FixedTurnSpeed(f64::INFINITY)))
    };
    let mut planner = Planner::new(collab);
    let state = Cycle::new(true, SETPOINT_KPH, 20.0).run(&mut planner, &PlannerConfig::default());
    assert_eq!(state.road_curvature, 0.0);
}

// ============================================================================
// Lane Widths
// ============================================================================

#[test]
fn test_lane_widths_reported_above_lane_change_speed() {
    let model = ModelOutput {
        lane_lines: [straight(-5.4), straight(-1.8), straight(1.8), straight(5.4)],
        road_edges: [straight(-9.0), straight(9.0)],
        ..Default::default()
    };
    let config = PlannerConfig {
        adjacent_lanes: true,
        ..Default::default()
    };
    let mut planner = Planner::new(collaborators(Box::new(FixedTurnSpeed(f64::INFINITY))));

    let slow = Cycle::new(true, SETPOINT_KPH, 5.0)
        .with_model(model.clone())
        .run(&mut planner, &config);
    assert_eq!((slow.lane_width_left, slow.lane_width_right), (0.0, 0.0));

    let fast = Cycle::new(true, SETPOINT_KPH, 25.0)
        .with_model(model)
        .run(&mut planner, &config);
    assert!((fast.lane_width_left - 3.6).abs() < EPS);
    assert!((fast.lane_width_right - 3.6).abs() < EPS);
}

// ============================================================================
// Reconfigure and Publish
// ============================================================================

#[test]
fn test_reconfigure_writes_effects() {
    let params = MemoryStore::from_pairs([("ConditionalExperimental", "1")]);
    let memory = MemoryStore::new();
    let mut planner = Planner::new(collaborators(Box::new(FixedTurnSpeed(f64::INFINITY))));

    let resolution = planner.reconfigure(&params, &memory).unwrap();

    assert!(resolution.config.conditional_experimental);
    assert!(params.get_bool(ParamKey::ExperimentalMode));
    // MTSC off: nothing written to memory
    assert!(memory.is_empty());
}

#[test]
fn test_publish_reports_follow_distance_and_validity() {
    let mut planner = Planner::new(collaborators(Box::new(FixedTurnSpeed(f64::INFINITY))));
    let config = PlannerConfig::default();
    Cycle::new(true, SETPOINT_KPH, 20.0).run(&mut planner, &config);

    let mpc = MpcOutputs {
        safe_obstacle_distance: 42.0,
        safe_obstacle_distance_stock: 38.0,
        stopped_equivalence_factor: 12.5,
    };

    let plan = planner.publish(&config, &mpc, SourceChecks::ALL_FRESH);
    assert!(plan.valid);
    assert!((plan.desired_follow_distance - 29.5).abs() < EPS);
    assert_eq!(plan.safe_obstacle_distance_stock, 38.0);
    assert!((plan.adjusted_cruise - SETPOINT_KPH).abs() < 1e-6);
    assert!(!plan.conditional_experimental);
    assert!(!plan.red_light);

    let stale = SourceChecks {
        car_state: true,
        controls_state: false,
    };
    assert!(!planner.publish(&config, &mpc, stale).valid);
}

#[test]
fn test_publish_adjusted_cruise_in_mph() {
    let mut planner = Planner::new(collaborators(Box::new(FixedTurnSpeed(f64::INFINITY))));
    let config = PlannerConfig {
        unit_system: UnitSystem::Imperial,
        ..Default::default()
    };
    let state = Cycle::new(true, SETPOINT_KPH, 20.0).run(&mut planner, &config);

    let plan = planner.publish(&config, &MpcOutputs::default(), SourceChecks::ALL_FRESH);
    assert!((plan.adjusted_cruise - state.mtsc_target * MS_TO_MPH).abs() < EPS);
}

#[test]
fn test_publish_reflects_evaluator_outputs() {
    let collab = Collaborators {
        conditional: Box::new(CountingEvaluator {
            calls: Arc::new(AtomicU64::new(0)),
            last_curvature: Arc::new(SharedF64::default()),
        }),
        ..collaborators(Box::new(FixedTurnSpeed(f64::INFINITY)))
    };
    let planner = Planner::new(collab);
    let plan = planner.publish(
        &PlannerConfig::default(),
        &MpcOutputs::default(),
        SourceChecks::default(),
    );
    assert!(plan.conditional_experimental);
    assert!(!plan.valid);
}
