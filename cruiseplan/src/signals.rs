//! Typed per-cycle input messages.
//!
//! These mirror the upstream messages the planner consumes each tick. They
//! are plain data: the planner reads them by reference and never retains
//! them past the cycle.

use serde::{Deserialize, Serialize};

use crate::units::KPH_TO_MS;

/// Vehicle state reported by the car interface.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarState {
    /// Ego speed (m/s).
    pub v_ego: f64,
    /// Ego longitudinal acceleration (m/s²).
    pub a_ego: f64,
    /// Vehicle is stopped and held.
    pub standstill: bool,
}

/// Engagement and setpoint state reported by the controls loop.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsState {
    /// Whether the system is engaged.
    pub enabled: bool,
    /// Internal cruise setpoint (km/h).
    pub v_cruise: f64,
    /// Cluster-displayed cruise setpoint (km/h), `0` when unavailable.
    pub v_cruise_cluster: f64,
}

impl ControlsState {
    /// Cruise setpoint in m/s.
    ///
    /// Prefers the cluster setpoint, falling back to the internal one when the
    /// cluster value is zero.
    pub fn cruise_setpoint_ms(&self) -> f64 {
        let kph = if self.v_cruise_cluster != 0.0 {
            self.v_cruise_cluster
        } else {
            self.v_cruise
        };
        kph * KPH_TO_MS
    }
}

/// A polyline sampled by the driving model (lane line or road edge).
///
/// `x` is longitudinal distance ahead (m), `y` lateral offset (m).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaneLine {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl LaneLine {
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Self {
        Self { x, y }
    }

    /// Number of usable samples (the shorter of `x` and `y`).
    pub fn len(&self) -> usize {
        self.x.len().min(self.y.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Driving model output relevant to the planner.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelOutput {
    /// Lane lines ordered left to right: far left, ego left, ego right, far right.
    pub lane_lines: [LaneLine; 4],
    /// Road edges: left, right.
    pub road_edges: [LaneLine; 2],
    /// Predicted longitudinal velocity along the plan (m/s).
    pub velocity_x: Vec<f64>,
    /// Predicted lateral acceleration along the plan (m/s²).
    pub acceleration_y: Vec<f64>,
}

/// Navigation hints from the routing layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationSignal {
    /// Distance to the next navigation maneuver (m), if any.
    pub distance_to_maneuver: Option<f64>,
    /// Approaching an intersection with a stop or signal.
    pub approaching_intersection: bool,
    /// Approaching a turn.
    pub approaching_turn: bool,
}

/// Lead vehicle as tracked by radar.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeadTrack {
    /// Distance to the lead (m).
    pub d_rel: f64,
    /// Relative speed of the lead (m/s).
    pub v_rel: f64,
    /// Absolute lead speed (m/s).
    pub v_lead: f64,
}

/// Radar lead tracking.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadarState {
    pub lead_one: Option<LeadTrack>,
    pub lead_two: Option<LeadTrack>,
}

/// Read-only outputs of the longitudinal MPC consumed for the plan message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MpcOutputs {
    /// Safe distance to the obstacle under the active personality (m).
    pub safe_obstacle_distance: f64,
    /// Safe distance to the obstacle under stock tuning (m).
    pub safe_obstacle_distance_stock: f64,
    /// Stopped-equivalence distance factor (m).
    pub stopped_equivalence_factor: f64,
}

/// All signals the planner reads during one cycle.
#[derive(Debug, Clone, Copy)]
pub struct CycleInputs<'a> {
    pub car_state: &'a CarState,
    pub controls_state: &'a ControlsState,
    pub model: &'a ModelOutput,
    pub navigation: &'a NavigationSignal,
    pub radar: &'a RadarState,
}
