//! Adjacent lane width estimation.
//!
//! Widths are computed only when a display feature needs them and the car is
//! fast enough for a lane change. Otherwise both sides report `0.0`, meaning
//! "not computed", not a zero-width lane.

use serde::{Deserialize, Serialize};

use crate::collaborators::LaneGeometry;
use crate::config::PlannerConfig;
use crate::signals::ModelOutput;

use super::constants::LANE_CHANGE_SPEED_MIN;

/// Left and right adjacent lane widths (m).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LaneWidths {
    pub left: f64,
    pub right: f64,
}

impl LaneWidths {
    /// The "not computed" reading.
    pub const NONE: LaneWidths = LaneWidths {
        left: 0.0,
        right: 0.0,
    };
}

/// Gates and runs the lane geometry collaborator.
#[derive(Debug, Default, Clone, Copy)]
pub struct LaneGeometryEstimator;

impl LaneGeometryEstimator {
    pub fn estimate(
        geometry: &dyn LaneGeometry,
        config: &PlannerConfig,
        model: &ModelOutput,
        v_ego: f64,
    ) -> LaneWidths {
        if !config.wants_lane_widths() || v_ego.is_nan() || v_ego < LANE_CHANGE_SPEED_MIN {
            return LaneWidths::NONE;
        }

        let [far_left, ego_left, ego_right, far_right] = &model.lane_lines;
        let [edge_left, edge_right] = &model.road_edges;

        LaneWidths {
            left: sanitize(geometry.lane_width(far_left, ego_left, edge_left)),
            right: sanitize(geometry.lane_width(far_right, ego_right, edge_right)),
        }
    }
}

fn sanitize(width: f64) -> f64 {
    if width.is_finite() && width > 0.0 {
        width
    } else {
        0.0
    }
}
