//! Lane width from model lane lines and road edges.

use crate::signals::LaneLine;

use super::interp;

/// Distance from the ego lane boundary to the next lane line or road edge.
pub trait LaneGeometry {
    /// Width available beyond `current_lane`, bounded by `lane` and `road_edge` (m).
    fn lane_width(&self, lane: &LaneLine, current_lane: &LaneLine, road_edge: &LaneLine) -> f64;
}

/// Mean lateral distance to the nearer of the next lane line and the road edge.
///
/// Both bounding lines are resampled at the ego boundary's `x` positions.
#[derive(Debug, Default, Clone, Copy)]
pub struct NearestBoundaryWidth;

impl NearestBoundaryWidth {
    fn mean_distance(current: &LaneLine, other: &LaneLine) -> Option<f64> {
        let n = current.len();
        let m = other.len();
        if n == 0 || m == 0 {
            return None;
        }

        let (xs, ys) = (&other.x[..m], &other.y[..m]);
        let sorted;
        let (xs, ys): (&[f64], &[f64]) = if xs.windows(2).all(|w| w[0] <= w[1]) {
            (xs, ys)
        } else {
            let mut pairs: Vec<(f64, f64)> = xs.iter().copied().zip(ys.iter().copied()).collect();
            pairs.sort_by(|a, b| a.0.total_cmp(&b.0));
            sorted = pairs.into_iter().unzip::<f64, f64, Vec<f64>, Vec<f64>>();
            (&sorted.0, &sorted.1)
        };

        let total: f64 = current.x[..n]
            .iter()
            .zip(&current.y[..n])
            .map(|(&x, &y)| (y - interp(x, xs, ys)).abs())
            .sum();
        Some(total / n as f64)
    }
}

impl LaneGeometry for NearestBoundaryWidth {
    fn lane_width(&self, lane: &LaneLine, current_lane: &LaneLine, road_edge: &LaneLine) -> f64 {
        let to_lane = Self::mean_distance(current_lane, lane);
        let to_edge = Self::mean_distance(current_lane, road_edge);
        match (to_lane, to_edge) {
            (Some(a), Some(b)) => a.min(b),
            (Some(a), None) | (None, Some(a)) => a,
            (None, None) => 0.0,
        }
    }
}
