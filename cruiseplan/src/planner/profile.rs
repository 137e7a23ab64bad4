//! Acceleration profile selection.
//!
//! Picks the acceleration envelope for the cycle. Exactly one regime applies,
//! checked in priority order:
//!
//! ```text
//! 1. TurnLimited  mtsc_target + margin < setpoint   -> (A_CRUISE_MIN, stock_max)
//! 2. Eco          profile == Eco                     -> (eco_min, eco_max)
//! 3. Sport        profile == Sport | SportPlus       -> (sport_min, sport_max)
//! 4. Stock        otherwise                          -> (A_CRUISE_MIN, stock_max)
//! ```
//!
//! While the turn speed target sits below the setpoint, the stock envelope is
//! used so that custom profiles do not fight turn speed transitions.

use serde::{Deserialize, Serialize};

use crate::collaborators::{AccelerationEnvelope, A_CRUISE_MIN};
use crate::config::AccelerationProfile;

use super::constants::MTSC_DEFERRAL_MARGIN;

/// Ordered acceleration bounds (m/s²). `min <= max` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccelLimits {
    pub min: f64,
    pub max: f64,
}

impl AccelLimits {
    /// Build from two bounds, swapping them if inverted.
    pub fn ordered(a: f64, b: f64) -> Self {
        if a <= b {
            Self { min: a, max: b }
        } else {
            tracing::debug!(min = a, max = b, "Inverted acceleration bounds, swapping");
            Self { min: b, max: a }
        }
    }

    /// The stock envelope at `v_ego`.
    pub fn stock(envelope: &dyn AccelerationEnvelope, v_ego: f64) -> Self {
        Self::ordered(A_CRUISE_MIN, envelope.stock_max(v_ego))
    }
}

/// Which rule produced the cycle's envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccelRegime {
    /// Turn speed target below setpoint; stock envelope.
    TurnLimited,
    Eco,
    Sport,
    #[default]
    Stock,
}

impl std::fmt::Display for AccelRegime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccelRegime::TurnLimited => write!(f, "turn-limited"),
            AccelRegime::Eco => write!(f, "eco"),
            AccelRegime::Sport => write!(f, "sport"),
            AccelRegime::Stock => write!(f, "stock"),
        }
    }
}

/// Chooses the acceleration envelope for a cycle. Stateless.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProfileSelector;

impl ProfileSelector {
    /// Determine the regime without evaluating any envelope.
    pub fn regime(
        cruise_setpoint: f64,
        mtsc_target: f64,
        profile: AccelerationProfile,
    ) -> AccelRegime {
        if mtsc_target + MTSC_DEFERRAL_MARGIN < cruise_setpoint {
            AccelRegime::TurnLimited
        } else if profile == AccelerationProfile::Eco {
            AccelRegime::Eco
        } else if profile.is_sport() {
            AccelRegime::Sport
        } else {
            AccelRegime::Stock
        }
    }

    /// Select the regime and its bounds at `v_ego`.
    pub fn select(
        envelope: &dyn AccelerationEnvelope,
        cruise_setpoint: f64,
        mtsc_target: f64,
        v_ego: f64,
        profile: AccelerationProfile,
    ) -> (AccelRegime, AccelLimits) {
        let regime = Self::regime(cruise_setpoint, mtsc_target, profile);
        let limits = match regime {
            AccelRegime::TurnLimited | AccelRegime::Stock => AccelLimits::stock(envelope, v_ego),
            AccelRegime::Eco => AccelLimits::ordered(envelope.eco_min(v_ego), envelope.eco_max(v_ego)),
            AccelRegime::Sport => {
                AccelLimits::ordered(envelope.sport_min(v_ego), envelope.sport_max(v_ego))
            }
        };
        (regime, limits)
    }
}
