//! Recognised settings keys.
//!
//! Every key the planner reads or writes is named here so that typos become
//! compile errors and the resolver can enumerate what it reads.

use std::str::FromStr;

use super::error::SettingsError;

/// Value type a key is read as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Bool,
    Int,
    Float,
}

/// A recognised key in the settings or runtime-memory store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKey {
    IsMetric,
    ConditionalExperimental,
    ExperimentalMode,
    CustomPersonalities,
    AggressiveFollow,
    StandardFollow,
    RelaxedFollow,
    AggressiveJerk,
    StandardJerk,
    RelaxedJerk,
    CustomUi,
    AdjacentPath,
    BlindSpotPath,
    LongitudinalTune,
    AccelerationProfile,
    AggressiveAcceleration,
    StoppingDistance,
    MtscEnabled,
    MtscLimit,
    MtscAggressiveness,
    /// Runtime memory: lateral acceleration target for turn speed (m/s²).
    MapTargetLatA,
    /// Runtime memory: upcoming map curvature (1/m), written by the map daemon.
    MapCurvature,
}

impl ParamKey {
    /// Keys the config resolver reads on every resolve, in read order.
    pub const RESOLVED: [ParamKey; 19] = [
        ParamKey::IsMetric,
        ParamKey::ConditionalExperimental,
        ParamKey::CustomPersonalities,
        ParamKey::AggressiveFollow,
        ParamKey::StandardFollow,
        ParamKey::RelaxedFollow,
        ParamKey::AggressiveJerk,
        ParamKey::StandardJerk,
        ParamKey::RelaxedJerk,
        ParamKey::CustomUi,
        ParamKey::AdjacentPath,
        ParamKey::BlindSpotPath,
        ParamKey::LongitudinalTune,
        ParamKey::AccelerationProfile,
        ParamKey::AggressiveAcceleration,
        ParamKey::StoppingDistance,
        ParamKey::MtscEnabled,
        ParamKey::MtscLimit,
        ParamKey::MtscAggressiveness,
    ];

    /// All known keys.
    pub const ALL: [ParamKey; 22] = [
        ParamKey::IsMetric,
        ParamKey::ConditionalExperimental,
        ParamKey::ExperimentalMode,
        ParamKey::CustomPersonalities,
        ParamKey::AggressiveFollow,
        ParamKey::StandardFollow,
        ParamKey::RelaxedFollow,
        ParamKey::AggressiveJerk,
        ParamKey::StandardJerk,
        ParamKey::RelaxedJerk,
        ParamKey::CustomUi,
        ParamKey::AdjacentPath,
        ParamKey::BlindSpotPath,
        ParamKey::LongitudinalTune,
        ParamKey::AccelerationProfile,
        ParamKey::AggressiveAcceleration,
        ParamKey::StoppingDistance,
        ParamKey::MtscEnabled,
        ParamKey::MtscLimit,
        ParamKey::MtscAggressiveness,
        ParamKey::MapTargetLatA,
        ParamKey::MapCurvature,
    ];

    /// Store key string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamKey::IsMetric => "IsMetric",
            ParamKey::ConditionalExperimental => "ConditionalExperimental",
            ParamKey::ExperimentalMode => "ExperimentalMode",
            ParamKey::CustomPersonalities => "CustomPersonalities",
            ParamKey::AggressiveFollow => "AggressiveFollow",
            ParamKey::StandardFollow => "StandardFollow",
            ParamKey::RelaxedFollow => "RelaxedFollow",
            ParamKey::AggressiveJerk => "AggressiveJerk",
            ParamKey::StandardJerk => "StandardJerk",
            ParamKey::RelaxedJerk => "RelaxedJerk",
            ParamKey::CustomUi => "CustomUI",
            ParamKey::AdjacentPath => "AdjacentPath",
            ParamKey::BlindSpotPath => "BlindSpotPath",
            ParamKey::LongitudinalTune => "LongitudinalTune",
            ParamKey::AccelerationProfile => "AccelerationProfile",
            ParamKey::AggressiveAcceleration => "AggressiveAcceleration",
            ParamKey::StoppingDistance => "StoppingDistance",
            ParamKey::MtscEnabled => "MTSCEnabled",
            ParamKey::MtscLimit => "MTSCLimit",
            ParamKey::MtscAggressiveness => "MTSCAggressiveness",
            ParamKey::MapTargetLatA => "MapTargetLatA",
            ParamKey::MapCurvature => "MapCurvature",
        }
    }

    /// How the value is interpreted.
    pub fn kind(&self) -> ValueKind {
        match self {
            ParamKey::AggressiveFollow
            | ParamKey::StandardFollow
            | ParamKey::RelaxedFollow
            | ParamKey::AggressiveJerk
            | ParamKey::StandardJerk
            | ParamKey::RelaxedJerk
            | ParamKey::MtscLimit
            | ParamKey::MapTargetLatA
            | ParamKey::MapCurvature => ValueKind::Float,
            ParamKey::AccelerationProfile
            | ParamKey::StoppingDistance
            | ParamKey::MtscAggressiveness => ValueKind::Int,
            _ => ValueKind::Bool,
        }
    }
}

impl std::fmt::Display for ParamKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl serde::Serialize for ParamKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl FromStr for ParamKey {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ParamKey::ALL
            .iter()
            .copied()
            .find(|key| key.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| SettingsError::UnknownKey(s.to_string()))
    }
}
