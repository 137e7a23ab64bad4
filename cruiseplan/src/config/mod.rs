//! Planner configuration.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── mod.rs        # This file - module exports
//! ├── planner.rs    # PlannerConfig and its typed parts
//! ├── resolver.rs   # Settings store → PlannerConfig
//! └── effects.rs    # External writes requested by resolution
//! ```
//!
//! # Gating
//!
//! Child toggles are resolved to off whenever their master toggle is off:
//!
//! | Master | Children |
//! |--------|----------|
//! | `CustomUI` | `AdjacentPath`, `BlindSpotPath` |
//! | `LongitudinalTune` | `AccelerationProfile`, `AggressiveAcceleration`, `StoppingDistance` |
//! | `MTSCEnabled` | `MTSCLimit`, `MTSCAggressiveness` |

mod effects;
mod planner;
mod resolver;

pub use effects::{ConfigEffect, Resolution};
pub use planner::{AccelerationProfile, MtscSettings, PersonalityTuning, PlannerConfig};
pub use resolver::{ConfigResolver, RawSettings, MTSC_BASE_LAT_ACCEL};
