//! cruiseplan - Per-cycle longitudinal planning decisions
//!
//! This library is the decision layer that runs once per control tick in a
//! driver-assistance planning pipeline. Each cycle it selects an acceleration
//! envelope, derives a cruise ceiling from curvature-based turn speed
//! limiting, estimates adjacent lane widths, and produces a consolidated plan
//! message for the motion controller.
//!
//! # Architecture
//!
//! ```text
//! SettingsStore ──► ConfigResolver ──► PlannerConfig (+ ConfigEffects)
//!                                           │
//!        CycleInputs ──► Planner::update ◄──┘
//!                             │
//!                             ├── collaborators (envelopes, turn speed,
//!                             │   conditional mode, lane geometry, curvature)
//!                             ▼
//!                        PlannerState ──► Planner::publish ──► PlanMessage
//! ```
//!
//! # Modules
//!
//! - [`settings`]: key-value settings stores
//! - [`config`]: typed configuration and its resolution
//! - [`collaborators`]: external collaborator traits and reference implementations
//! - [`planner`]: the per-cycle orchestration core
//! - [`signals`]: input messages
//! - [`plan`]: the outbound plan message
//! - [`units`]: unit system and conversions

pub mod collaborators;
pub mod config;
pub mod plan;
pub mod planner;
pub mod settings;
pub mod signals;
pub mod units;

pub use config::{ConfigResolver, PlannerConfig, Resolution};
pub use plan::{PlanMessage, SourceChecks};
pub use planner::{Collaborators, Planner, PlannerState};
