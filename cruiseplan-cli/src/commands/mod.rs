//! CLI command implementations.

pub mod common;
pub mod replay;
pub mod resolve;
pub mod settings;
