//! `resolve` command: show the typed configuration a settings file produces.

use std::io::Write;
use std::path::Path;

use cruiseplan::config::{ConfigResolver, Resolution};
use cruiseplan::settings::SettingsStore;

use super::common::{open_memory, open_settings};
use crate::error::CliError;

/// Resolve the settings file and print the result as JSON.
///
/// With `apply`, the resolution's effects are written to the settings file
/// and to `memory` (an INI file, or a throwaway in-memory store).
pub fn run(settings: Option<&Path>, memory: Option<&Path>, apply: bool) -> Result<(), CliError> {
    let params = open_settings(settings)?;
    let memory = open_memory(memory)?;

    let stdout = std::io::stdout();
    let resolution = resolve(&params, &*memory, apply, &mut stdout.lock())?;

    if apply {
        tracing::info!(
            path = %params.path().display(),
            effects = resolution.effects.len(),
            "Applied configuration effects"
        );
    }
    Ok(())
}

fn resolve(
    params: &dyn SettingsStore,
    memory: &dyn SettingsStore,
    apply: bool,
    out: &mut dyn Write,
) -> Result<Resolution, CliError> {
    let resolution = ConfigResolver::new().resolve(params);

    serde_json::to_writer_pretty(&mut *out, &resolution)?;
    writeln!(out)?;

    if apply {
        resolution.apply(params, memory)?;
    }
    Ok(resolution)
}
