//! `replay` command: run recorded cycles through the planner.
//!
//! Input is JSON lines, one cycle record per line:
//!
//! ```text
//! {"car_state": {"v_ego": 25.0}, "controls_state": {"enabled": true, "v_cruise": 108.0},
//!  "map_curvature": 0.0025, "mpc": {"safe_obstacle_distance": 40.0}}
//! ```
//!
//! Every field is optional. Output is one JSON line per cycle carrying the
//! planner state and the published plan message.
//!
//! The settings file is copied into memory before resolving, so a replay
//! never modifies it.

use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use cruiseplan::plan::{PlanMessage, SourceChecks};
use cruiseplan::planner::LimiterState;
use cruiseplan::settings::{ParamKey, SettingsStore};
use cruiseplan::signals::{
    CarState, ControlsState, CycleInputs, ModelOutput, MpcOutputs, NavigationSignal, RadarState,
};
use cruiseplan::{Collaborators, Planner, PlannerState};

use super::common::{open_memory, open_settings, snapshot};
use crate::error::CliError;

/// One recorded control cycle.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CycleRecord {
    pub car_state: CarState,
    pub controls_state: ControlsState,
    pub model: ModelOutput,
    pub navigation: NavigationSignal,
    pub radar: RadarState,
    pub mpc: MpcOutputs,
    /// Source freshness; all fresh when omitted.
    pub checks: Option<SourceChecks>,
    /// Upcoming map curvature (1/m) to publish to the memory store before
    /// the cycle runs.
    pub map_curvature: Option<f64>,
}

impl CycleRecord {
    fn inputs(&self) -> CycleInputs<'_> {
        CycleInputs {
            car_state: &self.car_state,
            controls_state: &self.controls_state,
            model: &self.model,
            navigation: &self.navigation,
            radar: &self.radar,
        }
    }
}

/// One output line.
#[derive(Debug, Serialize)]
struct ReplayFrame<'a> {
    cycle: usize,
    state: &'a PlannerState,
    plan: PlanMessage,
}

/// Summary of a replay run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReplaySummary {
    pub cycles: usize,
    pub limiting_cycles: usize,
}

/// Replay `file` and print one JSON line per cycle.
pub fn run(file: &Path, settings: Option<&Path>, memory: Option<&Path>) -> Result<(), CliError> {
    let params = snapshot(&open_settings(settings)?);
    let memory = open_memory(memory)?;
    let reader = BufReader::new(std::fs::File::open(file)?);

    let stdout = std::io::stdout();
    let summary = replay(reader, file, &params, memory, &mut stdout.lock())?;

    tracing::info!(
        file = %file.display(),
        cycles = summary.cycles,
        limiting = summary.limiting_cycles,
        "Replay complete"
    );
    Ok(())
}

fn replay(
    reader: impl BufRead,
    source: &Path,
    params: &dyn SettingsStore,
    memory: Arc<dyn SettingsStore>,
    out: &mut dyn Write,
) -> Result<ReplaySummary, CliError> {
    let mut planner = Planner::new(Collaborators::reference(Arc::clone(&memory)));
    let config = planner.reconfigure(params, &*memory)?.config;

    let mut summary = ReplaySummary::default();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record: CycleRecord =
            serde_json::from_str(&line).map_err(|e| CliError::Record {
                path: source.to_path_buf(),
                line: index + 1,
                source: e,
            })?;

        if let Some(curvature) = record.map_curvature {
            memory.put_float(ParamKey::MapCurvature, curvature)?;
        }

        let state = planner.update(&config, &record.inputs()).clone();
        let plan = planner.publish(
            &config,
            &record.mpc,
            record.checks.unwrap_or(SourceChecks::ALL_FRESH),
        );

        if state.limiter_state == LimiterState::Limiting {
            summary.limiting_cycles += 1;
        }

        let frame = ReplayFrame {
            cycle: summary.cycles,
            state: &state,
            plan,
        };
        serde_json::to_writer(&mut *out, &frame)?;
        writeln!(out)?;
        summary.cycles += 1;
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cruiseplan::settings::{IniSettingsStore, MemoryStore};
    use tempfile::TempDir;

    const LIMITED_DRIVE: &str = r#"
{"car_state": {"v_ego": 25.0}, "controls_state": {"enabled": true, "v_cruise": 108.0}, "map_curvature": 0.0025}
{"car_state": {"v_ego": 25.0}, "controls_state": {"enabled": true, "v_cruise": 108.0}, "map_curvature": 0.0025, "mpc": {"safe_obstacle_distance": 40.0, "stopped_equivalence_factor": 15.0}}

{"car_state": {"v_ego": 25.0}, "controls_state": {"enabled": false, "v_cruise": 108.0}, "checks": {"car_state": true, "controls_state": false}}
"#;

    fn mtsc_params() -> MemoryStore {
        MemoryStore::from_pairs([
            ("MTSCEnabled", "1"),
            ("MTSCLimit", "90"),
            ("MTSCAggressiveness", "50"),
        ])
    }

    fn run_replay(
        input: &str,
        memory: Arc<dyn SettingsStore>,
    ) -> (ReplaySummary, Vec<serde_json::Value>) {
        let mut out = Vec::new();
        let summary = replay(
            input.as_bytes(),
            Path::new("drive.jsonl"),
            &mtsc_params(),
            memory,
            &mut out,
        )
        .unwrap();
        let frames = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        (summary, frames)
    }

    #[test]
    fn test_replay_limits_then_releases() {
        let (summary, frames) = run_replay(LIMITED_DRIVE, Arc::new(MemoryStore::new()));

        assert_eq!(summary.cycles, 3);
        assert_eq!(summary.limiting_cycles, 2);
        assert_eq!(frames.len(), 3);

        assert_eq!(frames[0]["state"]["limiter_state"], "limiting");
        let v_cruise = frames[0]["state"]["v_cruise"].as_f64().unwrap();
        assert!((v_cruise - 20.0).abs() < 1e-6);

        let follow = frames[1]["plan"]["desired_follow_distance"].as_f64().unwrap();
        assert!((follow - 25.0).abs() < 1e-9);
        assert_eq!(frames[1]["plan"]["valid"], true);

        assert_eq!(frames[2]["state"]["limiter_state"], "disabled");
        assert_eq!(frames[2]["plan"]["valid"], false);
        assert_eq!(frames[2]["cycle"], 2);
    }

    #[test]
    fn test_replay_writes_memory_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("memory.ini");
        let memory: Arc<dyn SettingsStore> = Arc::new(IniSettingsStore::open(&path).unwrap());

        run_replay(LIMITED_DRIVE, memory);

        let reopened = IniSettingsStore::open(&path).unwrap();
        assert!((reopened.get_float(ParamKey::MapTargetLatA) - 1.0).abs() < 1e-9);
        assert!((reopened.get_float(ParamKey::MapCurvature) - 0.0025).abs() < 1e-12);
    }

    #[test]
    fn test_bad_record_reports_line() {
        let input = "{\"car_state\": {\"v_ego\": 1.0}}\nnot json\n";
        let err = replay(
            input.as_bytes(),
            Path::new("drive.jsonl"),
            &mtsc_params(),
            Arc::new(MemoryStore::new()),
            &mut Vec::new(),
        )
        .unwrap_err();

        match err {
            CliError::Record { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }
}
