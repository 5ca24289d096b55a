//! One-scenario run composition and persistence.

use std::error::Error;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use gauntlet_adapter::{
    run_episode, AdapterConfig, AdapterError, Backend, EpisodeReport, ForwardPolicy,
    ProgressSink, SimAdapter,
};
use gauntlet_scenario::{resolve_scenario, ScenarioError};

// ── RunError ───────────────────────────────────────────────────────

/// Errors from a scenario run, each naming the stage that failed.
#[derive(Clone, Debug, PartialEq)]
pub enum RunError {
    /// Scenario loading or resolution failed.
    Scenario(ScenarioError),
    /// Adapter construction or episode execution failed.
    Adapter(AdapterError),
    /// The run directory could not be created or written.
    OutputWrite {
        /// The path that could not be written.
        path: PathBuf,
        /// Operating-system or serializer diagnostic.
        reason: String,
    },
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scenario(e) => write!(f, "configuration resolution: {e}"),
            // Init errors already name the construction stage themselves.
            Self::Adapter(e @ AdapterError::Init(_)) => write!(f, "{e}"),
            Self::Adapter(e) => write!(f, "episode execution: {e}"),
            Self::OutputWrite { path, reason } => {
                write!(f, "cannot write run output to {}: {reason}", path.display())
            }
        }
    }
}

impl Error for RunError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Scenario(e) => Some(e),
            Self::Adapter(e) => Some(e),
            Self::OutputWrite { .. } => None,
        }
    }
}

impl From<ScenarioError> for RunError {
    fn from(e: ScenarioError) -> Self {
        Self::Scenario(e)
    }
}

impl From<AdapterError> for RunError {
    fn from(e: AdapterError) -> Self {
        Self::Adapter(e)
    }
}

// ── Options & records ──────────────────────────────────────────────

/// Caller-supplied knobs for one scenario run.
#[derive(Clone, Debug)]
pub struct RunOptions {
    /// Path to the declarative scenario file.
    pub scenario: PathBuf,
    /// Directory run records are written under.
    pub output_dir: PathBuf,
    /// Open a rendering window on the engine.
    pub render: bool,
    /// Step budget for the episode.
    pub max_steps: usize,
    /// Progress cadence; 0 disables reporting.
    pub report_every: usize,
}

impl RunOptions {
    /// Options with the standard 100-step budget and 10-step cadence.
    pub fn new(scenario: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            scenario: scenario.into(),
            output_dir: output_dir.into(),
            render: false,
            max_steps: 100,
            report_every: 10,
        }
    }
}

/// The persisted `(config, seed)` pair a run can be reconstructed from.
///
/// Written to `run.yaml` in the run directory. The run id is derived
/// from the map and seed, so re-running an identical scenario overwrites
/// its record. The record describes a deterministic world, not a
/// particular wall-clock execution.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    /// Replay-addressable identifier, `<map>-seed<seed>`.
    pub run_id: String,
    /// The full resolved adapter configuration.
    pub config: AdapterConfig,
}

/// What a completed run hands back to the caller.
#[derive(Clone, Debug)]
pub struct RunOutcome {
    /// Replay-addressable identifier.
    pub run_id: String,
    /// Directory the records were written to.
    pub run_dir: PathBuf,
    /// Episode outcome.
    pub report: EpisodeReport,
}

// ── Runner ─────────────────────────────────────────────────────────

/// Execute one scenario file end to end.
///
/// Resolves the scenario into an adapter configuration, connects the
/// adapter through `backend`, runs a single episode under the forward
/// policy, persists `run.yaml` and `result.yaml`, and closes the
/// adapter. Close is guaranteed on every exit path: the executor closes
/// on episode errors, and the adapter closes itself on drop for
/// everything else.
pub fn run_scenario(
    opts: &RunOptions,
    backend: Backend,
    sink: &mut dyn ProgressSink,
) -> Result<RunOutcome, RunError> {
    let config = resolve_scenario(&opts.scenario, opts.render)?;
    tracing::info!(map = %config.map_name, seed = config.start_seed, "starting scenario run");

    let mut adapter = SimAdapter::connect(config.clone(), backend)?;
    let report = run_episode(
        &mut adapter,
        &mut ForwardPolicy,
        opts.max_steps,
        opts.report_every,
        sink,
    )?;
    adapter.close();

    let run_id = format!("{}-seed{}", config.map_name, config.start_seed);
    let run_dir = opts.output_dir.join(&run_id);
    persist(&run_dir, &run_id, &config, &report)?;
    tracing::info!(run_id = %run_id, steps = report.steps_taken, "scenario run complete");

    Ok(RunOutcome {
        run_id,
        run_dir,
        report,
    })
}

fn persist(
    run_dir: &Path,
    run_id: &str,
    config: &AdapterConfig,
    report: &EpisodeReport,
) -> Result<(), RunError> {
    let write_err = |reason: String| RunError::OutputWrite {
        path: run_dir.to_path_buf(),
        reason,
    };

    fs::create_dir_all(run_dir).map_err(|e| write_err(e.to_string()))?;

    let record = RunRecord {
        run_id: run_id.to_string(),
        config: config.clone(),
    };
    let record_yaml = serde_yaml::to_string(&record).map_err(|e| write_err(e.to_string()))?;
    fs::write(run_dir.join("run.yaml"), record_yaml).map_err(|e| write_err(e.to_string()))?;

    let result_yaml = serde_yaml::to_string(report).map_err(|e| write_err(e.to_string()))?;
    fs::write(run_dir.join("result.yaml"), result_yaml).map_err(|e| write_err(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gauntlet_adapter::{DiscardSink, InitError, ProgressRecord};
    use gauntlet_core::{SimError, TerminalReason};
    use gauntlet_sim::KinematicSim;
    use std::io::Write;

    fn write_scenario(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = fs::File::create(&path).expect("create scenario");
        file.write_all(contents.as_bytes()).expect("write scenario");
        path
    }

    #[test]
    fn end_to_end_run_persists_replayable_records() {
        let dir = tempfile::tempdir().expect("tempdir");
        let scenario = write_scenario(
            dir.path(),
            "intersection.yaml",
            "map_type: \"X\"\nseed: 42\ntraffic_density: 0.1\n",
        );
        let opts = RunOptions::new(scenario, dir.path().join("runs"));
        let mut records: Vec<ProgressRecord> = Vec::new();

        let outcome = run_scenario(&opts, KinematicSim::connect, &mut records).expect("run");

        // The empty intersection is reachable inside the step budget.
        assert_eq!(outcome.report.terminal_reason, TerminalReason::Arrived);
        assert!(outcome.report.steps_taken <= 100);
        assert!(outcome.report.final_ego_state.speed >= 0.0);
        assert_eq!(outcome.run_id, "X-seed42");
        assert!(!records.is_empty());

        // run.yaml carries exactly the resolved (config, seed) pair.
        let record_yaml =
            fs::read_to_string(outcome.run_dir.join("run.yaml")).expect("read run.yaml");
        let record: RunRecord = serde_yaml::from_str(&record_yaml).expect("parse run.yaml");
        assert_eq!(record.run_id, "X-seed42");
        assert_eq!(record.config.map_name, "X");
        assert_eq!(record.config.start_seed, 42);
        assert_eq!(record.config.traffic_density, 0.1);

        assert!(outcome.run_dir.join("result.yaml").exists());
    }

    #[test]
    fn missing_scenario_file_fails_in_resolution() {
        let dir = tempfile::tempdir().expect("tempdir");
        let opts = RunOptions::new(dir.path().join("absent.yaml"), dir.path());
        let err = run_scenario(&opts, KinematicSim::connect, &mut DiscardSink).unwrap_err();
        assert!(matches!(err, RunError::Scenario(ScenarioError::Io { .. })));
        assert!(err.to_string().starts_with("configuration resolution"));
    }

    #[test]
    fn wrong_extension_fails_before_parsing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let scenario = write_scenario(dir.path(), "s.json", "map_type: X\n");
        let opts = RunOptions::new(scenario, dir.path());
        let err = run_scenario(&opts, KinematicSim::connect, &mut DiscardSink).unwrap_err();
        assert!(matches!(
            err,
            RunError::Scenario(ScenarioError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn render_request_fails_adapter_construction_on_headless_backend() {
        let dir = tempfile::tempdir().expect("tempdir");
        let scenario = write_scenario(
            dir.path(),
            "s.yaml",
            "map_type: X\ntraffic_density: 0.1\n",
        );
        let mut opts = RunOptions::new(scenario, dir.path());
        opts.render = true;
        let err = run_scenario(&opts, KinematicSim::connect, &mut DiscardSink).unwrap_err();
        match err {
            RunError::Adapter(AdapterError::Init(InitError::Backend(
                SimError::RenderUnavailable,
            ))) => {}
            other => panic!("expected Init(Backend(RenderUnavailable)), got {other:?}"),
        }
        assert!(err.to_string().contains("adapter construction"));
    }

    #[test]
    fn unwritable_output_directory_is_an_output_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let scenario = write_scenario(
            dir.path(),
            "s.yaml",
            "map_type: X\ntraffic_density: 0.0\n",
        );
        // A plain file where the output directory should go.
        let blocked = dir.path().join("blocked");
        fs::write(&blocked, b"").expect("write blocker");

        let opts = RunOptions::new(scenario, &blocked);
        let err = run_scenario(&opts, KinematicSim::connect, &mut DiscardSink).unwrap_err();
        assert!(matches!(err, RunError::OutputWrite { .. }));
    }

    #[test]
    fn rerunning_a_scenario_overwrites_its_record() {
        let dir = tempfile::tempdir().expect("tempdir");
        let scenario = write_scenario(
            dir.path(),
            "s.yaml",
            "map_type: X\nseed: 7\ntraffic_density: 0.0\n",
        );
        let opts = RunOptions::new(scenario, dir.path().join("runs"));
        let first = run_scenario(&opts, KinematicSim::connect, &mut DiscardSink).expect("run 1");
        let second = run_scenario(&opts, KinematicSim::connect, &mut DiscardSink).expect("run 2");
        assert_eq!(first.run_dir, second.run_dir);
        assert_eq!(first.report, second.report, "identical world, identical run");
    }
}
