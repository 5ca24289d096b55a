//! Episode execution: drive one adapter through a bounded episode.
//!
//! [`run_episode`] steps the adapter with a supplied [`Policy`] until the
//! simulator ends the episode or the step budget runs out, emitting a
//! progress record at a fixed cadence and classifying the outcome into a
//! single [`TerminalReason`].

use serde::Serialize;

use gauntlet_core::{EgoState, Position, StepResult, TerminalReason};

use crate::adapter::SimAdapter;
use crate::error::AdapterError;
use crate::policy::Policy;

// ── Progress reporting ─────────────────────────────────────────────

/// Snapshot emitted at the reporting cadence.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProgressRecord {
    /// 1-based step index the record was captured at.
    pub step: usize,
    /// Ego position after this step.
    pub position: Position,
    /// Ego speed in m/s after this step.
    pub speed: f64,
    /// Reward returned by this step.
    pub reward: f64,
    /// Whether the ego vehicle is on a drivable lane.
    pub on_lane: bool,
}

/// Receives progress records during episode execution.
///
/// The CLI installs a stdout reporter here; tests collect into a `Vec`.
pub trait ProgressSink {
    /// Handle one progress record.
    fn record(&mut self, record: &ProgressRecord);
}

impl ProgressSink for Vec<ProgressRecord> {
    fn record(&mut self, record: &ProgressRecord) {
        self.push(*record);
    }
}

/// Sink that drops every record, for callers without reporting needs.
#[derive(Clone, Copy, Debug, Default)]
pub struct DiscardSink;

impl ProgressSink for DiscardSink {
    fn record(&mut self, _record: &ProgressRecord) {}
}

// ── Episode result ─────────────────────────────────────────────────

/// Outcome of one executed episode.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct EpisodeReport {
    /// Number of steps actually executed.
    pub steps_taken: usize,
    /// Classified cause of episode end.
    pub terminal_reason: TerminalReason,
    /// Ego snapshot after the final step.
    pub final_ego_state: EgoState,
    /// Sum of per-step rewards.
    pub total_reward: f64,
}

/// Resolve the single terminal reason for a final step result.
///
/// `Crash` takes precedence over `Arrived` when both flags are set.
/// A termination carrying neither flag is classified as `Crash` as well:
/// the simulator ended the episode for a reason it did not explain, and
/// failure is the conservative reading.
fn classify(result: &StepResult) -> TerminalReason {
    if result.terminated {
        if result.info.crash {
            TerminalReason::Crash
        } else if result.info.arrive_dest {
            TerminalReason::Arrived
        } else {
            TerminalReason::Crash
        }
    } else {
        TerminalReason::TimeLimit
    }
}

// ── Executor ───────────────────────────────────────────────────────

/// Run one bounded episode.
///
/// Resets the adapter, then steps with actions from `policy` until the
/// simulator terminates or truncates the episode, or `max_steps` have
/// run, whichever comes first. At every step index that is a multiple
/// of `report_every` (0 disables reporting), the current ego state and
/// step reward go to `sink`.
///
/// # Errors
///
/// Any adapter error is propagated immediately after a best-effort
/// `close()`. The executor never swallows adapter failures.
pub fn run_episode(
    adapter: &mut SimAdapter,
    policy: &mut dyn Policy,
    max_steps: usize,
    report_every: usize,
    sink: &mut dyn ProgressSink,
) -> Result<EpisodeReport, AdapterError> {
    let reset = adapter.reset(None);
    let (mut observation, _info) = close_on_err(adapter, reset)?;

    let mut steps_taken = 0;
    let mut total_reward = 0.0;
    let mut early_reason = None;

    for step in 1..=max_steps {
        let queried = adapter.ego_state();
        let ego = close_on_err(adapter, queried)?;
        let action = policy.act(&ego, &observation);

        let stepped = adapter.step(&action);
        let result = close_on_err(adapter, stepped)?;
        steps_taken = step;
        total_reward += result.reward;

        if report_every != 0 && step % report_every == 0 {
            let queried = adapter.ego_state();
            let ego = close_on_err(adapter, queried)?;
            sink.record(&ProgressRecord {
                step,
                position: ego.position,
                speed: ego.speed,
                reward: result.reward,
                on_lane: ego.on_lane,
            });
        }

        if result.is_final() {
            early_reason = Some(classify(&result));
            break;
        }
        observation = result.observation;
    }

    let terminal_reason = early_reason.unwrap_or(TerminalReason::StepBudgetExhausted);
    let queried = adapter.ego_state();
    let final_ego_state = close_on_err(adapter, queried)?;
    tracing::debug!(steps_taken, %terminal_reason, "episode finished");

    Ok(EpisodeReport {
        steps_taken,
        terminal_reason,
        final_ego_state,
        total_reward,
    })
}

/// Best-effort cleanup: close the adapter if `result` is an error, then
/// hand the result back unchanged.
fn close_on_err<T>(
    adapter: &mut SimAdapter,
    result: Result<T, AdapterError>,
) -> Result<T, AdapterError> {
    if result.is_err() {
        adapter.close();
    }
    result
}
