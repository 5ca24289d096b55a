//! Step results, typed outcome flags, and terminal classification.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::action::Observation;

/// Typed per-step outcome flags.
///
/// Replaces the loose info mapping of gym-style simulators with an
/// explicit struct: the flags explain *why* `terminated` is set, and
/// they are informative rather than mutually required.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepInfo {
    /// The ego vehicle collided with another object.
    pub crash: bool,
    /// The ego vehicle reached its destination.
    pub arrive_dest: bool,
    /// The ego vehicle left the drivable area.
    pub out_of_road: bool,
}

/// Result of advancing the simulator one control tick.
#[derive(Clone, Debug, PartialEq)]
pub struct StepResult {
    /// Observation after the tick.
    pub observation: Observation,
    /// Scalar reward for the tick.
    pub reward: f64,
    /// The episode ended inside the simulator (crash, arrival, ...).
    pub terminated: bool,
    /// The episode was cut off by the simulator's own horizon.
    pub truncated: bool,
    /// Typed outcome flags for this tick.
    pub info: StepInfo,
}

impl StepResult {
    /// Whether this step ended the episode, for either reason.
    pub fn is_final(&self) -> bool {
        self.terminated || self.truncated
    }
}

/// Classified cause of episode end.
///
/// Resolved exactly once per episode by the executor. `Crash` takes
/// precedence over `Arrived` when a step somehow reports both, an
/// assumption pending confirmation against a real engine's semantics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerminalReason {
    /// The episode terminated with a collision.
    Crash,
    /// The episode terminated at the destination.
    Arrived,
    /// The simulator truncated the episode at its own horizon.
    TimeLimit,
    /// The executor's step budget ran out without a simulator-side end.
    StepBudgetExhausted,
}

impl fmt::Display for TerminalReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Crash => write!(f, "crash"),
            Self::Arrived => write!(f, "arrived"),
            Self::TimeLimit => write!(f, "time limit"),
            Self::StepBudgetExhausted => write!(f, "step budget exhausted"),
        }
    }
}
