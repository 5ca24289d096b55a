//! Test utilities and scripted doubles for Gauntlet development.
//!
//! Provides [`ScriptedSim`], a [`Simulator`] implementation that replays
//! pre-programmed step results while recording everything the caller did
//! to it, plus small fixture helpers for building step results.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use gauntlet_core::{
    Action, ActionSpace, Observation, ObservationSpace, RawVehicleState, SimError, Simulator,
    StepInfo, StepResult,
};

/// A non-terminal step result with the given reward and a zeroed
/// observation of length `shape`.
pub fn ongoing_step(shape: usize, reward: f64) -> StepResult {
    StepResult {
        observation: vec![0.0; shape],
        reward,
        terminated: false,
        truncated: false,
        info: StepInfo::default(),
    }
}

/// A terminal step result with the given outcome flags.
pub fn terminal_step(shape: usize, reward: f64, info: StepInfo) -> StepResult {
    StepResult {
        observation: vec![0.0; shape],
        reward,
        terminated: true,
        truncated: false,
        info,
    }
}

/// A truncated (horizon-cut) step result.
pub fn truncated_step(shape: usize, reward: f64) -> StepResult {
    StepResult {
        observation: vec![0.0; shape],
        reward,
        terminated: false,
        truncated: true,
        info: StepInfo::default(),
    }
}

/// Everything a [`ScriptedSim`] has observed, shared with the test.
#[derive(Debug, Default)]
pub struct ScriptLog {
    /// Actions received by `step`, in order.
    pub actions: Vec<Action>,
    /// Seeds received by `reset`, in order.
    pub reset_seeds: Vec<u64>,
    /// Number of `close` calls.
    pub close_calls: usize,
}

/// Shared handle for inspecting a [`ScriptedSim`] after it has been
/// consumed by an adapter.
#[derive(Clone, Debug, Default)]
pub struct ScriptHandle(Rc<RefCell<ScriptLog>>);

impl ScriptHandle {
    pub fn actions(&self) -> Vec<Action> {
        self.0.borrow().actions.clone()
    }

    pub fn step_count(&self) -> usize {
        self.0.borrow().actions.len()
    }

    pub fn reset_seeds(&self) -> Vec<u64> {
        self.0.borrow().reset_seeds.clone()
    }

    pub fn close_calls(&self) -> usize {
        self.0.borrow().close_calls
    }
}

/// Scripted [`Simulator`] double.
///
/// Prepare it with [`push_step`](ScriptedSim::push_step) results before
/// handing it to the code under test; once the script runs dry, `step`
/// keeps returning non-terminal zero-reward results. Every interaction
/// is recorded in the shared [`ScriptLog`].
pub struct ScriptedSim {
    action_space: ActionSpace,
    observation_space: ObservationSpace,
    script: VecDeque<StepResult>,
    vehicle: RawVehicleState,
    fail_next_step: Option<SimError>,
    fail_reset: Option<SimError>,
    log: Rc<RefCell<ScriptLog>>,
}

impl ScriptedSim {
    /// A scripted simulator with the standard `[steering, throttle]`
    /// action space and an observation vector of length 8.
    pub fn new() -> (Self, ScriptHandle) {
        let log = Rc::new(RefCell::new(ScriptLog::default()));
        let sim = Self {
            action_space: ActionSpace::steering_throttle(),
            observation_space: ObservationSpace { shape: 8 },
            script: VecDeque::new(),
            vehicle: RawVehicleState {
                position: [0.0, 0.0],
                velocity: [0.0, 0.0],
                heading: 0.0,
                on_lane: true,
            },
            fail_next_step: None,
            fail_reset: None,
            log: Rc::clone(&log),
        };
        (sim, ScriptHandle(log))
    }

    /// Override the advertised observation space.
    pub fn set_observation_space(&mut self, shape: usize) {
        self.observation_space = ObservationSpace { shape };
    }

    /// Override the vehicle state returned by `vehicle_state`.
    pub fn set_vehicle(&mut self, vehicle: RawVehicleState) {
        self.vehicle = vehicle;
    }

    /// Queue the next step result.
    pub fn push_step(&mut self, result: StepResult) {
        self.script.push_back(result);
    }

    /// Make the next `step` call fail with `err`.
    pub fn fail_next_step(&mut self, err: SimError) {
        self.fail_next_step = Some(err);
    }

    /// Make every `reset` call fail with `err`.
    pub fn fail_reset(&mut self, err: SimError) {
        self.fail_reset = Some(err);
    }

    fn obs(&self) -> Observation {
        vec![0.0; self.observation_space.shape]
    }
}

impl Simulator for ScriptedSim {
    fn action_space(&self) -> ActionSpace {
        self.action_space
    }

    fn observation_space(&self) -> ObservationSpace {
        self.observation_space
    }

    fn reset(&mut self, seed: u64) -> Result<(Observation, StepInfo), SimError> {
        self.log.borrow_mut().reset_seeds.push(seed);
        if let Some(err) = self.fail_reset.clone() {
            return Err(err);
        }
        Ok((self.obs(), StepInfo::default()))
    }

    fn step(&mut self, action: &Action) -> Result<StepResult, SimError> {
        self.log.borrow_mut().actions.push(action.clone());
        if let Some(err) = self.fail_next_step.take() {
            return Err(err);
        }
        Ok(self
            .script
            .pop_front()
            .unwrap_or_else(|| ongoing_step(self.observation_space.shape, 0.0)))
    }

    fn vehicle_state(&self) -> RawVehicleState {
        self.vehicle
    }

    fn close(&mut self) {
        self.log.borrow_mut().close_calls += 1;
    }
}
