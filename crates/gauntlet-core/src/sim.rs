//! The [`Simulator`] trait: the seam to the external driving engine.

use crate::action::{Action, ActionSpace, Observation, ObservationSpace};
use crate::error::SimError;
use crate::state::RawVehicleState;
use crate::step::{StepInfo, StepResult};

/// A driving simulator engine, viewed through the adapter's contract.
///
/// Implementations own the native engine state (physics, road network,
/// traffic, optional rendering window). The adapter holds exactly one
/// boxed instance, drives it single-threaded, and enforces the lifecycle
/// around it, so implementations may assume calls arrive in `reset` /
/// `step` order from one thread.
///
/// # Determinism
///
/// Identical `(configuration, seed)` pairs must produce bit-identical
/// initial observations and vehicle state on every [`reset`](Self::reset),
/// across processes and hosts. Implementations must draw all randomness
/// from the given seed; introducing an unseeded source anywhere breaks
/// the replay contract of the whole system.
pub trait Simulator {
    /// Shape and conventional bounds of accepted actions.
    ///
    /// Pure query, valid before any reset, constant for the lifetime of
    /// the instance.
    fn action_space(&self) -> ActionSpace;

    /// Shape of returned observations.
    ///
    /// Same availability and constancy as [`action_space`](Self::action_space).
    fn observation_space(&self) -> ObservationSpace;

    /// Reinitialize to a fresh episode seeded with `seed`.
    fn reset(&mut self, seed: u64) -> Result<(Observation, StepInfo), SimError>;

    /// Advance exactly one control tick.
    ///
    /// The adapter has already validated the action's shape against
    /// [`action_space`](Self::action_space); implementations handle
    /// component *ranges* according to their own documented behavior.
    fn step(&mut self, action: &Action) -> Result<StepResult, SimError>;

    /// The engine-native vehicle state after the most recent step or
    /// reset.
    ///
    /// Only called between a successful `reset` and `close`; the
    /// adapter guards the no-active-episode case.
    fn vehicle_state(&self) -> RawVehicleState;

    /// Release engine-owned resources (rendering window, native state).
    ///
    /// Called at most once by the adapter, which also drops the instance
    /// afterwards. Default: nothing to release.
    fn close(&mut self) {}
}
