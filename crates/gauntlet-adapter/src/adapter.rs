//! The simulation adapter: one owned engine behind a stable contract.
//!
//! [`SimAdapter`] presents reset/step/close, action- and observation-space
//! queries, and structured ego-state extraction over a boxed [`Simulator`].
//! Every other component interacts with the engine exclusively through
//! this type.
//!
//! # Lifecycle
//!
//! `Constructed -> (Active <-> Active) -> Closed`. Construction validates
//! the configuration and builds the engine; the first `reset` activates an
//! episode; further `reset` calls abandon the current episode and start a
//! fresh one; `close` is terminal and idempotent. Dropping an adapter
//! closes it, so engine resources are released on every exit path,
//! including propagated errors, without caller discipline.
//!
//! # Ownership
//!
//! Each adapter owns exactly one simulator instance, exclusively. All
//! mutating operations take `&mut self`; sharing one adapter across
//! threads is a caller error the type system already prevents.

use gauntlet_core::{
    Action, ActionSpace, EgoState, Observation, ObservationSpace, SimError, Simulator, StepInfo,
    StepResult,
};

use crate::config::AdapterConfig;
use crate::error::{AdapterError, InitError};

/// Builds a boxed simulator engine from a validated configuration.
///
/// This is the binding point for engine backends: the reference kinematic
/// backend ships one, and a native-engine binding would provide its own.
pub type Backend = fn(&AdapterConfig) -> Result<Box<dyn Simulator>, SimError>;

/// Simulation adapter owning one simulator instance.
///
/// # Example
///
/// ```ignore
/// let mut adapter = SimAdapter::connect(config, KinematicSim::connect)?;
/// let (obs, _info) = adapter.reset(None)?;
/// let result = adapter.step(&Action::new(0.0, 0.5))?;
/// let ego = adapter.ego_state()?;
/// adapter.close();
/// ```
pub struct SimAdapter {
    config: AdapterConfig,
    /// `None` once closed. Taking the box is what makes `close` terminal.
    sim: Option<Box<dyn Simulator>>,
    episode_active: bool,
}

impl SimAdapter {
    /// Validate `config` and construct the engine through `backend`.
    ///
    /// # Errors
    ///
    /// [`AdapterError::Init`] if the configuration is rejected or the
    /// backend cannot construct an engine (e.g. rendering requested in a
    /// headless environment).
    pub fn connect<F>(config: AdapterConfig, backend: F) -> Result<Self, AdapterError>
    where
        F: FnOnce(&AdapterConfig) -> Result<Box<dyn Simulator>, SimError>,
    {
        config.validate().map_err(InitError::Config)?;
        let sim = backend(&config).map_err(InitError::Backend)?;
        tracing::debug!(map = %config.map_name, seed = config.start_seed, "adapter connected");
        Ok(Self {
            config,
            sim: Some(sim),
            episode_active: false,
        })
    }

    /// The configuration this adapter was constructed with.
    ///
    /// Immutable for the adapter's lifetime; seed overrides passed to
    /// [`reset`](Self::reset) never show up here.
    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    /// Shape and conventional bounds of accepted actions.
    ///
    /// Valid after construction, before or after reset.
    pub fn action_space(&self) -> Result<ActionSpace, AdapterError> {
        Ok(self.sim()?.action_space())
    }

    /// Shape of returned observations.
    ///
    /// Same availability as [`action_space`](Self::action_space).
    pub fn observation_space(&self) -> Result<ObservationSpace, AdapterError> {
        Ok(self.sim()?.observation_space())
    }

    /// Reinitialize the owned engine to a fresh episode.
    ///
    /// A `seed_override` takes precedence over the configuration's
    /// `start_seed` for this call only. Identical `(config, seed)` pairs
    /// produce bit-identical initial observations and ego state; the
    /// adapter adds no randomness of its own.
    pub fn reset(
        &mut self,
        seed_override: Option<u64>,
    ) -> Result<(Observation, StepInfo), AdapterError> {
        let seed = seed_override.unwrap_or(self.config.start_seed);
        let result = self.sim_mut()?.reset(seed).map_err(AdapterError::Sim)?;
        self.episode_active = true;
        tracing::debug!(seed, "episode reset");
        Ok(result)
    }

    /// Advance the engine exactly one control tick.
    ///
    /// # Errors
    ///
    /// [`AdapterError::InvalidAction`] if the action's shape does not
    /// match the action space. The check runs before the engine is
    /// touched, so a rejected step never mutates simulator state. Values are not
    /// clamped: range handling belongs to the engine's documented
    /// behavior.
    pub fn step(&mut self, action: &Action) -> Result<StepResult, AdapterError> {
        let space = self.sim()?.action_space();
        if !self.episode_active {
            return Err(AdapterError::NoActiveEpisode);
        }
        if !space.matches(action) {
            return Err(AdapterError::InvalidAction {
                expected: space.dim,
                got: action.len(),
            });
        }
        self.sim_mut()?.step(action).map_err(AdapterError::Sim)
    }

    /// Structured ego-vehicle snapshot, extracted fresh from the engine.
    ///
    /// Reflects the state after the most recent `step` or `reset`; the
    /// adapter never caches it.
    ///
    /// # Errors
    ///
    /// [`AdapterError::NoActiveEpisode`] before the first reset.
    pub fn ego_state(&self) -> Result<EgoState, AdapterError> {
        let sim = self.sim()?;
        if !self.episode_active {
            return Err(AdapterError::NoActiveEpisode);
        }
        Ok(EgoState::from_raw(&sim.vehicle_state()))
    }

    /// Release the owned engine and its resources.
    ///
    /// Idempotent: the first call closes the engine, every further call
    /// is a no-op. After closing, every operation except `close` fails
    /// with [`AdapterError::Closed`].
    pub fn close(&mut self) {
        if let Some(mut sim) = self.sim.take() {
            sim.close();
            self.episode_active = false;
            tracing::debug!("adapter closed");
        }
    }

    /// Whether `close` has been called.
    pub fn is_closed(&self) -> bool {
        self.sim.is_none()
    }

    fn sim(&self) -> Result<&dyn Simulator, AdapterError> {
        self.sim.as_deref().ok_or(AdapterError::Closed)
    }

    fn sim_mut(&mut self) -> Result<&mut (dyn Simulator + 'static), AdapterError> {
        self.sim.as_deref_mut().ok_or(AdapterError::Closed)
    }
}

impl Drop for SimAdapter {
    fn drop(&mut self) {
        self.close();
    }
}

impl std::fmt::Debug for SimAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimAdapter")
            .field("map_name", &self.config.map_name)
            .field("start_seed", &self.config.start_seed)
            .field("episode_active", &self.episode_active)
            .field("closed", &self.is_closed())
            .finish()
    }
}
