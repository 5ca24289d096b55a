//! Gauntlet: a scenario gauntlet for autonomy stacks.
//!
//! This is the top-level facade crate that re-exports the public API
//! from all Gauntlet sub-crates. For most users, adding `gauntlet` as a
//! single dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use gauntlet::prelude::*;
//! use gauntlet::sim::KinematicSim;
//!
//! let config = AdapterConfig {
//!     map_name: "X".to_string(),
//!     start_seed: 42,
//!     traffic_density: 0.1,
//!     ..AdapterConfig::default()
//! };
//! let mut adapter = SimAdapter::connect(config, KinematicSim::connect).unwrap();
//! let report = run_episode(&mut adapter, &mut ForwardPolicy, 100, 10, &mut DiscardSink).unwrap();
//! assert!(report.steps_taken <= 100);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `gauntlet-core` | Actions, spaces, ego state, step results, the `Simulator` seam |
//! | [`adapter`] | `gauntlet-adapter` | `SimAdapter`, configuration, episode executor, policies |
//! | [`scenario`] | `gauntlet-scenario` | Declarative scenario files and resolution |
//! | [`sim`] | `gauntlet-sim` | Reference kinematic engine backend |
//! | [`runner`] | `gauntlet-runner` | One-scenario runs, persistence, extension stubs |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and the simulator seam (`gauntlet-core`).
pub use gauntlet_core as types;

/// Adapter, configuration, and episode execution (`gauntlet-adapter`).
pub use gauntlet_adapter as adapter;

/// Declarative scenarios and resolution (`gauntlet-scenario`).
pub use gauntlet_scenario as scenario;

/// Reference kinematic engine backend (`gauntlet-sim`).
pub use gauntlet_sim as sim;

/// Scenario runner and extension-point interfaces (`gauntlet-runner`).
pub use gauntlet_runner as runner;

/// Common imports for typical Gauntlet usage.
///
/// ```rust
/// use gauntlet::prelude::*;
/// ```
pub mod prelude {
    // Core contract types
    pub use gauntlet_core::{
        Action, ActionSpace, EgoState, Observation, ObservationSpace, Position, SimError,
        Simulator, StepInfo, StepResult, TerminalReason,
    };

    // Adapter and executor
    pub use gauntlet_adapter::{
        run_episode, AdapterConfig, AdapterError, DiscardSink, EpisodeReport, ForwardPolicy,
        Policy, ProgressRecord, ProgressSink, SimAdapter,
    };

    // Scenarios
    pub use gauntlet_scenario::{resolve_scenario, ScenarioConfig, ScenarioError};

    // Runner
    pub use gauntlet_runner::{run_scenario, RunError, RunOptions, RunOutcome, RunRecord};
}
