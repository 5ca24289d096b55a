//! Core types and the simulator seam for the Gauntlet scenario harness.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! contract every other crate composes against: control actions and their
//! space descriptors, ego-vehicle state, step results with typed outcome
//! flags, terminal reasons, the per-subsystem error types, and the
//! [`Simulator`] trait, the single seam between this system and whatever
//! driving engine sits behind it.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod action;
pub mod error;
pub mod sim;
pub mod state;
pub mod step;

pub use action::{Action, ActionSpace, Observation, ObservationSpace};
pub use error::SimError;
pub use sim::Simulator;
pub use state::{EgoState, Position, RawVehicleState};
pub use step::{StepInfo, StepResult, TerminalReason};
