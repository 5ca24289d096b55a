//! Reference kinematic simulator backend.
//!
//! A headless, fully deterministic [`Simulator`](gauntlet_core::Simulator)
//! implementation: seeded route and traffic generation, bicycle-style
//! vehicle kinematics, a range-sensor observation vector, and a
//! progress-shaped reward. It exists so the demo, the scenario runner,
//! and the determinism suites execute end-to-end without a native
//! engine. A binding to a real driving engine would replace
//! [`KinematicSim::connect`] and nothing else.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod kinematic;
pub mod route;

pub use kinematic::KinematicSim;
pub use route::{Obstacle, RoutePlan};
