//! Declarative scenario files and their resolution.
//!
//! A scenario is a small YAML document describing one reproducible
//! episode family: map topology, seed, and traffic density. This crate
//! parses and validates those files and projects them one-way into an
//! [`AdapterConfig`](gauntlet_adapter::AdapterConfig); the reverse
//! direction never exists.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod schema;

pub use error::ScenarioError;
pub use schema::{resolve_scenario, ScenarioConfig, DEFAULT_SEED};
