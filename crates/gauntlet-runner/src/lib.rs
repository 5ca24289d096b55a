//! Scenario runner: resolve, execute, persist.
//!
//! Composes the scenario resolver, the simulation adapter, and the
//! episode executor for one scenario file, and persists a run record
//! that replay can later reconstruct the run from. The stub extension
//! interfaces for benchmark suites, model training, and replay live in
//! [`stubs`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod run;
pub mod stubs;

pub use run::{run_scenario, RunError, RunOptions, RunOutcome, RunRecord};
pub use stubs::{
    AdversaryTrainer, BenchmarkSuite, ModelArtifact, PolicyArtifact, RiskModelTrainer,
    RunReplayer, SuiteOutcome,
};
