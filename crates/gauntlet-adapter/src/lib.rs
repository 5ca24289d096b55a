//! Simulation adapter and episode executor for the Gauntlet harness.
//!
//! [`SimAdapter`] is the single seam between this system and the external
//! driving simulator: it owns one engine instance, normalizes the
//! reset/step/close contract, and extracts structured ego-vehicle state
//! from the engine's raw internals. [`run_episode`] drives an adapter
//! through one bounded episode with a supplied [`Policy`], reporting
//! progress at a fixed cadence and classifying the outcome.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod adapter;
pub mod config;
pub mod episode;
pub mod error;
pub mod policy;

pub use adapter::{Backend, SimAdapter};
pub use config::{AdapterConfig, ConfigError};
pub use episode::{run_episode, DiscardSink, EpisodeReport, ProgressRecord, ProgressSink};
pub use error::{AdapterError, InitError};
pub use policy::{ForwardPolicy, Policy};
