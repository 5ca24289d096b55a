//! Adapter configuration and validation.
//!
//! [`AdapterConfig`] is the explicit, validated replacement for the
//! ambient option mapping driving simulators usually take: constructed
//! once, passed by value into [`SimAdapter::connect`](crate::SimAdapter::connect),
//! and never mutated afterwards.

use std::error::Error;
use std::fmt;

use serde::{Deserialize, Serialize};

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`AdapterConfig::validate()`].
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// `map_name` is empty.
    MapNameEmpty,
    /// `traffic_density` is NaN or outside `[0, 1]`.
    TrafficDensityOutOfRange {
        /// The rejected value.
        value: f64,
    },
    /// `num_scenarios` is zero.
    NoScenarios,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MapNameEmpty => write!(f, "map_name must not be empty"),
            Self::TrafficDensityOutOfRange { value } => {
                write!(f, "traffic_density must be in [0, 1], got {value}")
            }
            Self::NoScenarios => write!(f, "num_scenarios must be at least 1"),
        }
    }
}

impl Error for ConfigError {}

// ── AdapterConfig ──────────────────────────────────────────────────

/// Complete configuration for constructing a simulation adapter.
///
/// `(map_name, start_seed, num_scenarios)` deterministically reproduce
/// an identical initial world on every reset with the same
/// configuration. Replay rests on that guarantee.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AdapterConfig {
    /// Open a rendering window on the native engine.
    pub use_render: bool,
    /// Hand control to a human driver instead of the submitted actions.
    pub manual_control: bool,
    /// Map token string describing the road topology (e.g. `"X"`, `"SCS"`).
    pub map_name: String,
    /// RNG seed: determines map and traffic instantiation.
    pub start_seed: u64,
    /// Number of distinct seeded scenario variants available.
    pub num_scenarios: usize,
    /// Traffic density in `[0, 1]`.
    pub traffic_density: f64,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            use_render: false,
            manual_control: false,
            map_name: "X".to_string(),
            start_seed: 0,
            num_scenarios: 1,
            traffic_density: 0.1,
        }
    }
}

impl AdapterConfig {
    /// Validate all structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // 1. Map token must name at least one road block.
        if self.map_name.is_empty() {
            return Err(ConfigError::MapNameEmpty);
        }
        // 2. Density is a fraction of lane capacity.
        if !self.traffic_density.is_finite()
            || self.traffic_density < 0.0
            || self.traffic_density > 1.0
        {
            return Err(ConfigError::TrafficDensityOutOfRange {
                value: self.traffic_density,
            });
        }
        // 3. A world with zero scenario variants cannot be reset.
        if self.num_scenarios == 0 {
            return Err(ConfigError::NoScenarios);
        }
        Ok(())
    }
}
