//! Adapter-contract error types.
//!
//! These are caller-facing contract violations and wrapped engine
//! failures. None of them is ever silently recovered: the adapter
//! propagates, the episode executor cleans up and re-raises, and the
//! CLI turns them into a one-line diagnostic.

use std::error::Error;
use std::fmt;

use gauntlet_core::SimError;

use crate::config::ConfigError;

// ── InitError ──────────────────────────────────────────────────────

/// Why adapter construction failed.
#[derive(Clone, Debug, PartialEq)]
pub enum InitError {
    /// The configuration failed validation.
    Config(ConfigError),
    /// The simulator backend refused to construct an engine instance.
    Backend(SimError),
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "invalid configuration: {e}"),
            Self::Backend(e) => write!(f, "backend construction failed: {e}"),
        }
    }
}

impl Error for InitError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Backend(e) => Some(e),
        }
    }
}

impl From<ConfigError> for InitError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ── AdapterError ───────────────────────────────────────────────────

/// Errors from the adapter contract.
#[derive(Clone, Debug, PartialEq)]
pub enum AdapterError {
    /// Adapter construction failed.
    Init(InitError),
    /// The submitted action's shape does not match the action space.
    /// The simulator state is untouched: a rejected step never happened.
    InvalidAction {
        /// Component count the action space requires.
        expected: usize,
        /// Component count the action actually had.
        got: usize,
    },
    /// The operation requires an active episode but no reset has
    /// happened yet.
    NoActiveEpisode,
    /// The adapter has been closed; only further `close` calls are valid.
    Closed,
    /// The simulator engine failed during reset or step. Wrapped and
    /// re-raised, never interpreted.
    Sim(SimError),
}

impl fmt::Display for AdapterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init(e) => write!(f, "adapter construction: {e}"),
            Self::InvalidAction { expected, got } => {
                write!(f, "action has {got} components, action space requires {expected}")
            }
            Self::NoActiveEpisode => write!(f, "no active episode, call reset first"),
            Self::Closed => write!(f, "adapter is closed"),
            Self::Sim(e) => write!(f, "simulator: {e}"),
        }
    }
}

impl Error for AdapterError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Init(e) => Some(e),
            Self::Sim(e) => Some(e),
            _ => None,
        }
    }
}

impl From<InitError> for AdapterError {
    fn from(e: InitError) -> Self {
        Self::Init(e)
    }
}

impl From<SimError> for AdapterError {
    fn from(e: SimError) -> Self {
        Self::Sim(e)
    }
}
