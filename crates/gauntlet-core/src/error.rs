//! Simulator-side error types.
//!
//! Failures inside the engine are opaque to the layers above: they are
//! wrapped and re-raised by the adapter, never interpreted.

use std::error::Error;
use std::fmt;

/// An opaque failure inside the simulator engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SimError {
    /// The engine reported a failure. The reason is the engine's own
    /// diagnostic, passed through verbatim.
    Backend {
        /// Engine-provided description of the failure.
        reason: String,
    },
    /// Rendering was requested but no rendering backend is available
    /// (e.g. a headless environment).
    RenderUnavailable,
}

impl SimError {
    /// Convenience constructor for [`SimError::Backend`].
    pub fn backend(reason: impl Into<String>) -> Self {
        Self::Backend {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Backend { reason } => write!(f, "simulator backend: {reason}"),
            Self::RenderUnavailable => write!(f, "rendering backend unavailable"),
        }
    }
}

impl Error for SimError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_display_carries_reason() {
        let err = SimError::backend("native engine refused map 'Q'");
        assert_eq!(
            err.to_string(),
            "simulator backend: native engine refused map 'Q'"
        );
    }

    #[test]
    fn render_unavailable_display() {
        assert_eq!(
            SimError::RenderUnavailable.to_string(),
            "rendering backend unavailable"
        );
    }
}
