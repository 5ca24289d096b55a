//! Configuration-stage error types.
//!
//! All of these are fatal to the current run and carry enough context to
//! name the offending file, field, or value in a one-line diagnostic.

use std::error::Error;
use std::fmt;
use std::path::PathBuf;

/// Errors from scenario loading and resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScenarioError {
    /// The file extension is not a recognized declarative format.
    /// Nothing was parsed.
    UnsupportedFormat {
        /// The offending path.
        path: PathBuf,
    },
    /// The file could not be read.
    Io {
        /// The offending path.
        path: PathBuf,
        /// Operating-system error description.
        reason: String,
    },
    /// The document is not well-formed YAML, or carries unrecognized keys.
    Parse {
        /// Parser diagnostic.
        reason: String,
    },
    /// A required field is absent.
    MissingField {
        /// Name of the missing field.
        field: &'static str,
    },
    /// A field is present but its value is out of range.
    InvalidValue {
        /// Name of the offending field.
        field: &'static str,
        /// What was wrong with it.
        reason: String,
    },
}

impl fmt::Display for ScenarioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedFormat { path } => {
                write!(
                    f,
                    "scenario file must be YAML (.yaml or .yml): {}",
                    path.display()
                )
            }
            Self::Io { path, reason } => {
                write!(f, "cannot read scenario {}: {reason}", path.display())
            }
            Self::Parse { reason } => write!(f, "malformed scenario: {reason}"),
            Self::MissingField { field } => {
                write!(f, "scenario is missing required field '{field}'")
            }
            Self::InvalidValue { field, reason } => {
                write!(f, "scenario field '{field}' is invalid: {reason}")
            }
        }
    }
}

impl Error for ScenarioError {}
