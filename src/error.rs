//! Error types for tour construction, search, and instance loading.

use std::process::ExitCode;
use thiserror::Error;

/// Result type alias used throughout the crate.
pub type TspResult<T> = std::result::Result<T, TspError>;

/// Errors reported by the engines, the loader, and the command surface.
///
/// [`TspError::PolicyRefusal`] is not a failure: it tells the caller that the
/// exact engine was asked to enumerate an instance above its safety threshold
/// and can be retried with an override or replaced by a heuristic.
#[derive(Error, Debug)]
pub enum TspError {
    /// A working buffer could not be reserved.
    #[error("allocation failed: {what}")]
    Allocation {
        /// Buffer that could not be obtained.
        what: &'static str,
    },

    /// Rejected input: bad dimension, parameter, or tour size.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Exact search refused because the dimension exceeds the threshold.
    #[error("exact search refused: dimension {dimension} exceeds {limit} (override required)")]
    PolicyRefusal {
        /// Instance dimension.
        dimension: usize,
        /// Configured threshold.
        limit: usize,
    },

    /// TSPLIB instance could not be parsed.
    #[error("parse error{}: {cause}", line.map(|l| format!(" at line {l}")).unwrap_or_default())]
    Parse {
        /// 1-based line number, when the error is tied to a line.
        line: Option<usize>,
        /// Description of the problem.
        cause: String,
    },

    /// Algorithm name not known to the command surface.
    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// I/O error while reading an instance or writing a result.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TspError {
    /// Builds a [`TspError::Parse`] tied to a line.
    pub fn parse_at(line: usize, cause: impl Into<String>) -> Self {
        Self::Parse {
            line: Some(line),
            cause: cause.into(),
        }
    }

    /// Builds a [`TspError::Parse`] for whole-file problems.
    pub fn parse(cause: impl Into<String>) -> Self {
        Self::Parse {
            line: None,
            cause: cause.into(),
        }
    }

    /// Process exit status for this error.
    ///
    /// Exact-search allocation failures are reported as 7 by the binary,
    /// which knows which engine was running; this mapping covers the rest.
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.status())
    }

    /// Numeric form of [`exit_code`](Self::exit_code).
    pub fn status(&self) -> u8 {
        match self {
            Self::Io(_) => 1,
            Self::Parse { .. } => 2,
            Self::Allocation { .. } => 4,
            Self::UnsupportedAlgorithm(_) => 5,
            Self::PolicyRefusal { .. } => 6,
            Self::InvalidArgument(_) => 8,
        }
    }

    /// Returns `true` for [`TspError::PolicyRefusal`].
    pub fn is_refusal(&self) -> bool {
        matches!(self, Self::PolicyRefusal { .. })
    }
}
