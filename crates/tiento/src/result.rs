//! Result and error types for Tiento.

use thiserror::Error;

/// Result type for Tiento operations
pub type TientoResult<T> = Result<T, TientoError>;

/// Errors that can occur in Tiento
#[derive(Debug, Error)]
pub enum TientoError {
    /// Caller passed an argument that can never be valid
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Error message
        message: String,
    },

    /// No candidate matched the criteria at a lookup or menu level
    #[error("No entry found at level {level} for criteria: {criteria}")]
    Lookup {
        /// Level being resolved (1-based)
        level: usize,
        /// Description of the failing criteria
        criteria: String,
    },

    /// More than one candidate matched in strict mode
    #[error("{count} entries match criteria at level {level} in strict mode: {criteria}")]
    AmbiguousMatch {
        /// Level being resolved (1-based)
        level: usize,
        /// Description of the criteria
        criteria: String,
        /// Number of matching candidates
        count: usize,
    },

    /// Lookup index past the number of matches
    #[error("Lookup index {index} out of bounds ({size} matches)")]
    IndexOutOfBounds {
        /// Requested index
        index: usize,
        /// Number of matches found
        size: usize,
    },

    /// Operation timed out
    #[error("Operation timed out after {ms}ms")]
    Timeout {
        /// Timeout in milliseconds
        ms: u64,
    },

    /// Caret did not reach its target within the step budget
    #[error("Caret did not converge to {target} after {steps} steps")]
    NotConverged {
        /// Description of the target
        target: String,
        /// Steps taken before giving up
        steps: usize,
    },

    /// Failure reported by a UI capability implementation
    #[error("Capability error: {message}")]
    Capability {
        /// Error message
        message: String,
    },

    /// Logging could not be initialized
    #[error("Logging error: {message}")]
    Logging {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl TientoError {
    /// Shorthand for [`TientoError::InvalidArgument`]
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Shorthand for [`TientoError::Capability`]
    #[must_use]
    pub fn capability(message: impl Into<String>) -> Self {
        Self::Capability {
            message: message.into(),
        }
    }

    /// Check if this error came from a failed lookup (no match or ambiguous match)
    #[must_use]
    pub const fn is_lookup(&self) -> bool {
        matches!(self, Self::Lookup { .. } | Self::AmbiguousMatch { .. })
    }
}
