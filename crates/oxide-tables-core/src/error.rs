//! Error types for request validation and SQL building.

use thiserror::Error;

/// Errors raised before any SQL reaches the database.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// An identifier is empty, malformed, reserved or looks like an injection.
    #[error("invalid identifier '{identifier}': {reason}")]
    InvalidIdentifier {
        /// The rejected identifier, as supplied.
        identifier: String,
        /// Which rule it broke.
        reason: &'static str,
    },

    /// The request body is malformed or inconsistent.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// A filter operator outside the supported set.
    #[error("unsupported operator: {0}")]
    UnsupportedOperator(String),

    /// The value supplied for an operator has the wrong shape.
    #[error("invalid value for operator '{operator}': {reason}")]
    InvalidOperatorValue {
        /// Operator key, e.g. `in`.
        operator: String,
        /// What was wrong with the value.
        reason: String,
    },

    /// Statement assembly failed (for instance an unknown logical type).
    #[error("build error: {0}")]
    Build(String),
}

impl CoreError {
    pub(crate) fn invalid_identifier(identifier: &str, reason: &'static str) -> Self {
        Self::InvalidIdentifier {
            identifier: identifier.to_string(),
            reason,
        }
    }

    pub(crate) fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
