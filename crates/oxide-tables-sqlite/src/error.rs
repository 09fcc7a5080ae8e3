//! Error types for store operations.

use oxide_tables_core::CoreError;
use thiserror::Error;

/// Store-specific errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The request was rejected before any SQL was sent.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A table or catalog entry does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// SQLite rejected or failed to run a statement.
    #[error("failed to {context}: {source}")]
    Execution {
        /// What was being attempted.
        context: &'static str,
        /// Driver error.
        #[source]
        source: sqlx::Error,
    },

    /// A result row could not be decoded.
    #[error("failed to scan row: {0}")]
    Scan(#[source] sqlx::Error),

    /// The operation needs a capability the caller was not granted.
    #[error("forbidden: {0}")]
    Forbidden(&'static str),
}

impl StoreError {
    /// Builds a mapper for `map_err` that tags driver errors with `context`.
    pub(crate) fn execution(context: &'static str) -> impl FnOnce(sqlx::Error) -> Self {
        move |source| Self::Execution { context, source }
    }

    /// HTTP status matching the error category: 4xx for bad input, 5xx for
    /// database failures.
    #[must_use]
    pub const fn status(&self) -> u16 {
        match self {
            Self::Core(_) => 400,
            Self::Forbidden(_) => 403,
            Self::NotFound(_) => 404,
            Self::Execution { .. } | Self::Scan(_) => 500,
        }
    }
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            StoreError::from(CoreError::UnsupportedOperator("x".into())).status(),
            400
        );
        assert_eq!(StoreError::NotFound("t".into()).status(), 404);
        assert_eq!(StoreError::Scan(sqlx::Error::RowNotFound).status(), 500);
        assert_eq!(
            StoreError::execution("create table")(sqlx::Error::PoolClosed).status(),
            500
        );
    }

    #[test]
    fn test_core_message_passes_through() {
        let err = StoreError::from(CoreError::InvalidRequest("no columns specified".into()));
        assert_eq!(err.to_string(), "invalid request: no columns specified");
    }
}
