//! Error types for routing.

use thiserror::Error;

/// Router-specific errors.
#[derive(Debug, Error)]
pub enum RouterError {
    /// No route matched the request path.
    #[error("no route matched: {method} {path}")]
    NotFound { method: String, path: String },

    /// The path exists but not for this method.
    #[error("method not allowed: {method} for {path}")]
    MethodNotAllowed { method: String, path: String },
}

/// Result type alias for router operations.
pub type Result<T> = std::result::Result<T, RouterError>;
