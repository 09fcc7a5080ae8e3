//! Handler errors and their HTTP form.

use oxide_router::Response;
use oxide_tables_sqlite::StoreError;
use thiserror::Error;
use tracing::{debug, error};

/// Anything a handler can fail with.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request body is not the JSON the endpoint expects.
    #[error("invalid JSON body: {0}")]
    Body(#[from] serde_json::Error),

    /// The store rejected or failed the operation.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> u16 {
        match self {
            Self::Body(_) => 400,
            Self::Store(err) => err.status(),
        }
    }

    /// Renders the error as `{"error": message}`.
    #[must_use]
    pub fn into_response(self) -> Response {
        let status = self.status();
        if status >= 500 {
            error!(status, error = %self, "Request failed");
        } else {
            debug!(status, error = %self, "Request rejected");
        }
        Response::error(status, &self.to_string())
    }
}

/// Result type alias for handlers.
pub type Result<T> = std::result::Result<T, ApiError>;
