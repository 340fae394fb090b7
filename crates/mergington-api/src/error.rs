//! Error types for mergington-api and their HTTP rendering.

use axum::Json;
use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for mergington-api operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in mergington-api
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from mergington-core
    #[error(transparent)]
    Core(#[from] mergington_core::Error),

    /// Listener or connection error
    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed path or query string, rejected before reaching the store
    #[error("{message}")]
    Rejection {
        /// Status chosen by the extractor
        status: StatusCode,
        /// Extractor's explanation
        message: String,
    },
}

/// JSON body of every error response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable reason.
    pub detail: String,
}

impl Error {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Error::Core(e) if e.is_not_found() => StatusCode::NOT_FOUND,
            Error::Core(e) if e.is_conflict() => StatusCode::BAD_REQUEST,
            Error::Rejection { status, .. } => *status,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<PathRejection> for Error {
    fn from(rejection: PathRejection) -> Self {
        Error::Rejection {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for Error {
    fn from(rejection: QueryRejection) -> Self {
        Error::Rejection {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = ErrorBody {
            detail: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
