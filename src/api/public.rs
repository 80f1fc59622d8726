//! Public API types

use axum::response::{IntoResponse, Response};
use http::StatusCode;

// Errors

pub struct ApiError {
    status: StatusCode,
    error: anyhow::Error,
}

impl ApiError {
    /// The request itself is wrong, e.g. a malformed date.
    pub fn bad_request(error: impl Into<anyhow::Error>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error: error.into(),
        }
    }
}

/// Convert `ApiError` into an Axum compatible response.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!("{:#}", self.error);
            (
                self.status,
                format!("Something went wrong: {:#}", self.error),
            )
                .into_response()
        } else {
            tracing::debug!("Rejected request: {:#}", self.error);
            (self.status, format!("{:#}", self.error)).into_response()
        }
    }
}

/// Enables using `?` on functions that return `Result<_,
/// anyhow::Error>` to turn them into `Result<_, ApiError>`
impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            error: err.into(),
        }
    }
}

// Re-export public types from each route

pub mod calendar {
    pub use crate::api::routes::calendar::public::*;
}
