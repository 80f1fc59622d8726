//! API routes module

pub mod calendar;

use axum::Router;

use crate::api::state::SharedState;

/// Create the combined API router
pub fn router() -> Router<SharedState> {
    Router::new()
        // Calendar routes
        .nest("/calendar", calendar::router())
}
