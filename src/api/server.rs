use std::sync::{Arc, RwLock};

use anyhow::Result;
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use super::routes;
use crate::api::state::{AppState, SharedState};
use crate::core::AppConfig;

pub fn app(shared_state: SharedState) -> Router {
    Router::new()
        // API routes
        .nest("/api", routes::router())
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::clone(&shared_state))
}

// Run the server
pub async fn serve(host: String, port: String, config: AppConfig) -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                // axum logs rejections from built-in extractors with the `axum::rejection`
                // target, at `TRACE` level. `axum::rejection=trace` enables showing those events
                format! {
                    "{}=debug,tower_http=debug,axum::rejection=trace",
                    env!("CARGO_CRATE_NAME")
                }
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if config.presentation_id.is_none() {
        tracing::warn!("SLIDECAL_PRESENTATION_ID is not set, only previews will work");
    }

    let shared_state = Arc::new(RwLock::new(AppState::new(config)));
    let app = app(shared_state);

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port)).await?;

    tracing::debug!("Server started. Listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
