//! Router for the calendar API

use axum::{Router, extract::State, response::Json, routing::post};

use super::public;
use crate::api::public::ApiError;
use crate::api::state::{AppState, SharedState};
use crate::calendar::locale::Language;
use crate::calendar::{
    CalendarGenerator, CalendarInput, DateCategory, LayoutSelector, Theme, preview,
};
use crate::core::AppConfig;
use crate::google::GoogleSlides;

/// Validated request plus the settings it resolves to.
struct Job {
    input: CalendarInput,
    theme: Theme,
    layout: LayoutSelector,
}

fn prepare(config: &AppConfig, request: public::CalendarRequest) -> Result<Job, ApiError> {
    let layout = match request.layout {
        Some(layout) => layout.parse().map_err(ApiError::bad_request)?,
        None => config.layout.clone(),
    };
    let language: Language = match request.language {
        Some(language) => language.parse().map_err(ApiError::bad_request)?,
        None => config.language,
    };
    let input = CalendarInput::try_from(request.input).map_err(ApiError::bad_request)?;

    Ok(Job {
        input,
        theme: Theme::default().with_labels(language.labels()),
        layout,
    })
}

async fn create_handler(
    State(state): State<SharedState>,
    Json(request): Json<public::CalendarRequest>,
) -> Result<Json<public::CalendarReport>, ApiError> {
    let config = AppState::config(&state)?;
    let job = prepare(&config, request)?;

    let slides = GoogleSlides::connect(&config).await?;
    let mut generator = CalendarGenerator::new(slides, job.theme).with_layout(job.layout);
    let report = generator.generate(&job.input).await?;

    if !report.is_complete() {
        tracing::warn!(
            "Calendar for {:?} {} finished with failed months",
            report.semester,
            report.year
        );
    }
    Ok(Json(report))
}

async fn preview_handler(
    State(state): State<SharedState>,
    Json(request): Json<public::CalendarRequest>,
) -> Result<Json<public::CalendarPreview>, ApiError> {
    let config = AppState::config(&state)?;
    let job = prepare(&config, request)?;

    let preview = preview(
        job.theme,
        job.layout,
        DateCategory::OVERLAY_ORDER.to_vec(),
        &job.input,
    )
    .await?;
    Ok(Json(preview))
}

/// Create the calendar router
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/", post(create_handler))
        .route("/preview", post(preview_handler))
}
