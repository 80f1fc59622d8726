//! Test utilities for integration tests
#![allow(dead_code)]

use std::sync::{Arc, RwLock};

use axum::{Router, body::Body};

use slidecal::api::AppState;
use slidecal::api::app;
use slidecal::calendar::LayoutSelector;
use slidecal::calendar::locale::Language;
use slidecal::core::AppConfig;

/// Configuration pointing every Google endpoint at `base_url`, usually
/// a `mockito` server.
pub fn test_config(base_url: &str) -> AppConfig {
    AppConfig {
        presentation_id: Some(String::from("test_deck")),
        google_client_id: Some(String::from("test_client_id")),
        google_client_secret: Some(String::from("test_client_secret")),
        google_refresh_token: Some(String::from("test_refresh_token")),
        google_redirect_uri: String::from("urn:ietf:wg:oauth:2.0:oob"),
        layout: LayoutSelector::Index(0),
        language: Language::French,
        slides_api_url: base_url.to_string(),
        oauth_token_url: format!("{}/token", base_url),
    }
}

/// Creates a test application router. Calls to Google go to `base_url`.
pub fn test_app(base_url: &str) -> Router {
    let app_state = AppState::new(test_config(base_url));
    app(Arc::new(RwLock::new(app_state)))
}

pub async fn body_to_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Minimal deck: one master whose first layout is the calendar layout.
pub const TEST_DECK: &str = r#"{
    "presentationId": "test_deck",
    "masters": [{"objectId": "master"}],
    "layouts": [
        {"objectId": "calendar_layout",
         "layoutProperties": {"masterObjectId": "master", "name": "CUSTOM", "displayName": "Calendrier"}}
    ]
}"#;
