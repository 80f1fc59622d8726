//! Public types for the calendar API
use serde::{Deserialize, Serialize};

pub use crate::calendar::{CalendarPreview, CalendarReport, MonthOutcome, RawCalendarInput};

/// Body of both calendar endpoints.
///
/// `layout` and `language` override the server configuration for this
/// request only.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CalendarRequest {
    #[serde(flatten)]
    pub input: RawCalendarInput,
    #[serde(default)]
    pub layout: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}
