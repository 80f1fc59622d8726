//! Month-by-month calendar generation.
//!
//! `build_month_slide` is the pure part: it turns one month and the event
//! dates into the ordered request list for that slide. `CalendarGenerator`
//! drives a `SlideService` through every month of a semester and reports
//! what happened to each one.

use anyhow::{Context, Result};
use serde::Serialize;

use super::dates::{CalendarInput, CategoryDates, DateCategory, Semester};
use super::layout::{day_overlay, month_grid, month_year_boxes, weekday_header};
use super::overlay::{LegendEntry, Presence, legend, legend_entries, quiz_markers};
use super::requests::Request;
use super::service::{ElementIds, LayoutSelector, SlideService, UuidIds};
use super::theme::Theme;

/// Everything drawn on one month slide.
#[derive(Debug, Clone)]
pub struct MonthSlide {
    pub page_id: String,
    pub year: i32,
    pub month: u32,
    pub requests: Vec<Request>,
    pub day_element_ids: Vec<String>,
    pub presence: Presence,
    pub legend: Vec<LegendEntry>,
}

/// Build the full request list of one month slide.
///
/// Cell categories are applied in `overlay_order`; when a day is in more
/// than one list the category applied last decides its look. Categories
/// missing from `overlay_order` are not drawn.
pub fn build_month_slide(
    theme: &Theme,
    ids: &mut dyn ElementIds,
    overlay_order: &[DateCategory],
    page_id: &str,
    year: i32,
    month: u32,
    dates: &CategoryDates,
) -> Result<MonthSlide> {
    let month_dates = dates.for_month(year, month);

    let mut requests = month_year_boxes(theme, ids, page_id, year, month)?;
    requests.extend(weekday_header(theme, ids, page_id));

    let grid = month_grid(theme, ids, page_id, year, month)?;
    requests.extend(grid.requests.iter().cloned());

    let mut presence = Presence::default();
    for category in overlay_order {
        let Some(style) = theme.days.for_category(*category) else {
            continue;
        };
        let matched = month_dates.dates(*category);
        if matched.is_empty() {
            continue;
        }
        requests.extend(day_overlay(matched, &grid, style));
        presence.mark(*category);
    }

    let quizzes = month_dates.dates(DateCategory::Quiz);
    if !quizzes.is_empty() {
        requests.extend(quiz_markers(theme, ids, page_id, quizzes));
        presence.mark(DateCategory::Quiz);
    }

    let entries = legend_entries(&theme.labels, &presence);
    requests.extend(legend(theme, ids, page_id, &entries));

    Ok(MonthSlide {
        page_id: page_id.to_string(),
        year,
        month,
        requests,
        day_element_ids: grid.day_element_ids,
        presence,
        legend: entries,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MonthOutcome {
    /// Page created and every request applied.
    Rendered,
    /// Page created but the batch was rejected, so the slide is blank.
    Partial { reason: String },
    /// No page was created for the month.
    NotCreated { reason: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthReport {
    pub year: i32,
    pub month: u32,
    pub page_id: Option<String>,
    /// Number of requests in the month's batch, 0 when no page was created.
    pub requests: usize,
    pub outcome: MonthOutcome,
}

#[derive(Debug, Clone, Serialize)]
pub struct CalendarReport {
    pub semester: Semester,
    pub year: i32,
    pub months: Vec<MonthReport>,
}

impl CalendarReport {
    pub fn is_complete(&self) -> bool {
        self.months
            .iter()
            .all(|m| m.outcome == MonthOutcome::Rendered)
    }
}

pub struct CalendarGenerator<S: SlideService> {
    service: S,
    theme: Theme,
    ids: Box<dyn ElementIds>,
    layout: LayoutSelector,
    overlay_order: Vec<DateCategory>,
}

impl<S: SlideService> CalendarGenerator<S> {
    pub fn new(service: S, theme: Theme) -> Self {
        Self {
            service,
            theme,
            ids: Box::new(UuidIds),
            layout: LayoutSelector::default(),
            overlay_order: DateCategory::OVERLAY_ORDER.to_vec(),
        }
    }

    pub fn with_ids(mut self, ids: impl ElementIds + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    pub fn with_layout(mut self, layout: LayoutSelector) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_overlay_order(mut self, order: Vec<DateCategory>) -> Self {
        self.overlay_order = order;
        self
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Create one slide per month of the semester.
    ///
    /// Fails before creating anything when the layout can not be found.
    /// After that, failures are recorded per month and the run moves on.
    pub async fn generate(&mut self, input: &CalendarInput) -> Result<CalendarReport> {
        let layout_id = self
            .service
            .resolve_layout(&self.layout)
            .await
            .with_context(|| format!("Could not resolve {}", self.layout))?;
        tracing::debug!("Using layout {} for {:?} {}", layout_id, input.semester, input.year);

        let mut months = Vec::new();
        for month in input.semester.months() {
            let report = self.generate_month(&layout_id, input, month).await?;
            match &report.outcome {
                MonthOutcome::Rendered => tracing::info!(
                    "Rendered {}-{:02} ({} requests)",
                    input.year,
                    month,
                    report.requests
                ),
                MonthOutcome::Partial { reason } | MonthOutcome::NotCreated { reason } => {
                    tracing::warn!("Month {}-{:02} incomplete: {}", input.year, month, reason)
                }
            }
            months.push(report);
        }

        Ok(CalendarReport {
            semester: input.semester,
            year: input.year,
            months,
        })
    }

    async fn generate_month(
        &mut self,
        layout_id: &str,
        input: &CalendarInput,
        month: u32,
    ) -> Result<MonthReport> {
        let page_id = match self.service.new_page(layout_id).await {
            Ok(page_id) => page_id,
            Err(e) => {
                tracing::error!("Failed to create slide for {}-{:02}: {:#}", input.year, month, e);
                return Ok(MonthReport {
                    year: input.year,
                    month,
                    page_id: None,
                    requests: 0,
                    outcome: MonthOutcome::NotCreated {
                        reason: format!("{:#}", e),
                    },
                });
            }
        };

        let slide = build_month_slide(
            &self.theme,
            self.ids.as_mut(),
            &self.overlay_order,
            &page_id,
            input.year,
            month,
            &input.dates,
        )?;
        tracing::debug!(
            "Submitting {} requests to page {}",
            slide.requests.len(),
            page_id
        );

        let outcome = match self.service.submit_batch(&slide.requests).await {
            Ok(()) => MonthOutcome::Rendered,
            Err(e) => {
                tracing::error!("Batch update failed for page {}: {:#}", page_id, e);
                MonthOutcome::Partial {
                    reason: format!("{:#}", e),
                }
            }
        };

        Ok(MonthReport {
            year: input.year,
            month,
            page_id: Some(page_id),
            requests: slide.requests.len(),
            outcome,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use anyhow::bail;
    use async_trait::async_trait;
    use chrono::NaiveDate;

    use super::*;
    use crate::calendar::requests::{BackgroundFill, ShapeKind};
    use crate::calendar::service::{DryRunSlides, SequentialIds};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn days(y: i32, m: u32, list: &[u32]) -> Option<Vec<NaiveDate>> {
        Some(list.iter().map(|d| date(y, m, *d)).collect())
    }

    /// Fill left on an element once every request has been applied.
    fn final_fill(requests: &[Request], object_id: &str) -> Option<BackgroundFill> {
        requests
            .iter()
            .filter_map(|r| match r {
                Request::UpdateShapeProperties(u) if u.object_id == object_id => {
                    Some(u.shape_properties.shape_background_fill)
                }
                _ => None,
            })
            .last()
    }

    fn january_2024() -> CategoryDates {
        CategoryDates {
            class: days(2024, 1, &[10, 17, 24, 31]),
            lab: days(2024, 1, &[11, 18, 25]),
            exam: days(2024, 1, &[26]),
            quiz: days(2024, 1, &[15, 27]),
            holiday: days(2024, 1, &[1]),
        }
    }

    #[test]
    fn test_january_2024_end_to_end() {
        let theme = Theme::default();
        let mut ids = SequentialIds::default();
        let slide = build_month_slide(
            &theme,
            &mut ids,
            &DateCategory::OVERLAY_ORDER,
            "page",
            2024,
            1,
            &january_2024(),
        )
        .unwrap();

        assert_eq!(slide.day_element_ids.len(), 31);
        let ones: Vec<&Request> = slide
            .requests
            .iter()
            .filter(|r| matches!(r, Request::InsertText(t) if t.text == "01"))
            .collect();
        assert_eq!(ones.len(), 1);

        let fill_of = |day: usize| final_fill(&slide.requests, &slide.day_element_ids[day - 1]);
        let days = &theme.days;
        assert_eq!(fill_of(1), Some(days.holiday.fill));
        for day in [10, 17, 24, 31] {
            assert_eq!(fill_of(day), Some(days.class.fill));
        }
        for day in [11, 18, 25] {
            assert_eq!(fill_of(day), Some(days.lab.fill));
        }
        assert_eq!(fill_of(26), Some(days.exam.fill));
        assert_eq!(fill_of(2), Some(days.normal.fill));

        // Two quiz markers plus the quiz legend sample
        let ellipses = slide
            .requests
            .iter()
            .filter(|r| matches!(r, Request::CreateShape(s) if s.shape_type == ShapeKind::Ellipse))
            .count();
        assert_eq!(ellipses, 3);

        let legend: Vec<(DateCategory, usize)> =
            slide.legend.iter().map(|e| (e.category, e.slot)).collect();
        assert_eq!(
            legend,
            vec![
                (DateCategory::Class, 0),
                (DateCategory::Lab, 1),
                (DateCategory::Exam, 2),
                (DateCategory::Holiday, 3),
                (DateCategory::Quiz, 4),
            ]
        );

        // Every request targets an element created earlier in the batch
        let mut created = std::collections::HashSet::new();
        for request in &slide.requests {
            match request {
                Request::CreateShape(s) => {
                    assert!(created.insert(s.object_id.clone()));
                }
                other => assert!(created.contains(other.object_id())),
            }
        }
    }

    #[test]
    fn test_precedence_follows_overlay_order() {
        let theme = Theme::default();
        let dates = CategoryDates {
            class: days(2024, 1, &[1]),
            holiday: days(2024, 1, &[1]),
            ..Default::default()
        };

        let mut ids = SequentialIds::default();
        let slide = build_month_slide(
            &theme,
            &mut ids,
            &DateCategory::OVERLAY_ORDER,
            "page",
            2024,
            1,
            &dates,
        )
        .unwrap();
        assert_eq!(
            final_fill(&slide.requests, &slide.day_element_ids[0]),
            Some(theme.days.holiday.fill)
        );

        let mut ids = SequentialIds::default();
        let slide = build_month_slide(
            &theme,
            &mut ids,
            &[DateCategory::Holiday, DateCategory::Class],
            "page",
            2024,
            1,
            &dates,
        )
        .unwrap();
        assert_eq!(
            final_fill(&slide.requests, &slide.day_element_ids[0]),
            Some(theme.days.class.fill)
        );
    }

    #[test]
    fn test_dates_outside_month_are_ignored() {
        let theme = Theme::default();
        let mut ids = SequentialIds::default();
        let dates = CategoryDates {
            exam: days(2024, 2, &[1]),
            ..Default::default()
        };
        let slide = build_month_slide(
            &theme,
            &mut ids,
            &DateCategory::OVERLAY_ORDER,
            "page",
            2024,
            1,
            &dates,
        )
        .unwrap();
        assert_eq!(slide.presence, Presence::default());
        assert!(slide.legend.is_empty());
    }

    #[test]
    fn test_build_is_deterministic_with_sequential_ids() {
        let theme = Theme::default();
        let build = || {
            let mut ids = SequentialIds::default();
            build_month_slide(
                &theme,
                &mut ids,
                &DateCategory::OVERLAY_ORDER,
                "page",
                2024,
                1,
                &january_2024(),
            )
            .unwrap()
            .requests
        };
        assert_eq!(build(), build());
    }

    fn winter_2024() -> CalendarInput {
        CalendarInput {
            semester: Semester::Winter,
            year: 2024,
            dates: january_2024(),
        }
    }

    #[tokio::test]
    async fn test_generate_with_dry_run() {
        let mut generator = CalendarGenerator::new(DryRunSlides::new(), Theme::default())
            .with_ids(SequentialIds::default());
        let report = generator.generate(&winter_2024()).await.unwrap();

        assert!(report.is_complete());
        let months: Vec<u32> = report.months.iter().map(|m| m.month).collect();
        assert_eq!(months, vec![1, 2, 3, 4]);
        assert_eq!(report.months[0].page_id.as_deref(), Some("page_01"));

        let batches = generator.service().batches();
        assert_eq!(batches.len(), 4);
        assert_eq!(batches[0].len(), report.months[0].requests);
        // January carries overlays and a legend, February only the grid
        assert!(batches[0].len() > batches[1].len());
    }

    /// Fails page creation and batch submission on chosen calls.
    #[derive(Default)]
    struct FlakySlides {
        missing_layout: bool,
        fail_page: Option<usize>,
        fail_batch: Option<usize>,
        pages: Mutex<usize>,
        batches: Mutex<usize>,
    }

    #[async_trait]
    impl SlideService for FlakySlides {
        async fn resolve_layout(&self, layout: &LayoutSelector) -> Result<String> {
            if self.missing_layout {
                bail!("No {} in presentation", layout);
            }
            Ok(String::from("layout"))
        }

        async fn new_page(&self, _layout_id: &str) -> Result<String> {
            let mut pages = self.pages.lock().unwrap();
            *pages += 1;
            if Some(*pages) == self.fail_page {
                bail!("createSlide failed: 500");
            }
            Ok(format!("page_{}", pages))
        }

        async fn submit_batch(&self, _requests: &[Request]) -> Result<()> {
            let mut batches = self.batches.lock().unwrap();
            *batches += 1;
            if Some(*batches) == self.fail_batch {
                bail!("batchUpdate failed: 400");
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_failures_are_reported_per_month() {
        let slides = FlakySlides {
            fail_page: Some(2),
            fail_batch: Some(2),
            ..Default::default()
        };
        let mut generator = CalendarGenerator::new(slides, Theme::default());
        let report = generator.generate(&winter_2024()).await.unwrap();

        assert!(!report.is_complete());
        let outcomes: Vec<&MonthOutcome> = report.months.iter().map(|m| &m.outcome).collect();
        assert_eq!(outcomes[0], &MonthOutcome::Rendered);
        assert!(matches!(outcomes[1], MonthOutcome::NotCreated { reason } if reason.contains("createSlide")));
        assert!(matches!(outcomes[2], MonthOutcome::Partial { reason } if reason.contains("batchUpdate")));
        assert_eq!(outcomes[3], &MonthOutcome::Rendered);
        assert_eq!(report.months[1].page_id, None);
        assert_eq!(report.months[2].page_id.as_deref(), Some("page_3"));
    }

    #[tokio::test]
    async fn test_missing_layout_creates_nothing() {
        let slides = FlakySlides {
            missing_layout: true,
            ..Default::default()
        };
        let mut generator = CalendarGenerator::new(slides, Theme::default())
            .with_layout(LayoutSelector::Name(String::from("Calendrier")));
        let err = generator.generate(&winter_2024()).await.unwrap_err();

        assert!(format!("{:#}", err).contains("Calendrier"));
        assert_eq!(*generator.service().pages.lock().unwrap(), 0);
    }

    #[test]
    fn test_outcome_serialization() {
        let json = serde_json::to_value(MonthOutcome::Partial {
            reason: String::from("boom"),
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"status": "partial", "reason": "boom"}));
        assert_eq!(
            serde_json::to_value(MonthOutcome::Rendered).unwrap(),
            serde_json::json!({"status": "rendered"})
        );
    }
}
