//! Build a calendar without touching any deck.

use anyhow::{Result, anyhow};
use serde::Serialize;

use super::dates::{CalendarInput, DateCategory, Semester};
use super::generator::CalendarGenerator;
use super::requests::Request;
use super::service::{DryRunSlides, LayoutSelector, SequentialIds};
use super::theme::Theme;

#[derive(Debug, Clone, Serialize)]
pub struct PreviewMonth {
    pub year: i32,
    pub month: u32,
    pub page_id: String,
    pub requests: Vec<Request>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CalendarPreview {
    pub semester: Semester,
    pub year: i32,
    pub layout: String,
    pub months: Vec<PreviewMonth>,
}

/// Run the generator against `DryRunSlides` with predictable ids and
/// return the batch each month would submit.
pub async fn preview(
    theme: Theme,
    layout: LayoutSelector,
    overlay_order: Vec<DateCategory>,
    input: &CalendarInput,
) -> Result<CalendarPreview> {
    let layout_name = layout.to_string();
    let mut generator = CalendarGenerator::new(DryRunSlides::new(), theme)
        .with_ids(SequentialIds::default())
        .with_layout(layout)
        .with_overlay_order(overlay_order);
    let report = generator.generate(input).await?;
    let batches = generator.service().batches();

    let months = report
        .months
        .into_iter()
        .zip(batches)
        .map(|(month, requests)| {
            let page_id = month
                .page_id
                .ok_or_else(|| anyhow!("Dry run did not create a page for month {}", month.month))?;
            Ok(PreviewMonth {
                year: month.year,
                month: month.month,
                page_id,
                requests,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CalendarPreview {
        semester: input.semester,
        year: input.year,
        layout: layout_name,
        months,
    })
}
