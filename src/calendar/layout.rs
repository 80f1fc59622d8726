//! Month layout engine: day grid, weekday header, month and year boxes,
//! and the per-category recoloring of day cells.
//!
//! The grid has 6 rows of 7 columns, Sunday first. `cell_position` is the
//! only place that turns a grid slot into page coordinates; quiz markers
//! use it too, so markers and cells can not drift apart.

use anyhow::{Result, anyhow};
use chrono::{Datelike, NaiveDate};

use super::requests::{
    ParagraphAlignment, Placement, Request, ShapeKind, TextStyle, create_shape, insert_text,
    label, style_paragraph, style_shape, style_text,
};
use super::service::ElementIds;
use super::theme::{Geometry, ShapeStyle, Theme};

pub const DAYS_IN_WEEK: u32 = 7;
/// Maximum number of (partial) weeks a month can span.
pub const WEEKS_IN_MONTH: u32 = 6;

/// Row and column of a day cell. `weekday` counts from Sunday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridSlot {
    pub week: u32,
    pub weekday: u32,
}

impl GridSlot {
    /// Slot of `date` within its own month, from calendar arithmetic alone.
    pub fn for_date(date: NaiveDate) -> Self {
        let first_weekday = first_weekday_of_month(date);
        GridSlot {
            week: (date.day() + first_weekday - 1) / DAYS_IN_WEEK,
            weekday: date.weekday().num_days_from_sunday(),
        }
    }
}

/// Weekday (Sunday = 0) of the first day of the month containing `date`.
pub fn first_weekday_of_month(date: NaiveDate) -> u32 {
    let weekday = date.weekday().num_days_from_sunday();
    (weekday + DAYS_IN_WEEK - date.day0() % DAYS_IN_WEEK) % DAYS_IN_WEEK
}

pub fn first_of_month(year: i32, month: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| anyhow!("Invalid calendar month {}-{:02}", year, month))
}

/// Top-left corner of the day cell at `slot`, in EMU.
pub fn cell_position(geometry: &Geometry, slot: GridSlot) -> (f64, f64) {
    let x = geometry.margins.left + geometry.column_shift() * f64::from(slot.weekday);
    let y = geometry.margins.day_elements_top + geometry.row_shift() * f64::from(slot.week);
    (x, y)
}

/// Day cells of one month.
#[derive(Debug, Clone)]
pub struct MonthGrid {
    pub requests: Vec<Request>,
    /// Element id of each day; index 0 is the 1st of the month.
    pub day_element_ids: Vec<String>,
    /// Slot of each day; index 0 is the 1st of the month.
    pub slots: Vec<GridSlot>,
    pub first_weekday: u32,
}

impl MonthGrid {
    pub fn day_element_id(&self, date: NaiveDate) -> Option<&str> {
        let index = usize::try_from(date.day0()).ok()?;
        self.day_element_ids.get(index).map(String::as_str)
    }
}

/// A shape with centered text: create, style shape, insert text, style
/// text, style paragraph, in that order.
#[allow(clippy::too_many_arguments)]
pub fn styled_text_shape(
    page_id: &str,
    object_id: &str,
    text: &str,
    kind: ShapeKind,
    placement: Placement,
    shape_style: &ShapeStyle,
    text_style: &TextStyle,
    magnitude: f64,
) -> Vec<Request> {
    vec![
        create_shape(page_id, object_id, kind, placement, magnitude),
        style_shape(
            object_id,
            shape_style.fill,
            shape_style.outline,
            Some(shape_style.alignment),
        ),
        insert_text(object_id, text),
        style_text(object_id, text_style),
        style_paragraph(object_id, None),
    ]
}

/// Walk the 6 × 7 grid and emit one cell per day of the month.
pub fn month_grid(
    theme: &Theme,
    ids: &mut dyn ElementIds,
    page_id: &str,
    year: i32,
    month: u32,
) -> Result<MonthGrid> {
    let geometry = &theme.geometry;
    let first = first_of_month(year, month)?;
    let first_weekday = first.weekday().num_days_from_sunday();
    let text_style = theme
        .day_text
        .clone()
        .with_color(theme.days.normal.text_color);

    let mut requests = Vec::new();
    let mut day_element_ids = Vec::new();
    let mut slots = Vec::new();
    let mut date = Some(first);

    'weeks: for week in 0..WEEKS_IN_MONTH {
        for weekday in 0..DAYS_IN_WEEK {
            if week == 0 && weekday < first_weekday {
                continue;
            }
            // Stop once the running date rolls into the next month
            let Some(day) = date.filter(|d| d.month() == month) else {
                break 'weeks;
            };

            let slot = GridSlot { week, weekday };
            let (x, y) = cell_position(geometry, slot);
            let object_id = ids.next_id();
            requests.extend(styled_text_shape(
                page_id,
                &object_id,
                &format!("{:02}", day.day()),
                theme.cell_shape,
                Placement::new(geometry.day, x, y),
                &theme.days.normal,
                &text_style,
                geometry.magnitude,
            ));
            day_element_ids.push(object_id);
            slots.push(slot);

            date = day.succ_opt();
        }
    }

    Ok(MonthGrid {
        requests,
        day_element_ids,
        slots,
        first_weekday,
    })
}

/// One centered label per weekday name along the top of the grid.
pub fn weekday_header(theme: &Theme, ids: &mut dyn ElementIds, page_id: &str) -> Vec<Request> {
    let geometry = &theme.geometry;
    let y = geometry.margins.day_labels_top;

    theme
        .labels
        .weekday_names
        .iter()
        .enumerate()
        .flat_map(|(i, name)| {
            let x = geometry.margins.left + geometry.weekday_label_shift() * i as f64;
            label(
                page_id,
                &ids.next_id(),
                name,
                Placement::new(geometry.weekday_label, x, y),
                ParagraphAlignment::Center,
                &theme.label_text,
                geometry.magnitude,
            )
        })
        .collect()
}

/// Month name box followed by the year box.
pub fn month_year_boxes(
    theme: &Theme,
    ids: &mut dyn ElementIds,
    page_id: &str,
    year: i32,
    month: u32,
) -> Result<Vec<Request>> {
    let geometry = &theme.geometry;
    let month_name = theme
        .labels
        .month_name(month)
        .ok_or_else(|| anyhow!("No month name for month {}", month))?;
    let text_style = theme
        .month_year_text
        .clone()
        .with_color(theme.month_year.text_color);

    let boxes = [
        (month_name.to_string(), geometry.month_box, geometry.margins.left),
        (year.to_string(), geometry.year_box, geometry.year_box_left),
    ];

    Ok(boxes
        .into_iter()
        .flat_map(|(text, scale, x)| {
            styled_text_shape(
                page_id,
                &ids.next_id(),
                &text,
                theme.cell_shape,
                Placement::new(scale, x, geometry.margins.top),
                &theme.month_year,
                &text_style,
                geometry.magnitude,
            )
        })
        .collect())
}

/// Recolor the existing cells of `dates` with `style`.
///
/// `dates` must already be restricted to the grid's month.
pub fn day_overlay(dates: &[NaiveDate], grid: &MonthGrid, style: &ShapeStyle) -> Vec<Request> {
    dates
        .iter()
        .filter_map(|date| match grid.day_element_id(*date) {
            Some(id) => Some(style_shape(id, style.fill, style.outline, Some(style.alignment))),
            None => {
                tracing::warn!("No day cell for {}, skipping overlay", date);
                None
            }
        })
        .collect()
}
