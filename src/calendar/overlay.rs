//! Quiz markers and the legend.

use chrono::NaiveDate;
use serde::Serialize;

use super::dates::DateCategory;
use super::layout::{GridSlot, cell_position};
use super::locale::Labels;
use super::requests::{ParagraphAlignment, Placement, Request, create_shape, label, style_shape};
use super::service::ElementIds;
use super::theme::{Geometry, Scale, Theme};

pub const LEGEND_SLOTS_PER_ROW: usize = 3;

/// Gap between a marker or legend sample and the right edge of its
/// container, as a fraction of the magnitude.
const EDGE_GAP: f64 = 0.05;

/// Categories that have at least one date in the month being drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Presence {
    pub class: bool,
    pub lab: bool,
    pub exam: bool,
    pub holiday: bool,
    pub quiz: bool,
}

impl Presence {
    pub fn mark(&mut self, category: DateCategory) {
        *self.flag_mut(category) = true;
    }

    pub fn contains(&self, category: DateCategory) -> bool {
        match category {
            DateCategory::Class => self.class,
            DateCategory::Lab => self.lab,
            DateCategory::Exam => self.exam,
            DateCategory::Holiday => self.holiday,
            DateCategory::Quiz => self.quiz,
        }
    }

    fn flag_mut(&mut self, category: DateCategory) -> &mut bool {
        match category {
            DateCategory::Class => &mut self.class,
            DateCategory::Lab => &mut self.lab,
            DateCategory::Exam => &mut self.exam,
            DateCategory::Holiday => &mut self.holiday,
            DateCategory::Quiz => &mut self.quiz,
        }
    }
}

/// Top-left corner of the quiz marker drawn inside the cell at `slot`.
/// The marker hugs the right edge and is vertically centered.
pub fn quiz_marker_position(geometry: &Geometry, slot: GridSlot) -> (f64, f64) {
    let (x, y) = cell_position(geometry, slot);
    let m = geometry.magnitude;
    (
        x + (geometry.day.x - geometry.quiz.x - EDGE_GAP) * m,
        y + ((geometry.day.y - geometry.quiz.y) / 2.0) * m,
    )
}

/// One marker per quiz date. `dates` must already be restricted to the
/// month being drawn.
pub fn quiz_markers(
    theme: &Theme,
    ids: &mut dyn ElementIds,
    page_id: &str,
    dates: &[NaiveDate],
) -> Vec<Request> {
    let geometry = &theme.geometry;
    let style = &theme.quiz;

    dates
        .iter()
        .flat_map(|date| {
            let (x, y) = quiz_marker_position(geometry, GridSlot::for_date(*date));
            let object_id = ids.next_id();
            [
                create_shape(
                    page_id,
                    &object_id,
                    style.shape,
                    Placement::new(geometry.quiz, x, y),
                    geometry.magnitude,
                ),
                style_shape(&object_id, style.fill, style.outline, None),
            ]
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub category: DateCategory,
    pub label: String,
    pub slot: usize,
}

/// Legend entries for the present categories, in legend order, packed
/// into consecutive slots.
pub fn legend_entries(labels: &Labels, presence: &Presence) -> Vec<LegendEntry> {
    DateCategory::LEGEND_ORDER
        .into_iter()
        .filter(|c| presence.contains(*c))
        .enumerate()
        .map(|(slot, category)| LegendEntry {
            category,
            label: labels.legend_label(category).to_string(),
            slot,
        })
        .collect()
}

/// Top-left corner of a legend slot. Slots fill rows left to right.
pub fn legend_slot_position(geometry: &Geometry, slot: usize) -> (f64, f64) {
    let m = geometry.magnitude;
    let margins = &geometry.margins;
    let slot_width = (geometry.legend_item.x + geometry.legend_label.x) * m + margins.column_gap;
    let slot_height = geometry.legend_label.y * m + margins.legend_line_gap;
    let column = (slot % LEGEND_SLOTS_PER_ROW) as f64;
    let row = (slot / LEGEND_SLOTS_PER_ROW) as f64;
    (
        margins.legend_left + column * slot_width,
        margins.legend_top + row * slot_height,
    )
}

/// Sample shape plus label for every entry.
pub fn legend(
    theme: &Theme,
    ids: &mut dyn ElementIds,
    page_id: &str,
    entries: &[LegendEntry],
) -> Vec<Request> {
    entries
        .iter()
        .flat_map(|entry| legend_item(theme, ids, page_id, entry))
        .collect()
}

fn legend_item(
    theme: &Theme,
    ids: &mut dyn ElementIds,
    page_id: &str,
    entry: &LegendEntry,
) -> Vec<Request> {
    let geometry = &theme.geometry;
    let m = geometry.magnitude;
    let (slot_x, slot_y) = legend_slot_position(geometry, entry.slot);

    let (kind, scale, x, y, fill, outline, alignment) =
        match theme.days.for_category(entry.category) {
            Some(style) => (
                theme.cell_shape,
                geometry.legend_item,
                slot_x,
                slot_y,
                style.fill,
                style.outline,
                Some(style.alignment),
            ),
            None => {
                // Quiz marker, centered vertically on the sample row
                let quiz = &theme.quiz;
                (
                    quiz.shape,
                    geometry.quiz,
                    slot_x + (geometry.legend_item.x - geometry.quiz.x) * m,
                    slot_y + ((geometry.legend_item.y - geometry.quiz.y) / 2.0) * m,
                    quiz.fill,
                    quiz.outline,
                    None,
                )
            }
        };

    let sample_id = ids.next_id();
    let mut requests = vec![
        create_shape(page_id, &sample_id, kind, Placement::new(scale, x, y), m),
        style_shape(&sample_id, fill, outline, alignment),
    ];
    requests.extend(label(
        page_id,
        &ids.next_id(),
        &entry.label,
        label_placement(geometry, scale, x, y),
        ParagraphAlignment::Start,
        &theme.label_text,
        m,
    ));
    requests
}

fn label_placement(geometry: &Geometry, sample: Scale, x: f64, y: f64) -> Placement {
    let m = geometry.magnitude;
    Placement::new(
        geometry.legend_label,
        x + (sample.x + EDGE_GAP) * m,
        y - geometry.legend_label.y * m * 0.25,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::layout::month_grid;
    use crate::calendar::requests::ShapeKind;
    use crate::calendar::service::SequentialIds;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn created_shapes(requests: &[Request]) -> Vec<(ShapeKind, f64, f64)> {
        requests
            .iter()
            .filter_map(|r| match r {
                Request::CreateShape(s) => Some((
                    s.shape_type,
                    s.element_properties.transform.translate_x,
                    s.element_properties.transform.translate_y,
                )),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_quiz_markers_sit_inside_their_day_cell() {
        let theme = Theme::default();
        let geometry = &theme.geometry;
        let mut ids = SequentialIds::default();
        let grid = month_grid(&theme, &mut ids, "page", 2024, 1).unwrap();

        for day in 1..=28 {
            let d = date(2024, 1, day);
            let requests = quiz_markers(&theme, &mut ids, "page", &[d]);
            assert_eq!(requests.len(), 2);

            let (_, x, y) = created_shapes(&requests)[0];
            let (cell_x, cell_y) = cell_position(geometry, grid.slots[day as usize - 1]);
            let m = geometry.magnitude;
            assert!(x > cell_x && x + geometry.quiz.x * m < cell_x + geometry.day.x * m);
            assert!(y > cell_y && y + geometry.quiz.y * m < cell_y + geometry.day.y * m);
        }
    }

    #[test]
    fn test_quiz_marker_offset() {
        let geometry = Geometry::default();
        let slot = GridSlot { week: 1, weekday: 2 };
        let (cell_x, cell_y) = cell_position(&geometry, slot);
        let (x, y) = quiz_marker_position(&geometry, slot);
        let m = geometry.magnitude;
        assert!((x - cell_x - (0.85 - 0.17 - 0.05) * m).abs() < 1e-6);
        assert!((y - cell_y - ((0.2766 - 0.17) / 2.0) * m).abs() < 1e-6);
    }

    #[test]
    fn test_quiz_marker_style() {
        let theme = Theme::default();
        let mut ids = SequentialIds::default();
        let requests = quiz_markers(&theme, &mut ids, "page", &[date(2024, 1, 15)]);
        assert_eq!(created_shapes(&requests)[0].0, ShapeKind::Ellipse);
        let Request::UpdateShapeProperties(update) = &requests[1] else {
            panic!("Expected a shape update");
        };
        assert_eq!(update.object_id, requests[0].object_id());
        assert_eq!(update.shape_properties.shape_background_fill, theme.quiz.fill);
    }

    #[test]
    fn test_legend_compacts_absent_categories() {
        let presence = Presence {
            class: true,
            lab: false,
            exam: true,
            holiday: false,
            quiz: true,
        };
        let entries = legend_entries(&Labels::french(), &presence);
        let summary: Vec<(DateCategory, usize)> =
            entries.iter().map(|e| (e.category, e.slot)).collect();
        assert_eq!(
            summary,
            vec![
                (DateCategory::Class, 0),
                (DateCategory::Exam, 1),
                (DateCategory::Quiz, 2),
            ]
        );
        assert_eq!(entries[1].label, "Examen");
    }

    #[test]
    fn test_legend_wraps_after_three_slots() {
        let geometry = Geometry::default();
        let (x0, y0) = legend_slot_position(&geometry, 0);
        let (x2, y2) = legend_slot_position(&geometry, 2);
        let (x3, y3) = legend_slot_position(&geometry, 3);
        assert_eq!((x0, y0), (geometry.margins.legend_left, geometry.margins.legend_top));
        assert_eq!(y2, y0);
        assert!(x2 > x0);
        assert_eq!(x3, x0);
        assert!(y3 > y0);
    }

    #[test]
    fn test_legend_requests() {
        let theme = Theme::default();
        let mut ids = SequentialIds::default();
        let mut presence = Presence::default();
        presence.mark(DateCategory::Holiday);
        presence.mark(DateCategory::Quiz);
        let entries = legend_entries(&theme.labels, &presence);
        let requests = legend(&theme, &mut ids, "page", &entries);

        // Sample shape + style, then a four request label, per entry
        assert_eq!(requests.len(), 2 * 6);
        let shapes = created_shapes(&requests);
        assert_eq!(shapes[0].0, theme.cell_shape);
        assert_eq!(shapes[1].0, ShapeKind::TextBox);
        assert_eq!(shapes[2].0, ShapeKind::Ellipse);
        assert_eq!(shapes[3].0, ShapeKind::TextBox);

        // Quiz sample is shifted right within its slot
        let (slot_x, _) = legend_slot_position(&theme.geometry, 1);
        assert!(shapes[2].1 > slot_x);
    }

    #[test]
    fn test_presence() {
        let mut presence = Presence::default();
        assert!(!presence.contains(DateCategory::Lab));
        presence.mark(DateCategory::Lab);
        assert!(presence.contains(DateCategory::Lab));
        assert!(legend_entries(&Labels::english(), &Presence::default()).is_empty());
    }
}
