//! Geometry and style tables for calendar slides.
//!
//! All sizes are in EMU and derive from a single magnitude: every shape
//! starts as a `magnitude × magnitude` square and is scaled down by its
//! `Scale`. Margins are stored already multiplied by the magnitude.
//!
//! A `Theme` is an immutable value handed to the generator, so an
//! alternative look (or a test fixture) is just a different `Theme`.

use super::dates::DateCategory;
use super::locale::Labels;
use super::requests::{
    BackgroundFill, ContentAlignment, DashStyle, Outline, RgbColor, ShapeKind, TextStyle,
};

pub const DEFAULT_MAGNITUDE: f64 = 3_000_000.0;

/// Horizontal position of the year box on the default layout.
pub const DEFAULT_YEAR_BOX_LEFT: f64 = 4_634_893.87;

const THIN_OUTLINE: f64 = 9_525.0;
const MARKER_OUTLINE: f64 = 28_575.0;
const CELL_OUTLINE: f64 = 38_100.0;
const EXAM_OUTLINE: f64 = 76_200.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale {
    pub x: f64,
    pub y: f64,
}

impl Scale {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Page margins and gaps in EMU.
#[derive(Debug, Clone, PartialEq)]
pub struct Margins {
    pub top: f64,
    pub left: f64,
    pub column_gap: f64,
    pub line_gap: f64,
    pub day_labels_top: f64,
    pub day_elements_top: f64,
    pub legend_left: f64,
    pub legend_top: f64,
    pub legend_line_gap: f64,
}

impl Margins {
    pub fn scaled(magnitude: f64) -> Self {
        Self {
            top: 0.25 * magnitude,
            left: 0.25 * magnitude,
            column_gap: 0.16 * magnitude,
            line_gap: 0.16 * magnitude,
            day_labels_top: 0.9 * magnitude,
            day_elements_top: 1.25 * magnitude,
            legend_left: 1.03 * magnitude,
            legend_top: 3.84 * magnitude,
            legend_line_gap: 0.05 * magnitude,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    pub magnitude: f64,
    pub weekday_label: Scale,
    pub day: Scale,
    pub quiz: Scale,
    pub legend_item: Scale,
    pub legend_label: Scale,
    pub month_box: Scale,
    pub year_box: Scale,
    pub year_box_left: f64,
    pub margins: Margins,
}

impl Geometry {
    /// Distance between the left edges of two adjacent day columns.
    pub fn column_shift(&self) -> f64 {
        self.day.x * self.magnitude + self.margins.column_gap
    }

    /// Distance between the top edges of two adjacent week rows.
    pub fn row_shift(&self) -> f64 {
        self.day.y * self.magnitude + self.margins.line_gap
    }

    /// Distance between two weekday header labels.
    pub fn weekday_label_shift(&self) -> f64 {
        self.weekday_label.x * self.magnitude + self.margins.column_gap
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            magnitude: DEFAULT_MAGNITUDE,
            weekday_label: Scale::new(0.85, 0.2766),
            day: Scale::new(0.85, 0.2766),
            quiz: Scale::new(0.17, 0.17),
            legend_item: Scale::new(0.5774, 0.1548),
            legend_label: Scale::new(0.9, 0.2),
            month_box: Scale::new(1.1099, 0.3376),
            year_box: Scale::new(0.8817, 0.3376),
            year_box_left: DEFAULT_YEAR_BOX_LEFT,
            margins: Margins::scaled(DEFAULT_MAGNITUDE),
        }
    }
}

/// Look of a text-bearing shape.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeStyle {
    pub fill: BackgroundFill,
    pub outline: Outline,
    pub alignment: ContentAlignment,
    pub text_color: RgbColor,
}

impl ShapeStyle {
    fn cell(fill: RgbColor, outline_weight: f64, dash: DashStyle) -> Self {
        Self {
            fill: BackgroundFill::solid(fill),
            outline: Outline::new(RgbColor::BLACK, outline_weight, dash),
            alignment: ContentAlignment::Middle,
            text_color: RgbColor::BLACK,
        }
    }
}

/// Look of a text-less marker such as the quiz dot.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerStyle {
    pub shape: ShapeKind,
    pub fill: BackgroundFill,
    pub outline: Outline,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayStyles {
    pub normal: ShapeStyle,
    pub class: ShapeStyle,
    pub lab: ShapeStyle,
    pub exam: ShapeStyle,
    pub holiday: ShapeStyle,
}

impl DayStyles {
    /// Cell style for a category. Quizzes are drawn as markers and have none.
    pub fn for_category(&self, category: DateCategory) -> Option<&ShapeStyle> {
        match category {
            DateCategory::Class => Some(&self.class),
            DateCategory::Lab => Some(&self.lab),
            DateCategory::Exam => Some(&self.exam),
            DateCategory::Holiday => Some(&self.holiday),
            DateCategory::Quiz => None,
        }
    }
}

impl Default for DayStyles {
    fn default() -> Self {
        let gray = RgbColor::new(0.8784314, 0.8784314, 0.8784314);
        Self {
            normal: ShapeStyle {
                fill: BackgroundFill::solid(gray),
                outline: Outline::new(gray, THIN_OUTLINE, DashStyle::Solid),
                alignment: ContentAlignment::Middle,
                text_color: RgbColor::BLACK,
            },
            class: ShapeStyle::cell(
                RgbColor::new(0.9411765, 0.7019608, 0.70980394),
                CELL_OUTLINE,
                DashStyle::Dash,
            ),
            lab: ShapeStyle::cell(
                RgbColor::new(1.0, 0.90588236, 0.63529414),
                CELL_OUTLINE,
                DashStyle::Dot,
            ),
            exam: ShapeStyle::cell(
                RgbColor::new(0.6, 0.7019608, 0.85882354),
                EXAM_OUTLINE,
                DashStyle::Solid,
            ),
            holiday: ShapeStyle::cell(
                RgbColor::new(0.74509805, 0.8784314, 0.6901961),
                CELL_OUTLINE,
                DashStyle::LongDashDot,
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub geometry: Geometry,
    /// Shape kind of day cells, month/year boxes and legend samples.
    pub cell_shape: ShapeKind,
    pub day_text: TextStyle,
    pub month_year_text: TextStyle,
    pub label_text: TextStyle,
    pub month_year: ShapeStyle,
    pub days: DayStyles,
    pub quiz: MarkerStyle,
    pub labels: Labels,
}

impl Theme {
    pub fn with_labels(mut self, labels: Labels) -> Self {
        self.labels = labels;
        self
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            geometry: Geometry::default(),
            cell_shape: ShapeKind::FlowChartTerminator,
            day_text: TextStyle::new("Oswald", 37.0),
            month_year_text: TextStyle::new("Oswald", 48.0),
            label_text: TextStyle::new("Oswald", 37.0),
            month_year: ShapeStyle {
                fill: BackgroundFill::not_rendered(),
                outline: Outline::new(RgbColor::new(0.4, 0.4, 0.4), CELL_OUTLINE, DashStyle::Solid),
                alignment: ContentAlignment::Middle,
                text_color: RgbColor::BLACK,
            },
            days: DayStyles::default(),
            quiz: MarkerStyle {
                shape: ShapeKind::Ellipse,
                fill: BackgroundFill::solid(RgbColor::new(0.84705883, 0.13725491, 0.2)),
                outline: Outline::new(RgbColor::BLACK, MARKER_OUTLINE, DashStyle::Solid),
            },
            labels: Labels::default(),
        }
    }
}
