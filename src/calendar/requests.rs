//! Slides API request payloads and the builders that produce them.
//!
//! Every visual element of a calendar slide is made of a handful of
//! requests: create the shape, style it, insert the text, style the
//! text, style the paragraph. The types here serialize to exactly the
//! JSON the `presentations.batchUpdate` endpoint expects, e.g.
//!
//! ```json
//! {"createShape": {"objectId": "...", "shapeType": "ELLIPSE", ...}}
//! ```
//!
//! Builders are pure functions. Element ids are supplied by the caller.

use serde::{Deserialize, Serialize};

use super::theme::Scale;

pub const EMU_PER_INCH: f64 = 914_400.0;
pub const POINTS_PER_INCH: f64 = 72.0;

/// Convert English Metric Units to points.
pub fn emu_to_points(emu: f64) -> f64 {
    (emu / EMU_PER_INCH) * POINTS_PER_INCH
}

/// Convert points to English Metric Units.
pub fn points_to_emu(points: f64) -> f64 {
    (points / POINTS_PER_INCH) * EMU_PER_INCH
}

// Enumerations mirrored from the Slides API

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShapeKind {
    TextBox,
    Rectangle,
    RoundRectangle,
    Ellipse,
    FlowChartTerminator,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentAlignment {
    Top,
    Middle,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParagraphAlignment {
    Start,
    Center,
    End,
    Justified,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SpacingMode {
    NeverCollapse,
    CollapseLists,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TextDirection {
    LeftToRight,
    RightToLeft,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DashStyle {
    Solid,
    Dot,
    Dash,
    DashDot,
    LongDash,
    LongDashDot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PropertyState {
    Rendered,
    NotRendered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Unit {
    Emu,
    Pt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RangeType {
    All,
}

// Colors, fills and outlines

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RgbColor {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
}

impl RgbColor {
    pub const BLACK: RgbColor = RgbColor::new(0.0, 0.0, 0.0);

    pub const fn new(red: f64, green: f64, blue: f64) -> Self {
        Self { red, green, blue }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpaqueColor {
    pub rgb_color: RgbColor,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolidFill {
    pub color: OpaqueColor,
    pub alpha: f64,
}

impl SolidFill {
    pub const fn opaque(color: RgbColor) -> Self {
        Self {
            color: OpaqueColor { rgb_color: color },
            alpha: 1.0,
        }
    }
}

/// Background of a shape. Either a solid color or explicitly not rendered.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackgroundFill {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_state: Option<PropertyState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solid_fill: Option<SolidFill>,
}

impl BackgroundFill {
    pub const fn solid(color: RgbColor) -> Self {
        Self {
            property_state: None,
            solid_fill: Some(SolidFill::opaque(color)),
        }
    }

    pub const fn not_rendered() -> Self {
        Self {
            property_state: Some(PropertyState::NotRendered),
            solid_fill: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutlineFill {
    pub solid_fill: SolidFill,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimension {
    pub magnitude: f64,
    pub unit: Unit,
}

impl Dimension {
    pub const fn emu(magnitude: f64) -> Self {
        Self {
            magnitude,
            unit: Unit::Emu,
        }
    }

    pub const fn pt(magnitude: f64) -> Self {
        Self {
            magnitude,
            unit: Unit::Pt,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Outline {
    pub outline_fill: OutlineFill,
    pub weight: Dimension,
    pub dash_style: DashStyle,
}

impl Outline {
    /// A solid-colored outline of `weight` EMU.
    pub const fn new(color: RgbColor, weight: f64, dash_style: DashStyle) -> Self {
        Self {
            outline_fill: OutlineFill {
                solid_fill: SolidFill::opaque(color),
            },
            weight: Dimension::emu(weight),
            dash_style,
        }
    }
}

/// Character level style applied with `updateTextStyle`.
///
/// Unset color means black, unset flags mean `false`.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub font_family: String,
    pub font_size: f64,
    pub color: Option<RgbColor>,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
}

impl TextStyle {
    pub fn new(font_family: &str, font_size: f64) -> Self {
        Self {
            font_family: font_family.to_string(),
            font_size,
            color: None,
            bold: false,
            italic: false,
            underline: false,
            strikethrough: false,
        }
    }

    pub fn with_color(mut self, color: RgbColor) -> Self {
        self.color = Some(color);
        self
    }
}

/// Where a shape lands on the page: scale factors applied to the base
/// `magnitude × magnitude` EMU size, and a translation in EMU.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub scale: Scale,
    pub translate_x: f64,
    pub translate_y: f64,
}

impl Placement {
    pub fn new(scale: Scale, translate_x: f64, translate_y: f64) -> Self {
        Self {
            scale,
            translate_x,
            translate_y,
        }
    }
}

// Request payloads

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutReference {
    pub layout_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSlideRequest {
    pub object_id: String,
    pub slide_layout_reference: LayoutReference,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Size {
    pub height: Dimension,
    pub width: Dimension,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AffineTransform {
    pub scale_x: f64,
    pub scale_y: f64,
    pub translate_x: f64,
    pub translate_y: f64,
    pub unit: Unit,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementProperties {
    pub page_object_id: String,
    pub size: Size,
    pub transform: AffineTransform,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateShapeRequest {
    pub object_id: String,
    pub shape_type: ShapeKind,
    pub element_properties: ElementProperties,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeProperties {
    pub shape_background_fill: BackgroundFill,
    pub outline: Outline,
    pub content_alignment: ContentAlignment,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateShapePropertiesRequest {
    pub object_id: String,
    pub shape_properties: ShapeProperties,
    pub fields: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertTextRequest {
    pub object_id: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForegroundColor {
    pub opaque_color: OpaqueColor,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyleProperties {
    pub font_family: String,
    pub font_size: Dimension,
    pub foreground_color: ForegroundColor,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextRange {
    #[serde(rename = "type")]
    pub kind: RangeType,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTextStyleRequest {
    pub object_id: String,
    pub style: TextStyleProperties,
    pub text_range: TextRange,
    pub fields: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphStyle {
    pub alignment: ParagraphAlignment,
    pub spacing_mode: SpacingMode,
    pub direction: TextDirection,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateParagraphStyleRequest {
    pub object_id: String,
    pub style: ParagraphStyle,
    pub text_range: TextRange,
    pub fields: String,
}

/// One atomic mutation of a presentation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Request {
    CreateSlide(CreateSlideRequest),
    CreateShape(CreateShapeRequest),
    UpdateShapeProperties(UpdateShapePropertiesRequest),
    InsertText(InsertTextRequest),
    UpdateTextStyle(UpdateTextStyleRequest),
    UpdateParagraphStyle(UpdateParagraphStyleRequest),
}

impl Request {
    /// The id of the object this request creates or mutates.
    pub fn object_id(&self) -> &str {
        match self {
            Request::CreateSlide(r) => &r.object_id,
            Request::CreateShape(r) => &r.object_id,
            Request::UpdateShapeProperties(r) => &r.object_id,
            Request::InsertText(r) => &r.object_id,
            Request::UpdateTextStyle(r) => &r.object_id,
            Request::UpdateParagraphStyle(r) => &r.object_id,
        }
    }
}

// Builders

pub fn create_slide(object_id: &str, layout_id: &str) -> Request {
    Request::CreateSlide(CreateSlideRequest {
        object_id: object_id.to_string(),
        slide_layout_reference: LayoutReference {
            layout_id: layout_id.to_string(),
        },
    })
}

/// Allocate a new shape of `magnitude × magnitude` EMU, scaled and
/// translated by `placement`.
pub fn create_shape(
    page_id: &str,
    object_id: &str,
    kind: ShapeKind,
    placement: Placement,
    magnitude: f64,
) -> Request {
    Request::CreateShape(CreateShapeRequest {
        object_id: object_id.to_string(),
        shape_type: kind,
        element_properties: ElementProperties {
            page_object_id: page_id.to_string(),
            size: Size {
                height: Dimension::emu(magnitude),
                width: Dimension::emu(magnitude),
            },
            transform: AffineTransform {
                scale_x: placement.scale.x,
                scale_y: placement.scale.y,
                translate_x: placement.translate_x,
                translate_y: placement.translate_y,
                unit: Unit::Emu,
            },
        },
    })
}

/// Set background fill, outline and content alignment of a shape.
/// Alignment defaults to `MIDDLE`.
pub fn style_shape(
    object_id: &str,
    fill: BackgroundFill,
    outline: Outline,
    alignment: Option<ContentAlignment>,
) -> Request {
    Request::UpdateShapeProperties(UpdateShapePropertiesRequest {
        object_id: object_id.to_string(),
        shape_properties: ShapeProperties {
            shape_background_fill: fill,
            outline,
            content_alignment: alignment.unwrap_or(ContentAlignment::Middle),
        },
        fields: String::from("shapeBackgroundFill,outline,contentAlignment"),
    })
}

pub fn insert_text(object_id: &str, text: &str) -> Request {
    Request::InsertText(InsertTextRequest {
        object_id: object_id.to_string(),
        text: text.to_string(),
    })
}

pub fn style_text(object_id: &str, style: &TextStyle) -> Request {
    Request::UpdateTextStyle(UpdateTextStyleRequest {
        object_id: object_id.to_string(),
        style: TextStyleProperties {
            font_family: style.font_family.clone(),
            font_size: Dimension::pt(style.font_size),
            foreground_color: ForegroundColor {
                opaque_color: OpaqueColor {
                    rgb_color: style.color.unwrap_or(RgbColor::BLACK),
                },
            },
            bold: style.bold,
            italic: style.italic,
            underline: style.underline,
            strikethrough: style.strikethrough,
        },
        text_range: TextRange {
            kind: RangeType::All,
        },
        fields: String::from(
            "fontFamily,fontSize,foregroundColor,bold,italic,underline,strikethrough",
        ),
    })
}

/// Paragraph style for the whole text of a shape. Alignment defaults
/// to `CENTER`; spacing collapses lists and text runs left to right.
pub fn style_paragraph(object_id: &str, alignment: Option<ParagraphAlignment>) -> Request {
    Request::UpdateParagraphStyle(UpdateParagraphStyleRequest {
        object_id: object_id.to_string(),
        style: ParagraphStyle {
            alignment: alignment.unwrap_or(ParagraphAlignment::Center),
            spacing_mode: SpacingMode::CollapseLists,
            direction: TextDirection::LeftToRight,
        },
        text_range: TextRange {
            kind: RangeType::All,
        },
        fields: String::from("alignment,spacingMode,direction"),
    })
}

/// A borderless text box: create, insert text, style text, style paragraph.
pub fn label(
    page_id: &str,
    object_id: &str,
    text: &str,
    placement: Placement,
    alignment: ParagraphAlignment,
    style: &TextStyle,
    magnitude: f64,
) -> Vec<Request> {
    vec![
        create_shape(page_id, object_id, ShapeKind::TextBox, placement, magnitude),
        insert_text(object_id, text),
        style_text(object_id, style),
        style_paragraph(object_id, Some(alignment)),
    ]
}
