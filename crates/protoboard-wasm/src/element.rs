//! Drawable primitives and the element they are collected on.
//!
//! An [`Element`] is an ordered list of [`Primitive`]s (later entries draw on
//! top) plus a map of named anchors other elements can connect to. The
//! capability traits let layout code and hosts work against any element
//! without knowing how it was built.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::LayoutError;
use crate::geometry::Point;

/// Stroke width used for unfilled polygons that do not set one.
pub const DEFAULT_LINE_WIDTH: f64 = 0.02;

/// Horizontal text alignment relative to the text position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum HAlign {
    /// Text starts at the position.
    Left,
    /// Text is centered on the position.
    Center,
    /// Text ends at the position.
    Right,
}

/// Vertical text alignment relative to the text position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum VAlign {
    /// Top edge at the position.
    Top,
    /// Centered on the position.
    Center,
    /// Bottom edge at the position.
    Bottom,
}

/// A closed polygon.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Polygon {
    /// Outline vertices in order; the closing edge is implicit.
    pub vertices: Vec<Point>,
    /// Whether the interior is filled.
    pub fill: bool,
    /// Fill and stroke color.
    pub color: String,
    /// Outline width; `None` leaves it to the host default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_width: Option<f64>,
}

/// A text label.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Text {
    /// Anchor position of the text.
    pub position: Point,
    /// Text content.
    pub content: String,
    /// Font size in points.
    pub font_size: f64,
    /// Horizontal alignment.
    pub halign: HAlign,
    /// Vertical alignment.
    pub valign: VAlign,
    /// Text color.
    pub color: String,
    /// Whether the text turns with its element. Board labels stay upright.
    pub rotate_with_parent: bool,
    /// Stacking order relative to other primitives.
    pub zorder: i32,
}

/// A straight line between two points.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    /// Start point.
    pub from: Point,
    /// End point.
    pub to: Point,
    /// Line color.
    pub color: String,
    /// Line width.
    pub line_width: f64,
}

/// One drawable primitive.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Primitive {
    /// Filled or stroked polygon.
    Polygon(Polygon),
    /// Text label.
    Text(Text),
    /// Line segment.
    Segment(Segment),
}

impl Primitive {
    /// Returns the polygon if this primitive is one.
    pub const fn as_polygon(&self) -> Option<&Polygon> {
        match self {
            Self::Polygon(polygon) => Some(polygon),
            _ => None,
        }
    }

    /// Returns the text if this primitive is one.
    pub const fn as_text(&self) -> Option<&Text> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// Read access to an ordered primitive list, plus appending.
pub trait HasPrimitives {
    /// Primitives in draw order.
    fn primitives(&self) -> &[Primitive];

    /// Appends a primitive on top of everything drawn so far.
    fn push_primitive(&mut self, primitive: Primitive);

    /// Number of polygon primitives.
    fn polygon_count(&self) -> usize {
        self.primitives()
            .iter()
            .filter(|p| p.as_polygon().is_some())
            .count()
    }

    /// Number of text primitives.
    fn text_count(&self) -> usize {
        self.primitives()
            .iter()
            .filter(|p| p.as_text().is_some())
            .count()
    }
}

/// Named connection points.
pub trait HasAnchors {
    /// All anchors, ordered by name.
    fn anchors(&self) -> &BTreeMap<String, Point>;

    /// Looks up one anchor.
    fn anchor(&self, name: &str) -> Option<Point> {
        self.anchors().get(name).copied()
    }
}

/// Rotation setting applied by the host when placing the element.
pub trait Rotatable {
    /// Rotation in degrees, counter-clockwise.
    fn theta(&self) -> f64;

    /// Sets the rotation in degrees.
    fn set_theta(&mut self, degrees: f64);
}

/// A drawable element: primitives, anchors, rotation and layout warnings.
#[derive(Debug, Clone, Default)]
pub struct Element {
    primitives: Vec<Primitive>,
    anchors: BTreeMap<String, Point>,
    theta: f64,
    warnings: Vec<String>,
}

impl Element {
    /// Creates an empty element.
    pub const fn new() -> Self {
        Self {
            primitives: Vec::new(),
            anchors: BTreeMap::new(),
            theta: 0.0,
            warnings: Vec::new(),
        }
    }

    /// Appends a filled polygon with no outline width.
    pub fn push_filled(&mut self, vertices: Vec<Point>, color: &str) {
        self.primitives.push(Primitive::Polygon(Polygon {
            vertices,
            fill: true,
            color: color.to_string(),
            line_width: None,
        }));
    }

    /// Registers an anchor.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::DuplicateAnchor`] if the name is taken; the
    /// existing anchor is left untouched.
    pub fn add_anchor(&mut self, name: impl Into<String>, at: Point) -> Result<(), LayoutError> {
        let name = name.into();
        if self.anchors.contains_key(&name) {
            return Err(LayoutError::DuplicateAnchor(name));
        }
        self.anchors.insert(name, at);
        Ok(())
    }

    /// Appends a segment between two anchors of this element.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::UnknownAnchor`] for a missing anchor name. Nothing
    /// is appended in that case.
    pub fn push_wire(
        &mut self,
        from: &str,
        to: &str,
        color: &str,
        line_width: f64,
    ) -> Result<(), LayoutError> {
        let start = self
            .anchor(from)
            .ok_or_else(|| LayoutError::UnknownAnchor(from.to_string()))?;
        let end = self
            .anchor(to)
            .ok_or_else(|| LayoutError::UnknownAnchor(to.to_string()))?;
        self.primitives.push(Primitive::Segment(Segment {
            from: start,
            to: end,
            color: color.to_string(),
            line_width,
        }));
        Ok(())
    }

    /// Records a non-fatal layout warning.
    pub fn warn(&mut self, msg: String) {
        log::warn!("{msg}");
        self.warnings.push(msg);
    }

    /// Warnings recorded while the element was laid out.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }
}

impl HasPrimitives for Element {
    fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    fn push_primitive(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }
}

impl HasAnchors for Element {
    fn anchors(&self) -> &BTreeMap<String, Point> {
        &self.anchors
    }
}

impl Rotatable for Element {
    fn theta(&self) -> f64 {
        self.theta
    }

    fn set_theta(&mut self, degrees: f64) {
        self.theta = degrees;
    }
}
