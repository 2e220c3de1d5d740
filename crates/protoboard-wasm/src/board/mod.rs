//! Perforated prototyping board with a ground strip and SMA feed cutouts.
//!
//! A [`PrototypeBoard`] is laid out once from a [`BoardConfig`]. Its anchors
//! are fixed after construction; hosts may still append primitives such as
//! wires between anchors.

pub mod config;
pub mod layout;

use std::collections::BTreeMap;

pub use config::{BoardConfig, BoardStyle};
pub use layout::{column_name, hole_name, BoardFrame, ROW_LABEL_DROP};

use crate::element::{Element, HasAnchors, HasPrimitives, Primitive, Rotatable};
use crate::error::LayoutError;
use crate::geometry::Point;

/// Number of feed and solder-point anchors on every board.
pub const FEED_ANCHOR_COUNT: usize = 12;

/// A laid-out prototyping board.
#[derive(Debug, Clone)]
pub struct PrototypeBoard {
    config: BoardConfig,
    frame: BoardFrame,
    element: Element,
}

impl PrototypeBoard {
    /// Lays out a board.
    ///
    /// Primitives are emitted in draw order: substrate, top and bottom feed
    /// pads, per side the two feed pads and the strip between them, the four
    /// corner ground fills, then for each column its label (when enabled)
    /// followed by a metal pad and via per row, and finally the row labels.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidConfiguration`] when
    /// [`BoardConfig::validate`] rejects the configuration. No geometry is
    /// produced in that case.
    pub fn new(config: BoardConfig) -> Result<Self, LayoutError> {
        config.validate()?;

        let frame = BoardFrame::new(&config);
        let mut element = Element::new();
        for note in config.advisories() {
            element.warn(note);
        }

        let metal = config.style.metal_color.as_str();
        layout::push_substrate(&mut element, &frame, &config.style.substrate_color);
        layout::push_top_bottom_feeds(&mut element, &frame, metal);
        layout::push_side_feeds(&mut element, &frame, metal);
        layout::push_corner_fills(&mut element, &frame, metal);
        layout::add_feed_anchors(&mut element, &frame)?;
        layout::push_grid(&mut element, &config)?;

        log::debug!(
            "laid out {}x{} board: {:.3} x {:.3}, {} primitives, {} anchors",
            config.rows,
            config.cols,
            frame.width,
            frame.height,
            element.primitives().len(),
            element.anchors().len()
        );

        Ok(Self {
            config,
            frame,
            element,
        })
    }

    /// The configuration the board was laid out from.
    pub const fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Derived outline and feed positions.
    pub const fn frame(&self) -> &BoardFrame {
        &self.frame
    }

    /// Total board width.
    pub const fn width(&self) -> f64 {
        self.frame.width
    }

    /// Total board height.
    pub const fn height(&self) -> f64 {
        self.frame.height
    }

    /// Non-fatal layout warnings.
    pub fn warnings(&self) -> &[String] {
        self.element.warnings()
    }

    /// Appends a wire between two board anchors.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::UnknownAnchor`] if either name is not a board anchor.
    pub fn push_wire(
        &mut self,
        from: &str,
        to: &str,
        color: &str,
        line_width: f64,
    ) -> Result<(), LayoutError> {
        self.element.push_wire(from, to, color, line_width)
    }

    /// The underlying element.
    pub const fn element(&self) -> &Element {
        &self.element
    }

    /// Consumes the board, returning the underlying element.
    pub fn into_element(self) -> Element {
        self.element
    }
}

impl HasPrimitives for PrototypeBoard {
    fn primitives(&self) -> &[Primitive] {
        self.element.primitives()
    }

    fn push_primitive(&mut self, primitive: Primitive) {
        self.element.push_primitive(primitive);
    }
}

impl HasAnchors for PrototypeBoard {
    fn anchors(&self) -> &BTreeMap<String, Point> {
        self.element.anchors()
    }
}

impl Rotatable for PrototypeBoard {
    fn theta(&self) -> f64 {
        self.element.theta()
    }

    fn set_theta(&mut self, degrees: f64) {
        self.element.set_theta(degrees);
    }
}
