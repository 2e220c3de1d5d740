//! Paint tracking for tessellation.
//!
//! Tracks the fill color of the primitive being tessellated and records the
//! triangle index range each color covers, so the renderer can draw the
//! buffer in order with one color per range.

use super::types::{GeometryBuilder, PaintRange};

/// Tracks the active paint color and records index ranges per color.
#[derive(Debug, Default)]
pub struct PaintTracker {
    /// Active color and the index at which it started.
    open: Option<(String, u32)>,
    /// Closed ranges in draw order.
    ranges: Vec<PaintRange>,
}

impl PaintTracker {
    /// Creates a tracker with no active color.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            open: None,
            ranges: Vec::new(),
        }
    }

    /// Returns the active color, if any.
    #[must_use]
    pub fn current(&self) -> Option<&str> {
        self.open.as_ref().map(|(color, _)| color.as_str())
    }

    /// Switches the active color. Consecutive primitives with the same
    /// color share one range; a change closes the open range.
    pub fn set_color(&mut self, color: &str, builder: &GeometryBuilder) {
        if self.current() == Some(color) {
            return;
        }
        let idx = builder.index_count();
        self.close(idx);
        self.open = Some((color.to_string(), idx));
    }

    /// Finishes tracking and returns all paint ranges. Empty ranges are dropped.
    #[must_use]
    pub fn finish(mut self, builder: &GeometryBuilder) -> Vec<PaintRange> {
        self.close(builder.index_count());
        self.ranges
    }

    fn close(&mut self, idx: u32) {
        if let Some((color, start)) = self.open.take() {
            if idx > start {
                self.ranges.push(PaintRange {
                    index_start: start,
                    index_end: idx,
                    color,
                });
            }
        }
    }
}
