//! Board configuration and styling.
//!
//! Both structs deserialize from a partial JS object or JSON document;
//! missing fields take the defaults of the 16 x 16 practicum board.

use serde::{Deserialize, Serialize};

use crate::error::LayoutError;
use crate::units::{INCH, PIN_SPACING};

const FEED_EPSILON: f64 = 1e-9;

/// Colors and font size used by the board primitives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BoardStyle {
    /// Element border color. Not used by any board primitive.
    pub color: String,
    /// Element fill color. Not used by any board primitive.
    pub fill: String,
    /// Shadow color. Not used by any board primitive.
    pub shadow_color: String,
    /// Substrate background.
    pub substrate_color: String,
    /// Pads, feeds and ground strip.
    pub metal_color: String,
    /// Row and column labels.
    pub text_color: String,
    /// Via openings.
    pub housing_color: String,
    /// Label font size in points.
    pub font_size: f64,
}

impl Default for BoardStyle {
    fn default() -> Self {
        Self {
            color: "#DDD".to_string(),
            fill: "#964B00".to_string(),
            shadow_color: "#E5E5E5".to_string(),
            substrate_color: "#964B00".to_string(),
            metal_color: "#FFD700".to_string(),
            text_color: "#000000".to_string(),
            housing_color: "#333".to_string(),
            font_size: 8.0,
        }
    }
}

/// Parameters of a perforated prototyping board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BoardConfig {
    /// Number of hole rows, labelled `1..=rows` top to bottom.
    pub rows: u32,
    /// Number of hole columns, labelled `A, B, ...` left to right.
    pub cols: u32,
    /// Center-to-center hole distance.
    pub pin_spacing: f64,
    /// Half-width of a square metal pad.
    pub outer_radius: f64,
    /// Half-width of the via opening drawn on a pad.
    pub inner_radius: f64,
    /// Validated but never drawn; kept so existing configurations still load.
    pub via_radius: f64,
    /// Width of the ground strip around the hole grid.
    pub strip_width: f64,
    /// Whether row and column labels are drawn.
    pub show_labels: bool,
    /// Zero-based grid rows of the upper and lower side SMA feeds.
    ///
    /// The upper feed's isolation gap must stay below the top ground strip
    /// and the two gaps must not meet. A lower feed whose gap reaches the
    /// bottom ground strip is reported by [`BoardConfig::advisories`]; the
    /// bottom corner fills and side strips are not meaningful in that case.
    pub feed_rows: [u32; 2],
    /// Colors and font size.
    pub style: BoardStyle,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            rows: 16,
            cols: 16,
            pin_spacing: PIN_SPACING,
            outer_radius: 0.1,
            inner_radius: 0.02,
            via_radius: 0.012,
            strip_width: 0.2 * INCH,
            show_labels: true,
            feed_rows: [2, 13],
            style: BoardStyle::default(),
        }
    }
}

impl BoardConfig {
    /// Default board with a different grid size.
    pub fn with_grid(rows: u32, cols: u32) -> Self {
        Self {
            rows,
            cols,
            ..Self::default()
        }
    }

    /// Rejects configurations that cannot produce a board.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidConfiguration`] for an empty grid, a
    /// length that is not a positive finite number, a via opening at least as
    /// large as its pad, side feeds out of order, side feeds whose isolation
    /// gaps meet, or an upper side feed whose gap reaches the top ground strip.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.rows < 1 {
            return Err(invalid(format!("rows must be at least 1, got {}", self.rows)));
        }
        if self.cols < 1 {
            return Err(invalid(format!("cols must be at least 1, got {}", self.cols)));
        }

        for (label, value) in [
            ("pin spacing", self.pin_spacing),
            ("outer radius", self.outer_radius),
            ("inner radius", self.inner_radius),
            ("via radius", self.via_radius),
            ("strip width", self.strip_width),
            ("font size", self.style.font_size),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(invalid(format!(
                    "{label} must be a positive finite length, got {value}"
                )));
            }
        }

        if self.inner_radius >= self.outer_radius {
            return Err(invalid(format!(
                "inner radius {} must be smaller than outer radius {}",
                self.inner_radius, self.outer_radius
            )));
        }

        let [upper, lower] = self.feed_rows;
        if upper >= lower {
            return Err(invalid(format!(
                "feed rows must be increasing, got [{upper}, {lower}]"
            )));
        }

        let s = self.pin_spacing;
        let clearance = self.feed_clearance();
        let feed_span = f64::from(lower - upper) * s;
        if feed_span <= 2.0 * clearance {
            return Err(invalid(format!(
                "feed rows [{upper}, {lower}] are {feed_span} apart; their isolation gaps need more than {}",
                2.0 * clearance
            )));
        }

        let strip_inner_top = self.grid_iso() + self.outer_radius;
        let upper_gap_top = f64::from(upper).mul_add(-s, clearance);
        if upper_gap_top > strip_inner_top + FEED_EPSILON {
            return Err(invalid(format!(
                "upper feed row {upper} puts its isolation gap at {upper_gap_top}, above the top ground strip at {strip_inner_top}"
            )));
        }

        Ok(())
    }

    fn grid_iso(&self) -> f64 {
        2.0f64.mul_add(-self.outer_radius, self.pin_spacing)
    }

    /// Distance from a side feed center to the far edge of its isolation gap.
    fn feed_clearance(&self) -> f64 {
        2.0f64.mul_add(self.grid_iso(), self.outer_radius)
    }

    /// Non-fatal problems with a valid configuration.
    pub fn advisories(&self) -> Vec<String> {
        let mut notes = Vec::new();

        let pad_diameter = 2.0 * self.outer_radius;
        if self.pin_spacing <= pad_diameter {
            notes.push(format!(
                "pin spacing {} does not exceed pad diameter {pad_diameter}; pads touch or overlap",
                self.pin_spacing
            ));
        }

        let lower = self.feed_rows[1];
        let lower_gap_bottom = f64::from(lower).mul_add(self.pin_spacing, self.feed_clearance());
        let strip_inner_bottom = f64::from(self.rows.saturating_sub(1))
            .mul_add(self.pin_spacing, self.grid_iso() + self.outer_radius);
        if lower_gap_bottom > strip_inner_bottom + FEED_EPSILON {
            notes.push(format!(
                "SMA feed at grid row {lower} lies outside the usable edge of the {}-row grid; \
                 its isolation gap overlaps the bottom ground strip",
                self.rows
            ));
        }

        notes
    }
}

fn invalid(msg: String) -> LayoutError {
    LayoutError::InvalidConfiguration(msg)
}
