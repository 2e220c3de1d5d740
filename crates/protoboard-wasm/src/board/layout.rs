//! Board frame math and the primitive emitters.
//!
//! The hole grid origin is `(0, 0)`: hole `(col, row)` sits at
//! `(col * pin_spacing, -row * pin_spacing)`. The substrate extends one
//! isolation gap plus the ground strip beyond the outermost pads on every side.

use serde::Serialize;

use crate::element::{Element, HAlign, HasPrimitives, Primitive, Text, VAlign};
use crate::error::LayoutError;
use crate::geometry::Point;

use super::config::BoardConfig;

/// Vertical offset of row labels below their row's center line.
pub const ROW_LABEL_DROP: f64 = 0.04;

const LABEL_ZORDER: i32 = 1;

/// Derived outline of a board, in grid coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardFrame {
    /// Gap between neighbouring pads.
    pub grid_iso: f64,
    /// Total board width.
    pub width: f64,
    /// Total board height.
    pub height: f64,
    /// X of the left board edge.
    pub left: f64,
    /// X of the right board edge.
    pub right: f64,
    /// Y of the top board edge.
    pub top: f64,
    /// Y of the bottom board edge.
    pub bottom: f64,
    /// X of the top and bottom feeds.
    pub x_center: f64,
    /// Y of the upper and lower side feeds.
    pub feed_y: [f64; 2],
    /// Gap between a feed and the ground strip.
    pub sma_iso: f64,
    /// Half-width of a feed pad.
    pub feed_half_width: f64,
    /// Width of the ground strip.
    pub strip_width: f64,
}

impl BoardFrame {
    /// Computes the frame of a validated configuration.
    pub fn new(config: &BoardConfig) -> Self {
        let s = config.pin_spacing;
        let r = config.outer_radius;
        let w = config.strip_width;
        let grid_iso = s - 2.0 * r;
        let border = 2.0 * grid_iso + 2.0 * r + 2.0 * w;

        let width = f64::from(config.cols.saturating_sub(1)).mul_add(s, border);
        let height = f64::from(config.rows.saturating_sub(1)).mul_add(s, border);
        let top = w + grid_iso + r;
        let left = -top;
        let [upper, lower] = config.feed_rows;

        Self {
            grid_iso,
            width,
            height,
            left,
            right: left + width,
            top,
            bottom: top - height,
            x_center: left + width / 2.0,
            feed_y: [-f64::from(upper) * s, -f64::from(lower) * s],
            sma_iso: 2.0 * grid_iso,
            feed_half_width: r,
            strip_width: w,
        }
    }

    /// Distance from a feed center to the edge of its isolation gap.
    fn feed_clearance(&self) -> f64 {
        self.feed_half_width + self.sma_iso
    }
}

/// Column name for a zero-based column index: `A..Z`, then `AA, AB, ...`.
pub fn column_name(index: u32) -> String {
    let mut letters = Vec::new();
    let mut n = u64::from(index) + 1;
    while n > 0 {
        n -= 1;
        let offset = u8::try_from(n % 26).unwrap_or_default();
        letters.push(char::from(b'A' + offset));
        n /= 26;
    }
    letters.iter().rev().collect()
}

/// Anchor name of the hole at zero-based `(col, row)`, e.g. `A1`.
pub fn hole_name(col: u32, row: u32) -> String {
    format!("{}{}", column_name(col), u64::from(row) + 1)
}

fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Vec<Point> {
    vec![
        Point::new(x0, y0),
        Point::new(x1, y0),
        Point::new(x1, y1),
        Point::new(x0, y1),
    ]
}

pub(super) fn push_substrate(element: &mut Element, frame: &BoardFrame, color: &str) {
    element.push_filled(
        rect(frame.left, frame.top, frame.right, frame.bottom),
        color,
    );
}

/// Feed pads crossing the strip at the middle of the top and bottom edges.
pub(super) fn push_top_bottom_feeds(element: &mut Element, frame: &BoardFrame, color: &str) {
    let h = frame.feed_half_width;
    for y in [frame.top, frame.bottom + frame.strip_width] {
        element.push_filled(
            rect(frame.x_center - h, y, frame.x_center + h, y - frame.strip_width),
            color,
        );
    }
}

/// Per side: the two feed pads, then the ground strip between them.
pub(super) fn push_side_feeds(element: &mut Element, frame: &BoardFrame, color: &str) {
    let h = frame.feed_half_width;
    let w = frame.strip_width;
    let clearance = frame.feed_clearance();
    let [upper, lower] = frame.feed_y;

    for x in [frame.left, frame.right - w] {
        for y in frame.feed_y {
            element.push_filled(rect(x, y + h, x + w, y - h), color);
        }
        element.push_filled(
            rect(x, upper - clearance, x + w, lower + clearance),
            color,
        );
    }
}

/// L-shaped ground fills from each top/bottom feed gap around the corner
/// to the neighbouring side feed gap.
pub(super) fn push_corner_fills(element: &mut Element, frame: &BoardFrame, color: &str) {
    let w = frame.strip_width;
    let clearance = frame.feed_clearance();
    let [upper, lower] = frame.feed_y;

    // (edge x, inward sign, feed gap x)
    let sides = [
        (frame.left, 1.0_f64, frame.x_center - clearance),
        (frame.right, -1.0, frame.x_center + clearance),
    ];
    for (edge_x, inward, gap_x) in sides {
        let inner_x = inward.mul_add(w, edge_x);
        let top_gap_y = upper + clearance;
        element.push_filled(
            vec![
                Point::new(edge_x, frame.top),
                Point::new(gap_x, frame.top),
                Point::new(gap_x, frame.top - w),
                Point::new(inner_x, frame.top - w),
                Point::new(inner_x, top_gap_y),
                Point::new(edge_x, top_gap_y),
            ],
            color,
        );
        let bottom_gap_y = lower - clearance;
        element.push_filled(
            vec![
                Point::new(edge_x, frame.bottom),
                Point::new(gap_x, frame.bottom),
                Point::new(gap_x, frame.bottom + w),
                Point::new(inner_x, frame.bottom + w),
                Point::new(inner_x, bottom_gap_y),
                Point::new(edge_x, bottom_gap_y),
            ],
            color,
        );
    }
}

/// Feed anchors on the board edge and their solder points on the strip's
/// inner edge.
pub(super) fn add_feed_anchors(element: &mut Element, frame: &BoardFrame) -> Result<(), LayoutError> {
    let w = frame.strip_width;
    let [upper, lower] = frame.feed_y;
    let feeds = [
        ("sma_top", Point::new(frame.x_center, frame.top), 0.0, -w),
        ("sma_bot", Point::new(frame.x_center, frame.bottom), 0.0, w),
        ("sma_left_top", Point::new(frame.left, upper), w, 0.0),
        ("sma_left_bot", Point::new(frame.left, lower), w, 0.0),
        ("sma_right_top", Point::new(frame.right, upper), -w, 0.0),
        ("sma_right_bot", Point::new(frame.right, lower), -w, 0.0),
    ];
    for (name, at, dx, dy) in feeds {
        element.add_anchor(name, at)?;
        element.add_anchor(format!("{name}_solder"), at.offset(dx, dy))?;
    }
    Ok(())
}

/// Pads column by column, each column preceded by its label, then the row
/// labels. Every hole gets an anchor.
pub(super) fn push_grid(element: &mut Element, config: &BoardConfig) -> Result<(), LayoutError> {
    let s = config.pin_spacing;
    let r = config.outer_radius;
    let ri = config.inner_radius;
    let style = &config.style;

    for col in 0..config.cols {
        let x = f64::from(col) * s;
        if config.show_labels {
            element.push_primitive(Primitive::Text(label(
                config,
                Point::new(x, s),
                column_name(col),
                VAlign::Center,
            )));
        }
        for row in 0..config.rows {
            let center = Point::new(x, -f64::from(row) * s);
            element.push_filled(
                rect(center.x - r, center.y + r, center.x + r, center.y - r),
                &style.metal_color,
            );
            element.push_filled(
                vec![
                    Point::new(center.x - ri, center.y - ri),
                    Point::new(center.x - ri, center.y + ri),
                    Point::new(center.x + ri, center.y + ri),
                    Point::new(center.x + ri, center.y - ri),
                ],
                &style.housing_color,
            );
            element.add_anchor(hole_name(col, row), center)?;
        }
    }

    if config.show_labels {
        for row in 0..config.rows {
            let y = -f64::from(row) * s - ROW_LABEL_DROP;
            element.push_primitive(Primitive::Text(label(
                config,
                Point::new(-s, y),
                (u64::from(row) + 1).to_string(),
                VAlign::Bottom,
            )));
        }
    }

    Ok(())
}

fn label(config: &BoardConfig, position: Point, content: String, valign: VAlign) -> Text {
    Text {
        position,
        content,
        font_size: config.style.font_size,
        halign: HAlign::Center,
        valign,
        color: config.style.text_color.clone(),
        rotate_with_parent: false,
        zorder: LABEL_ZORDER,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn column_names_single_letters() {
        assert_eq!(column_name(0), "A");
        assert_eq!(column_name(15), "P");
        assert_eq!(column_name(25), "Z");
    }

    #[test]
    fn column_names_continue_with_two_letters() {
        assert_eq!(column_name(26), "AA");
        assert_eq!(column_name(27), "AB");
        assert_eq!(column_name(51), "AZ");
        assert_eq!(column_name(52), "BA");
        assert_eq!(column_name(701), "ZZ");
        assert_eq!(column_name(702), "AAA");
    }

    #[test]
    fn hole_names_are_one_based_rows() {
        assert_eq!(hole_name(0, 0), "A1");
        assert_eq!(hole_name(15, 15), "P16");
        assert_eq!(hole_name(26, 10), "AA11");
    }

    #[test]
    fn frame_matches_closed_form() {
        let config = BoardConfig::default();
        let frame = BoardFrame::new(&config);
        let s = config.pin_spacing;
        let r = config.outer_radius;
        let w = config.strip_width;
        let iso = s - 2.0 * r;
        assert!((frame.grid_iso - iso).abs() < EPSILON);
        assert!((frame.width - (15.0 * s + 2.0 * iso + 2.0 * r + 2.0 * w)).abs() < EPSILON);
        assert!((frame.height - frame.width).abs() < EPSILON);
        assert!((frame.left + (w + iso + r)).abs() < EPSILON);
        assert!((frame.top - (w + iso + r)).abs() < EPSILON);
        assert!((frame.right - (frame.left + frame.width)).abs() < EPSILON);
        assert!((frame.bottom - (frame.top - frame.height)).abs() < EPSILON);
        assert!((frame.feed_y[0] + 2.0 * s).abs() < EPSILON);
        assert!((frame.feed_y[1] + 13.0 * s).abs() < EPSILON);
    }

    #[test]
    fn frame_is_symmetric_around_grid() {
        let config = BoardConfig::with_grid(5, 9);
        let frame = BoardFrame::new(&config);
        let last_x = 8.0 * config.pin_spacing;
        let last_y = -4.0 * config.pin_spacing;
        assert!(((frame.right - last_x) - (0.0 - frame.left)).abs() < EPSILON);
        assert!(((last_y - frame.bottom) - frame.top).abs() < EPSILON);
        assert!((frame.x_center - last_x / 2.0).abs() < EPSILON);
    }
}
