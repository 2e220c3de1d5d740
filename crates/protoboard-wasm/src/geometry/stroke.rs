//! Line stroke widening for segments and unfilled polygon outlines.
//!
//! A segment becomes a quad of the requested line width centered on the
//! segment. Ends are butt-capped.

use crate::error::LayoutError;

use super::types::{GeometryBuilder, Point};

/// Expand a line segment into a quad of width `line_width`.
///
/// # Errors
///
/// Returns [`LayoutError::DegenerateGeometry`] when `line_width` or an
/// endpoint is not finite. Zero-width and zero-length segments are skipped
/// with a warning.
pub fn stroke_segment(
    builder: &mut GeometryBuilder,
    from: Point,
    to: Point,
    line_width: f64,
) -> Result<(), LayoutError> {
    let Some(stroke_width) = normalize_width(builder, line_width)? else {
        return Ok(());
    };
    if ![from.x, from.y, to.x, to.y].iter().all(|v| v.is_finite()) {
        return Err(LayoutError::DegenerateGeometry(
            "segment endpoint is not finite".to_string(),
        ));
    }

    let delta_x = to.x - from.x;
    let delta_y = to.y - from.y;
    let segment_length_sq = delta_x.mul_add(delta_x, delta_y * delta_y);
    if segment_length_sq <= f64::EPSILON {
        builder.warn("zero-length segment; skipping stroke".to_string());
        return Ok(());
    }

    let inverse_length = 1.0 / segment_length_sq.sqrt();
    let normal_x = -delta_y * inverse_length;
    let normal_y = delta_x * inverse_length;
    let half_width = stroke_width / 2.0;

    let start_left = Point::new(
        normal_x.mul_add(half_width, from.x),
        normal_y.mul_add(half_width, from.y),
    );
    let start_right = Point::new(
        (-normal_x).mul_add(half_width, from.x),
        (-normal_y).mul_add(half_width, from.y),
    );
    let end_right = Point::new(
        (-normal_x).mul_add(half_width, to.x),
        (-normal_y).mul_add(half_width, to.y),
    );
    let end_left = Point::new(
        normal_x.mul_add(half_width, to.x),
        normal_y.mul_add(half_width, to.y),
    );

    push_segment_body(builder, start_left, start_right, end_right, end_left);
    Ok(())
}

/// Stroke every edge of a closed outline, including the closing edge.
///
/// # Errors
///
/// Propagates errors from [`stroke_segment`].
pub fn stroke_outline(
    builder: &mut GeometryBuilder,
    outline: &[Point],
    line_width: f64,
) -> Result<(), LayoutError> {
    if outline.len() < 2 {
        builder.warn(format!(
            "outline has {} point(s); need at least 2; skipping stroke",
            outline.len()
        ));
        return Ok(());
    }

    let closing = outline.first().zip(outline.last());
    for pair in outline.windows(2) {
        if let [from, to] = *pair {
            stroke_segment(builder, from, to, line_width)?;
        }
    }
    if outline.len() > 2 {
        if let Some((&first, &last)) = closing {
            stroke_segment(builder, last, first, line_width)?;
        }
    }
    Ok(())
}

fn normalize_width(builder: &mut GeometryBuilder, value: f64) -> Result<Option<f64>, LayoutError> {
    if !value.is_finite() {
        return Err(LayoutError::DegenerateGeometry(format!(
            "line width must be finite, got {value}"
        )));
    }

    let mut normalized = value;
    if normalized < 0.0 {
        builder.warn(format!(
            "line width is negative ({normalized}); using absolute value"
        ));
        normalized = normalized.abs();
    }

    if normalized <= f64::EPSILON {
        builder.warn("line width is zero; skipping stroke".to_string());
        return Ok(None);
    }

    Ok(Some(normalized))
}

fn push_segment_body(
    builder: &mut GeometryBuilder,
    start_left: Point,
    start_right: Point,
    end_right: Point,
    end_left: Point,
) {
    let a = builder.push_vertex(start_left.x, start_left.y);
    let b = builder.push_vertex(start_right.x, start_right.y);
    let c = builder.push_vertex(end_right.x, end_right.y);
    let d = builder.push_vertex(end_left.x, end_left.y);
    builder.push_quad(a, b, c, d);
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-6;

    #[test]
    fn horizontal_segment_builds_expected_quad() {
        let mut builder = GeometryBuilder::new();
        let result = stroke_segment(&mut builder, Point::new(0.0, 0.0), Point::new(2.0, 0.0), 0.5);
        assert!(result.is_ok());
        let geom = builder.build();
        assert_eq!(geom.vertex_count, 4);
        assert_eq!(geom.indices, vec![0, 1, 2, 0, 2, 3]);
        assert!(geom.bounds.min_x.abs() < EPSILON);
        assert!((geom.bounds.max_x - 2.0).abs() < EPSILON);
        assert!((geom.bounds.min_y + 0.25).abs() < EPSILON);
        assert!((geom.bounds.max_y - 0.25).abs() < EPSILON);
    }

    #[test]
    fn zero_length_segment_skips_with_warning() {
        let mut builder = GeometryBuilder::new();
        let p = Point::new(1.0, 1.0);
        assert!(stroke_segment(&mut builder, p, p, 0.5).is_ok());
        let geom = builder.build();
        assert_eq!(geom.vertex_count, 0);
        assert!(geom.warnings.iter().any(|w| w.contains("zero-length")));
    }

    #[test]
    fn zero_width_skips_with_warning() {
        let mut builder = GeometryBuilder::new();
        let result = stroke_segment(&mut builder, Point::new(0.0, 0.0), Point::new(1.0, 0.0), 0.0);
        assert!(result.is_ok());
        let geom = builder.build();
        assert_eq!(geom.vertex_count, 0);
        assert!(geom.warnings.iter().any(|w| w.contains("zero")));
    }

    #[test]
    fn non_finite_width_is_an_error() {
        let mut builder = GeometryBuilder::new();
        let result = stroke_segment(
            &mut builder,
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            f64::NAN,
        );
        assert!(matches!(result, Err(LayoutError::DegenerateGeometry(_))));
    }

    #[test]
    fn square_outline_strokes_four_edges() {
        let mut builder = GeometryBuilder::new();
        let outline = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ];
        assert!(stroke_outline(&mut builder, &outline, 0.1).is_ok());
        let geom = builder.build();
        assert_eq!(geom.vertex_count, 16);
        assert_eq!(geom.indices.len(), 24);
    }
}
