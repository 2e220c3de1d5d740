//! Filled polygon triangulation.
//!
//! Converts polygon outlines into triangle geometry using the `earclip`
//! ear-clipping triangulation algorithm. Outlines are implicitly closed; a
//! repeated closing vertex is dropped before triangulation.

use crate::error::LayoutError;

use super::types::{GeometryBuilder, Point};

const POINT_EQUALITY_EPSILON: f64 = 1e-9;

/// Fill a polygon by triangulating its outline.
///
/// # Errors
///
/// Returns [`LayoutError::RegionError`] if vertex index arithmetic overflows.
/// Degenerate outlines (fewer than 3 distinct points) are skipped with a
/// warning and no geometry output.
pub fn fill_polygon(builder: &mut GeometryBuilder, outline: &[Point]) -> Result<(), LayoutError> {
    let outline = match outline.split_last() {
        Some((&last, rest)) if rest.first().is_some_and(|&first| points_approx_equal(first, last)) => {
            rest
        }
        _ => outline,
    };

    if outline.len() < 3 {
        builder.warn(format!(
            "polygon has {} point(s); need at least 3; skipping fill",
            outline.len()
        ));
        return Ok(());
    }

    let mut flat = Vec::with_capacity(outline.len() * 2);
    for pt in outline {
        flat.push(pt.x);
        flat.push(pt.y);
    }

    let indices = earclip::earcut::earcut(&flat, &[], 2);

    if indices.is_empty() {
        builder.warn("earclip produced no triangles for polygon; skipping".to_string());
        return Ok(());
    }

    let base_vertex = emit_vertices(builder, &flat);
    emit_triangles(builder, &indices, base_vertex)
}

/// Push all vertices from the flat coordinate buffer and return the first vertex index.
fn emit_vertices(builder: &mut GeometryBuilder, flat: &[f64]) -> u32 {
    let mut first: Option<u32> = None;
    for pair in flat.chunks_exact(2) {
        if let [x, y] = *pair {
            let idx = builder.push_vertex(x, y);
            if first.is_none() {
                first = Some(idx);
            }
        }
    }
    first.unwrap_or(0)
}

/// Convert earclip triangle indices (relative to the flat buffer) into
/// `GeometryBuilder` triangle calls using the base vertex offset.
fn emit_triangles(
    builder: &mut GeometryBuilder,
    indices: &[usize],
    base_vertex: u32,
) -> Result<(), LayoutError> {
    for tri in indices.chunks_exact(3) {
        if let [ia, ib, ic] = *tri {
            let a = offset_index(base_vertex, ia)?;
            let b = offset_index(base_vertex, ib)?;
            let c = offset_index(base_vertex, ic)?;
            builder.push_triangle(a, b, c);
        }
    }
    Ok(())
}

fn offset_index(base: u32, offset: usize) -> Result<u32, LayoutError> {
    let offset_u32 =
        u32::try_from(offset).map_err(|_| LayoutError::RegionError("index overflow".into()))?;
    base.checked_add(offset_u32)
        .ok_or_else(|| LayoutError::RegionError("vertex index overflow".into()))
}

fn points_approx_equal(a: Point, b: Point) -> bool {
    (a.x - b.x).abs() <= POINT_EQUALITY_EPSILON && (a.y - b.y).abs() <= POINT_EQUALITY_EPSILON
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_and_build(outline: &[Point]) -> crate::geometry::LayerGeometry {
        let mut builder = GeometryBuilder::new();
        let result = fill_polygon(&mut builder, outline);
        assert!(result.is_ok(), "expected fill_polygon to succeed");
        builder.build()
    }

    fn triangle_count(geom: &crate::geometry::LayerGeometry) -> usize {
        geom.indices.len() / 3
    }

    #[test]
    fn square_pad_produces_two_triangles() {
        let geom = fill_and_build(&[
            Point::new(-0.1, 0.1),
            Point::new(0.1, 0.1),
            Point::new(0.1, -0.1),
            Point::new(-0.1, -0.1),
        ]);
        assert_eq!(triangle_count(&geom), 2);
        assert_eq!(geom.vertex_count, 4);
        assert!(geom.warnings.is_empty());
    }

    #[test]
    fn corner_ground_fill_produces_four_triangles() {
        // Six-vertex L outline, the shape of a board corner ground strip.
        let geom = fill_and_build(&[
            Point::new(0.0, 2.0),
            Point::new(2.0, 2.0),
            Point::new(2.0, 1.5),
            Point::new(0.5, 1.5),
            Point::new(0.5, 0.0),
            Point::new(0.0, 0.0),
        ]);
        assert_eq!(triangle_count(&geom), 4);
        assert_eq!(geom.vertex_count, 6);
    }

    #[test]
    fn repeated_closing_vertex_is_dropped() {
        let geom = fill_and_build(&[
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
            Point::new(0.0, 0.0),
        ]);
        assert_eq!(geom.vertex_count, 4);
        assert_eq!(triangle_count(&geom), 2);
    }

    #[test]
    fn two_point_outline_skips_with_warning() {
        let geom = fill_and_build(&[Point::new(0.0, 0.0), Point::new(1.0, 1.0)]);
        assert_eq!(geom.vertex_count, 0);
        assert!(geom.indices.is_empty());
        assert!(geom.warnings.iter().any(|w| w.contains("2 point(s)")));
    }

    #[test]
    fn empty_outline_skips_with_warning() {
        let geom = fill_and_build(&[]);
        assert_eq!(geom.vertex_count, 0);
        assert!(geom.warnings.iter().any(|w| w.contains("0 point(s)")));
    }

    #[test]
    fn triangles_reference_only_emitted_vertices() {
        let mut builder = GeometryBuilder::new();
        builder.push_vertex(9.0, 9.0);
        let result = fill_polygon(
            &mut builder,
            &[
                Point::new(0.0, 0.0),
                Point::new(1.0, 0.0),
                Point::new(0.5, 1.0),
            ],
        );
        assert!(result.is_ok());
        let geom = builder.build();
        assert_eq!(geom.indices.len(), 3);
        assert!(geom.indices.iter().all(|&i| (1..4).contains(&i)));
    }
}
