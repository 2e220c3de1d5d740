//! Core geometry types and triangle tessellation of element primitives.

pub mod paint;
pub mod region;
pub mod stroke;
pub mod types;

pub use paint::*;
pub use region::*;
pub use stroke::*;
pub use types::*;

use crate::element::{Primitive, DEFAULT_LINE_WIDTH};
use crate::error::LayoutError;

/// Tessellate primitives into one triangle buffer, in draw order.
///
/// Filled polygons are ear-clipped, unfilled polygons and segments are
/// stroked. Texts produce no triangles; the host renders them.
///
/// # Errors
///
/// Returns an error if a primitive carries non-finite geometry or index
/// arithmetic overflows. Degenerate shapes are skipped with a warning.
pub fn tessellate(primitives: &[Primitive]) -> Result<LayerGeometry, LayoutError> {
    let mut builder = GeometryBuilder::new();
    let mut paint = PaintTracker::new();

    for primitive in primitives {
        match primitive {
            Primitive::Polygon(polygon) => {
                paint.set_color(&polygon.color, &builder);
                if polygon.fill {
                    fill_polygon(&mut builder, &polygon.vertices)?;
                } else {
                    let width = polygon.line_width.unwrap_or(DEFAULT_LINE_WIDTH);
                    stroke_outline(&mut builder, &polygon.vertices, width)?;
                }
            }
            Primitive::Segment(segment) => {
                paint.set_color(&segment.color, &builder);
                stroke_segment(&mut builder, segment.from, segment.to, segment.line_width)?;
            }
            Primitive::Text(_) => {}
        }
    }

    let paint_ranges = paint.finish(&builder);
    let mut geom = builder.build();
    geom.primitive_count = saturate_u32(primitives.len());
    geom.paint_ranges = paint_ranges;

    log::debug!(
        "tessellated {} primitives into {} vertices, {} indices, {} paint ranges",
        geom.primitive_count,
        geom.vertex_count,
        geom.indices.len(),
        geom.paint_ranges.len()
    );

    Ok(geom)
}
