#![deny(warnings)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::indexing_slicing)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! `ProtoBoard` WASM module — prototyping board layout and geometry tessellation.

pub mod board;
pub mod element;
pub mod error;
pub mod geometry;
pub mod units;

use std::cell::RefCell;
use std::collections::BTreeMap;

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::board::{BoardConfig, PrototypeBoard};
use crate::element::{HasAnchors, HasPrimitives, Primitive, Text};
use crate::error::LayoutError;
use crate::geometry::types::saturate_u32;
use crate::geometry::{BoundingBox, LayerGeometry, PaintRange, Point};

thread_local! {
    static LAST_GEOMETRY: RefCell<Option<LayerGeometry>> = const { RefCell::new(None) };
}

fn store_geometry(geom: LayerGeometry) {
    LAST_GEOMETRY.with(|g| {
        *g.borrow_mut() = Some(geom);
    });
}

/// Layout summary returned to JavaScript for a board.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardMeta {
    /// Total board width.
    pub width: f64,
    /// Total board height.
    pub height: f64,
    /// Named anchors.
    pub anchors: BTreeMap<String, Point>,
    /// Row and column labels, for the host to render as text.
    pub labels: Vec<Text>,
    /// Axis-aligned bounding box of the tessellated geometry.
    pub bounds: BoundingBox,
    /// Number of primitives on the board.
    pub primitive_count: u32,
    /// Number of vertices.
    pub vertex_count: u32,
    /// Number of triangle indices.
    pub index_count: u32,
    /// Colored index ranges in draw order.
    pub paint_ranges: Vec<PaintRange>,
    /// Number of warnings.
    pub warning_count: u32,
    /// Layout and tessellation warnings.
    pub warnings: Vec<String>,
}

/// Initialize the WASM module. Sets up the panic hook for debugging.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Lay out a prototyping board from a (partial) configuration object.
///
/// Returns `BoardMeta` as a `JsValue` via `serde-wasm-bindgen`.
/// Geometry buffers are stored internally; retrieve with
/// [`get_positions`], [`get_indices`] and [`get_paint_ranges`].
///
/// # Errors
///
/// Returns a descriptive error string if the configuration cannot be decoded
/// or is invalid.
#[wasm_bindgen]
pub fn layout_board(config: JsValue) -> Result<JsValue, JsValue> {
    let config: BoardConfig = if config.is_undefined() || config.is_null() {
        BoardConfig::default()
    } else {
        serde_wasm_bindgen::from_value(config)
            .map_err(|e| JsValue::from_str(&LayoutError::Deserialize(e.to_string()).to_string()))?
    };
    let meta = layout_board_internal(config).map_err(|e| JsValue::from_str(&e))?;
    serde_wasm_bindgen::to_value(&meta).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Internal layout logic shared between the wasm export and native tests.
#[doc(hidden)]
pub fn layout_board_internal(config: BoardConfig) -> Result<BoardMeta, String> {
    let board = PrototypeBoard::new(config).map_err(|e| e.to_string())?;
    let geom = geometry::tessellate(board.primitives()).map_err(|e| e.to_string())?;

    let mut warnings = board.warnings().to_vec();
    warnings.extend(geom.warnings.iter().cloned());

    let meta = BoardMeta {
        width: board.width(),
        height: board.height(),
        anchors: board.anchors().clone(),
        labels: board
            .primitives()
            .iter()
            .filter_map(Primitive::as_text)
            .cloned()
            .collect(),
        bounds: geom.bounds,
        primitive_count: geom.primitive_count,
        vertex_count: geom.vertex_count,
        index_count: saturate_u32(geom.indices.len()),
        paint_ranges: geom.paint_ranges.clone(),
        warning_count: saturate_u32(warnings.len()),
        warnings,
    };

    store_geometry(geom);

    Ok(meta)
}

/// Retrieve the position buffer for the last laid-out board.
///
/// Returns a copy of the interleaved `[x0, y0, x1, y1, ...]` positions.
/// Returns an empty array if no board has been laid out yet.
#[wasm_bindgen]
pub fn get_positions() -> Vec<f32> {
    LAST_GEOMETRY.with(|g| {
        g.borrow()
            .as_ref()
            .map_or_else(Vec::new, |geom| geom.positions.clone())
    })
}

/// Retrieve the index buffer for the last laid-out board.
///
/// Returns a copy of the triangle-list indices.
/// Returns an empty array if no board has been laid out yet.
#[wasm_bindgen]
pub fn get_indices() -> Vec<u32> {
    LAST_GEOMETRY.with(|g| {
        g.borrow()
            .as_ref()
            .map_or_else(Vec::new, |geom| geom.indices.clone())
    })
}

/// Retrieve the paint index ranges for the last laid-out board.
///
/// Returns a flattened `[start0, end0, start1, end1, ...]` array in draw
/// order; the matching colors are in `BoardMeta::paint_ranges`.
/// Returns an empty array if no board has been laid out yet.
#[wasm_bindgen]
pub fn get_paint_ranges() -> Vec<u32> {
    LAST_GEOMETRY.with(|g| {
        g.borrow().as_ref().map_or_else(Vec::new, |geom| {
            let mut flat = Vec::with_capacity(geom.paint_ranges.len() * 2);
            for range in &geom.paint_ranges {
                flat.push(range.index_start);
                flat.push(range.index_end);
            }
            flat
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_default_board() {
        let result = layout_board_internal(BoardConfig::default());
        assert!(
            result.is_ok(),
            "expected Ok, got Err: {:?}",
            result.as_ref().err()
        );
        let Some(meta) = result.ok() else {
            return;
        };
        assert_eq!(meta.anchors.len(), 268);
        assert_eq!(meta.labels.len(), 32);
        assert_eq!(meta.primitive_count, 13 + 512 + 32);
        assert!(meta.vertex_count > 0, "expected tessellated geometry");
        assert_eq!(meta.warning_count, 0);
    }

    #[test]
    fn layout_invalid_board_is_err() {
        let result = layout_board_internal(BoardConfig::with_grid(0, 4));
        assert!(result.is_err(), "zero rows should return Err");
        if let Err(msg) = result {
            assert!(msg.contains("invalid configuration"));
        }
    }

    #[test]
    fn get_buffers_empty_without_layout() {
        LAST_GEOMETRY.with(|g| {
            *g.borrow_mut() = None;
        });
        assert!(get_positions().is_empty(), "no layout yet => empty positions");
        assert!(get_indices().is_empty(), "no layout yet => empty indices");
        assert!(
            get_paint_ranges().is_empty(),
            "no layout yet => empty paint ranges"
        );
    }

    #[test]
    fn get_paint_ranges_returns_flattened_pairs() {
        let mut geom = geometry::GeometryBuilder::new().build();
        geom.paint_ranges = vec![
            PaintRange {
                index_start: 0,
                index_end: 6,
                color: "#964B00".to_string(),
            },
            PaintRange {
                index_start: 6,
                index_end: 12,
                color: "#FFD700".to_string(),
            },
        ];
        store_geometry(geom);
        assert_eq!(get_paint_ranges(), vec![0, 6, 6, 12]);
    }

    #[test]
    fn buffers_follow_last_layout() {
        let result = layout_board_internal(BoardConfig::with_grid(2, 2));
        assert!(result.is_ok());
        let Some(meta) = result.ok() else {
            return;
        };
        assert_eq!(get_positions().len(), meta.vertex_count as usize * 2);
        assert_eq!(get_indices().len(), meta.index_count as usize);
        let ranges = get_paint_ranges();
        assert_eq!(ranges.len(), meta.paint_ranges.len() * 2);
        assert_eq!(ranges.last().copied(), Some(meta.index_count));
    }
}
