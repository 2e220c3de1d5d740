//! Integration tests for configuration decoding, as a JS host would send it.

use protoboard_wasm::board::{BoardConfig, PrototypeBoard};
use protoboard_wasm::element::HasAnchors;
use protoboard_wasm::error::LayoutError;
use protoboard_wasm::units::PIN_SPACING;

#[test]
#[allow(clippy::expect_used)]
fn empty_object_is_the_practicum_board() {
    let config: BoardConfig = serde_json::from_str("{}").expect("decode");
    assert_eq!(config, BoardConfig::default());
    assert_eq!(config.rows, 16);
    assert!((config.pin_spacing - PIN_SPACING).abs() < f64::EPSILON);
}

#[test]
#[allow(clippy::expect_used)]
fn partial_object_overrides_fields() {
    let json = r##"{
        "rows": 12,
        "cols": 30,
        "showLabels": false,
        "feedRows": [3, 8],
        "style": { "metalColor": "#B87333" }
    }"##;
    let config: BoardConfig = serde_json::from_str(json).expect("decode");
    assert_eq!(config.rows, 12);
    assert_eq!(config.cols, 30);
    assert!(!config.show_labels);
    assert_eq!(config.feed_rows, [3, 8]);
    assert_eq!(config.style.metal_color, "#B87333");
    assert_eq!(config.style.housing_color, "#333");

    let board = PrototypeBoard::new(config).expect("layout");
    assert!(board.warnings().is_empty());
    assert_eq!(board.anchors().len(), 12 * 30 + 12);
    assert!(board.anchor("AD12").is_some());
}

#[test]
#[allow(clippy::expect_used)]
fn neighbouring_feed_rows_are_rejected() {
    let json = r#"{ "rows": 4, "cols": 30, "feedRows": [1, 2] }"#;
    let config: BoardConfig = serde_json::from_str(json).expect("decode");
    let result = PrototypeBoard::new(config);
    assert!(matches!(result, Err(LayoutError::InvalidConfiguration(_))));
}

#[test]
fn negative_rows_fail_to_decode() {
    let result = serde_json::from_str::<BoardConfig>(r#"{ "rows": -1 }"#);
    assert!(result.is_err());
}
