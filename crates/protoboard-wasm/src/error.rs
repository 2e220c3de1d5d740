//! Error types for board layout and geometry tessellation.

use thiserror::Error;

/// Errors that can occur while laying out an element or tessellating it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// The board configuration cannot produce a valid layout.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A wire or lookup referenced an anchor the element does not expose.
    #[error("unknown anchor: {0}")]
    UnknownAnchor(String),

    /// Two anchors were registered under the same name.
    #[error("duplicate anchor: {0}")]
    DuplicateAnchor(String),

    /// A geometry operation produced degenerate output.
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(String),

    /// A filled polygon could not be triangulated.
    #[error("region error: {0}")]
    RegionError(String),

    /// A host-supplied configuration could not be decoded.
    #[error("deserialize error: {0}")]
    Deserialize(String),
}
