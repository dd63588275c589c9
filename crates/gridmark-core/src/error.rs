//! Error types for grid and shape construction.

use crate::shapes::ShapeLabel;
use thiserror::Error;

/// Errors raised while building the grid or placing shapes.
///
/// Runtime edits (moves, rotations, clicks) never produce these; a
/// disallowed edit is a silent no-op.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("Invalid dimension: {0}")]
    InvalidDimension(String),
    #[error("Shape {width}x{height} does not fit in a grid of {cols} columns and {rows} rows")]
    OversizedShape {
        width: i64,
        height: i64,
        cols: u32,
        rows: u32,
    },
    #[error("Shape {width}x{height} at ({col}, {row}) lies outside the grid")]
    OutOfBounds {
        col: i64,
        row: i64,
        width: u32,
        height: u32,
    },
    #[error("Shape {0} has already been placed")]
    DuplicateLabel(ShapeLabel),
    #[error("All shape labels are in use")]
    NoFreeLabel,
    #[error("Unknown shape label: {0}")]
    UnknownLabel(String),
    #[error("Config error: {0}")]
    Config(String),
}

/// Result type for grid operations.
pub type GridResult<T> = Result<T, GridError>;
