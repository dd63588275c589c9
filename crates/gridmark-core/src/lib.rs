//! Gridmark Core Library
//!
//! Grid-cell coordinate model, grid-aligned shape placement and the
//! highlight/selection state machine behind the Gridmark editor. Contains no
//! presentation code; a shell feeds it [`Command`]s and renders the queries.

pub mod canvas;
pub mod config;
pub mod error;
pub mod grid;
pub mod highlight;
pub mod input;
pub mod selection;
pub mod shapes;

pub use canvas::{Canvas, CanvasSnapshot, ShapeSnapshot};
pub use config::{DEFAULT_MAX_CELLS, EditorConfig};
pub use error::{GridError, GridResult};
pub use grid::{CellCoord, DEFAULT_CELL_SIZE, Grid};
pub use highlight::{
    HighlightEngine, HighlightKind, HighlightState, MARKER_RADIUS, Marker, inside_cells,
    outside_cells,
};
pub use input::{Command, Direction, Key, parse_dimension_pair};
pub use selection::{SelectionController, ShapeState};
pub use shapes::{MAX_SHAPES, Shape, ShapeId, ShapeLabel};
