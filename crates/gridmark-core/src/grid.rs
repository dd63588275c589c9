//! Grid model: cell addressing and conversion between pixels and cells.

use crate::error::{GridError, GridResult};
use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Default cell edge length in pixels.
pub const DEFAULT_CELL_SIZE: u32 = 50;

/// Address of a single grid cell.
///
/// Coordinates are signed so that candidate positions produced by a move can
/// be range-checked before they are accepted. Ordering is row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CellCoord {
    pub col: i64,
    pub row: i64,
}

impl CellCoord {
    pub const fn new(col: i64, row: i64) -> Self {
        Self { col, row }
    }

    /// The cell `dc` columns and `dr` rows away, or `None` if that is not
    /// addressable.
    pub fn offset(self, dc: i64, dr: i64) -> Option<Self> {
        Some(Self::new(self.col.checked_add(dc)?, self.row.checked_add(dr)?))
    }
}

impl Ord for CellCoord {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.row, self.col).cmp(&(other.row, other.col))
    }
}

impl PartialOrd for CellCoord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<(i64, i64)> for CellCoord {
    fn from((col, row): (i64, i64)) -> Self {
        Self::new(col, row)
    }
}

/// A rectangular grid of square cells.
///
/// Created once from user input and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    rows: u32,
    cols: u32,
    cell_size: u32,
}

impl Grid {
    /// Create a grid, rejecting non-positive dimensions.
    pub fn new(rows: i64, cols: i64, cell_size: i64) -> GridResult<Self> {
        let grid = Self {
            rows: positive("rows", rows)?,
            cols: positive("cols", cols)?,
            cell_size: positive("cell size", cell_size)?,
        };
        log::info!(
            "Created {}x{} grid with {}px cells",
            grid.rows,
            grid.cols,
            grid.cell_size
        );
        Ok(grid)
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    /// `(rows, cols, cell_size)`.
    pub fn dimensions(&self) -> (u32, u32, u32) {
        (self.rows, self.cols, self.cell_size)
    }

    /// Total number of cells in the grid.
    pub fn cell_count(&self) -> u64 {
        u64::from(self.rows) * u64::from(self.cols)
    }

    /// Size of the whole grid in pixels.
    pub fn pixel_size(&self) -> Size {
        let cs = f64::from(self.cell_size);
        Size::new(f64::from(self.cols) * cs, f64::from(self.rows) * cs)
    }

    /// Top-left pixel corner of a cell.
    pub fn cell_to_pixel(&self, cell: CellCoord) -> Point {
        let cs = f64::from(self.cell_size);
        Point::new(cell.col as f64 * cs, cell.row as f64 * cs)
    }

    /// Nearest cell boundary to a pixel position, rounding halves up.
    ///
    /// Exact inverse of [`Grid::cell_to_pixel`] on grid-aligned pixels.
    pub fn pixel_to_cell(&self, point: Point) -> CellCoord {
        let cs = f64::from(self.cell_size);
        CellCoord::new(round_half_up(point.x / cs), round_half_up(point.y / cs))
    }

    /// Snap a continuous position to the nearest cell boundary.
    pub fn snap(&self, point: Point) -> Point {
        self.cell_to_pixel(self.pixel_to_cell(point))
    }

    /// The cell whose area contains a pixel, if it lies on the grid.
    pub fn cell_containing(&self, point: Point) -> Option<CellCoord> {
        let cs = f64::from(self.cell_size);
        let cell = CellCoord::new((point.x / cs).floor() as i64, (point.y / cs).floor() as i64);
        self.contains(cell).then_some(cell)
    }

    /// Check whether a cell lies within `[0, cols) x [0, rows)`.
    pub fn contains(&self, cell: CellCoord) -> bool {
        (0..i64::from(self.cols)).contains(&cell.col) && (0..i64::from(self.rows)).contains(&cell.row)
    }

    /// Check whether a `width` x `height` block anchored at `origin` lies
    /// entirely inside the grid.
    pub fn fits(&self, origin: CellCoord, width: u32, height: u32) -> bool {
        let Some(end) = origin.offset(i64::from(width), i64::from(height)) else {
            return false;
        };
        origin.col >= 0
            && origin.row >= 0
            && end.col <= i64::from(self.cols)
            && end.row <= i64::from(self.rows)
    }

    /// Pixel rectangle covered by a cell.
    pub fn cell_rect(&self, cell: CellCoord) -> Rect {
        let cs = f64::from(self.cell_size);
        let origin = self.cell_to_pixel(cell);
        Rect::new(origin.x, origin.y, origin.x + cs, origin.y + cs)
    }

    /// Pixel centre of a cell.
    pub fn cell_center(&self, cell: CellCoord) -> Point {
        self.cell_rect(cell).center()
    }

    /// Every cell of the grid in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = CellCoord> + use<> {
        let cols = i64::from(self.cols);
        let rows = i64::from(self.rows);
        (0..rows).flat_map(move |row| (0..cols).map(move |col| CellCoord::new(col, row)))
    }
}

fn positive(name: &str, value: i64) -> GridResult<u32> {
    if value <= 0 {
        return Err(GridError::InvalidDimension(format!(
            "{name} must be a positive integer, got {value}"
        )));
    }
    u32::try_from(value)
        .map_err(|_| GridError::InvalidDimension(format!("{name} is too large: {value}")))
}

fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}
