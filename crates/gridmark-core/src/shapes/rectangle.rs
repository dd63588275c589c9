//! Rectangle shape aligned to the grid.

use super::{ShapeId, ShapeLabel};
use crate::error::{GridError, GridResult};
use crate::grid::{CellCoord, Grid};
use kurbo::{Point, Rect, Size};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Distance in pixels from the top-right corner to the label anchor.
pub const LABEL_INSET: f64 = 10.0;

/// A rectangle occupying a block of whole cells.
///
/// Geometry is only changed through [`Shape::move_by`] and [`Shape::rotate`],
/// both of which keep the shape inside the grid it was placed on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shape {
    pub(crate) id: ShapeId,
    /// Label shown in the top-right corner.
    pub label: ShapeLabel,
    /// Top-left cell.
    pub(crate) origin: CellCoord,
    /// Width in cells.
    pub(crate) width: u32,
    /// Height in cells.
    pub(crate) height: u32,
    /// Selection indicator.
    pub(crate) selected: bool,
}

impl Shape {
    /// Place a shape at a uniformly random origin where it fits entirely.
    pub fn place<R: Rng>(
        grid: &Grid,
        width: i64,
        height: i64,
        label: ShapeLabel,
        rng: &mut R,
    ) -> GridResult<Self> {
        let (width, height) = checked_size(grid, width, height)?;
        let col = rng.random_range(0..=grid.cols() - width);
        let row = rng.random_range(0..=grid.rows() - height);
        let shape = Self::new(label, CellCoord::new(i64::from(col), i64::from(row)), width, height);
        log::info!("Placed shape {} {}x{} at ({}, {})", label, width, height, col, row);
        Ok(shape)
    }

    /// Place a shape at a given origin.
    pub fn place_at(
        grid: &Grid,
        width: i64,
        height: i64,
        label: ShapeLabel,
        origin: CellCoord,
    ) -> GridResult<Self> {
        let (width, height) = checked_size(grid, width, height)?;
        if !grid.fits(origin, width, height) {
            return Err(GridError::OutOfBounds {
                col: origin.col,
                row: origin.row,
                width,
                height,
            });
        }
        Ok(Self::new(label, origin, width, height))
    }

    fn new(label: ShapeLabel, origin: CellCoord, width: u32, height: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            label,
            origin,
            width,
            height,
            selected: false,
        }
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub fn origin(&self) -> CellCoord {
        self.origin
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Move by whole cells. Returns false and leaves the shape untouched if
    /// the target position would leave the grid.
    pub fn move_by(&mut self, grid: &Grid, dc: i64, dr: i64) -> bool {
        let Some(target) = self
            .origin
            .offset(dc, dr)
            .filter(|target| grid.fits(*target, self.width, self.height))
        else {
            log::debug!("Rejected move of {} by ({}, {})", self.label, dc, dr);
            return false;
        };
        self.origin = target;
        true
    }

    /// Swap width and height around the current origin. Rotations that would
    /// overflow the grid are rejected; the origin is never shifted.
    pub fn rotate(&mut self, grid: &Grid) -> bool {
        if !grid.fits(self.origin, self.height, self.width) {
            log::debug!(
                "Rejected rotation of {} to {}x{}",
                self.label,
                self.height,
                self.width
            );
            return false;
        }
        std::mem::swap(&mut self.width, &mut self.height);
        true
    }

    /// Pixel rectangle covered by the shape.
    pub fn pixel_rect(&self, grid: &Grid) -> Rect {
        let cs = f64::from(grid.cell_size());
        let size = Size::new(f64::from(self.width) * cs, f64::from(self.height) * cs);
        Rect::from_origin_size(grid.cell_to_pixel(self.origin), size)
    }

    /// Check whether a cell lies within the shape's footprint.
    pub fn contains_cell(&self, cell: CellCoord) -> bool {
        (self.origin.col..self.origin.col + i64::from(self.width)).contains(&cell.col)
            && (self.origin.row..self.origin.row + i64::from(self.height)).contains(&cell.row)
    }

    /// Where the label is drawn: just inside the top-right corner.
    pub fn label_anchor(&self, grid: &Grid) -> Point {
        let rect = self.pixel_rect(grid);
        Point::new(rect.x1 - LABEL_INSET, rect.y0 + LABEL_INSET)
    }

    /// Distance from a pixel to the shape's rectangle (0 when inside,
    /// infinite for a non-finite pixel).
    pub fn distance_to(&self, grid: &Grid, point: Point) -> f64 {
        if !point.is_finite() {
            return f64::INFINITY;
        }
        let rect = self.pixel_rect(grid);
        let dx = (rect.x0 - point.x).max(point.x - rect.x1).max(0.0);
        let dy = (rect.y0 - point.y).max(point.y - rect.y1).max(0.0);
        dx.hypot(dy)
    }

    /// Check if a pixel hits the shape, allowing `tolerance` pixels around it.
    pub fn hit_test(&self, grid: &Grid, point: Point, tolerance: f64) -> bool {
        self.pixel_rect(grid).inflate(tolerance, tolerance).contains(point)
    }
}

fn checked_size(grid: &Grid, width: i64, height: i64) -> GridResult<(u32, u32)> {
    if width <= 0 || height <= 0 {
        return Err(GridError::InvalidDimension(format!(
            "shape size must be positive integers, got {width}x{height}"
        )));
    }
    if width > i64::from(grid.cols()) || height > i64::from(grid.rows()) {
        return Err(GridError::OversizedShape {
            width,
            height,
            cols: grid.cols(),
            rows: grid.rows(),
        });
    }
    // Both values are bounded by the grid's u32 dimensions.
    Ok((width as u32, height as u32))
}
