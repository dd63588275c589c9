//! Highlight overlays: per-shape markers for the cells inside or outside a
//! shape's footprint.
//!
//! Each (shape, kind) pair owns its own marker set. Turning one overlay off
//! never touches markers that belong to another shape or to the other kind,
//! even when they sit on the same cell.

use crate::grid::{CellCoord, Grid};
use crate::shapes::{Shape, ShapeId, ShapeLabel};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Radius in pixels of the dot drawn for a marker.
pub const MARKER_RADIUS: f64 = 7.0;

/// Which side of a shape's footprint an overlay covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HighlightKind {
    Inside,
    Outside,
}

/// Highlight flags of one shape. The two kinds are independent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightState {
    pub inside: bool,
    pub outside: bool,
}

impl HighlightState {
    pub fn is_active(&self, kind: HighlightKind) -> bool {
        match kind {
            HighlightKind::Inside => self.inside,
            HighlightKind::Outside => self.outside,
        }
    }

    /// Check if any overlay is on.
    pub fn any(&self) -> bool {
        self.inside || self.outside
    }
}

/// A marker on a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Marker {
    pub cell: CellCoord,
    pub kind: HighlightKind,
    pub owner: ShapeLabel,
}

impl Marker {
    /// Bounds of the dot drawn at the cell centre.
    pub fn bounds(&self, grid: &Grid) -> Rect {
        let center = grid.cell_center(self.cell);
        Rect::from_center_size(center, (MARKER_RADIUS * 2.0, MARKER_RADIUS * 2.0))
    }
}

/// Cells whose top-left corner lies in the shape's half-open pixel rectangle.
pub fn inside_cells(grid: &Grid, shape: &Shape) -> BTreeSet<CellCoord> {
    let rect = shape.pixel_rect(grid);
    grid.cells()
        .filter(|&cell| corner_within(rect, grid.cell_to_pixel(cell)))
        .collect()
}

/// Every cell of the grid that is not inside the shape.
pub fn outside_cells(grid: &Grid, shape: &Shape) -> BTreeSet<CellCoord> {
    let rect = shape.pixel_rect(grid);
    grid.cells()
        .filter(|&cell| !corner_within(rect, grid.cell_to_pixel(cell)))
        .collect()
}

/// Cells covered by an overlay of the given kind.
pub fn cells_for(grid: &Grid, shape: &Shape, kind: HighlightKind) -> BTreeSet<CellCoord> {
    match kind {
        HighlightKind::Inside => inside_cells(grid, shape),
        HighlightKind::Outside => outside_cells(grid, shape),
    }
}

fn corner_within(rect: Rect, corner: Point) -> bool {
    rect.x0 <= corner.x && corner.x < rect.x1 && rect.y0 <= corner.y && corner.y < rect.y1
}

#[derive(Debug, Clone)]
struct Overlay {
    owner: ShapeLabel,
    cells: BTreeSet<CellCoord>,
}

/// Tracks which overlays are on and the markers they produce.
///
/// An overlay exists exactly when its flag is set, so the flags are derived
/// from the overlay map rather than stored separately.
#[derive(Debug, Clone, Default)]
pub struct HighlightEngine {
    overlays: BTreeMap<(ShapeId, HighlightKind), Overlay>,
}

impl HighlightEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current flags for a shape.
    pub fn state(&self, id: ShapeId) -> HighlightState {
        HighlightState {
            inside: self.overlays.contains_key(&(id, HighlightKind::Inside)),
            outside: self.overlays.contains_key(&(id, HighlightKind::Outside)),
        }
    }

    /// Flip one overlay of a shape. Turning it on creates a marker for every
    /// cell of the matching set; turning it off removes exactly those markers.
    /// Returns the new flag.
    pub fn toggle(&mut self, grid: &Grid, shape: &Shape, kind: HighlightKind) -> bool {
        let key = (shape.id(), kind);
        if let Some(overlay) = self.overlays.remove(&key) {
            log::debug!(
                "Removed {} {:?} markers of {}",
                overlay.cells.len(),
                kind,
                shape.label
            );
            return false;
        }
        let overlay = Overlay {
            owner: shape.label,
            cells: cells_for(grid, shape, kind),
        };
        log::debug!(
            "Added {} {:?} markers for {}",
            overlay.cells.len(),
            kind,
            shape.label
        );
        self.overlays.insert(key, overlay);
        true
    }

    /// Recompute the markers of every active overlay of a shape from its
    /// current geometry. Must run after each move or rotation.
    pub fn refresh(&mut self, grid: &Grid, shape: &Shape) {
        for kind in [HighlightKind::Inside, HighlightKind::Outside] {
            if let Some(overlay) = self.overlays.get_mut(&(shape.id(), kind)) {
                overlay.cells = cells_for(grid, shape, kind);
            }
        }
    }

    /// All markers, ordered by cell, then kind, then owner.
    pub fn markers(&self) -> BTreeSet<Marker> {
        self.overlays
            .iter()
            .flat_map(|(&(_, kind), overlay)| {
                overlay.cells.iter().map(move |&cell| Marker {
                    cell,
                    kind,
                    owner: overlay.owner,
                })
            })
            .collect()
    }

    /// Number of markers across all overlays.
    pub fn len(&self) -> usize {
        self.overlays.values().map(|overlay| overlay.cells.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
