//! Selection cursor, command routing and the global lock.

use crate::grid::Grid;
use crate::highlight::HighlightEngine;
use crate::input::Direction;
use crate::shapes::{Shape, ShapeId};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Interaction state of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeState {
    Unselected,
    /// Receives arrow and rotate keys.
    Selected,
    /// Terminal: geometry and selection are frozen for the session.
    Locked,
}

/// Owns the selection cursor and the lock flag, and is the only place that
/// mutates shape geometry.
#[derive(Debug, Clone)]
pub struct SelectionController {
    selected: Option<ShapeId>,
    locked: bool,
    /// How far from a shape (in pixels) a click may land and still pick it.
    click_tolerance: f64,
}

impl SelectionController {
    pub fn new(click_tolerance: f64) -> Self {
        Self {
            selected: None,
            locked: false,
            click_tolerance,
        }
    }

    /// The currently selected shape, if any.
    pub fn selected(&self) -> Option<ShapeId> {
        self.selected
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn state_of(&self, shape: &Shape) -> ShapeState {
        if self.locked {
            ShapeState::Locked
        } else if self.selected == Some(shape.id()) {
            ShapeState::Selected
        } else {
            ShapeState::Unselected
        }
    }

    /// Select the shape under (or nearest to) a click.
    ///
    /// The latest placed shape containing the point wins; otherwise the
    /// nearest shape within the click tolerance. A click away from every
    /// shape, or at a non-finite position, clears the selection. Clicking the
    /// selected shape again keeps it selected. Ignored once locked.
    pub fn handle_click(&mut self, grid: &Grid, shapes: &mut [Shape], point: Point) -> Option<ShapeId> {
        if self.locked {
            return self.selected;
        }
        let target = pick(grid, shapes, point, self.click_tolerance);
        self.select(shapes, target);
        self.selected
    }

    fn select(&mut self, shapes: &mut [Shape], target: Option<ShapeId>) {
        for shape in shapes.iter_mut() {
            shape.selected = Some(shape.id()) == target;
        }
        if self.selected != target {
            match shapes.iter().find(|s| Some(s.id()) == target) {
                Some(shape) => log::debug!("Selected shape {}", shape.label),
                None => log::debug!("Cleared selection"),
            }
        }
        self.selected = target;
    }

    /// Move the selected shape one cell. Returns true if it moved.
    pub fn handle_direction(
        &mut self,
        grid: &Grid,
        shapes: &mut [Shape],
        highlights: &mut HighlightEngine,
        direction: Direction,
    ) -> bool {
        let Some(shape) = self.selected_mut(shapes) else {
            return false;
        };
        let (dc, dr) = direction.delta();
        if !shape.move_by(grid, dc, dr) {
            return false;
        }
        refresh_highlights(grid, shape, highlights);
        true
    }

    /// Rotate the selected shape. Returns true if it rotated.
    pub fn handle_rotate(
        &mut self,
        grid: &Grid,
        shapes: &mut [Shape],
        highlights: &mut HighlightEngine,
    ) -> bool {
        let Some(shape) = self.selected_mut(shapes) else {
            return false;
        };
        if !shape.rotate(grid) {
            return false;
        }
        refresh_highlights(grid, shape, highlights);
        true
    }

    /// Freeze every shape for the rest of the session. Idempotent.
    pub fn lock(&mut self) {
        if !self.locked {
            log::info!("Shapes locked");
        }
        self.locked = true;
    }

    fn selected_mut<'a>(&self, shapes: &'a mut [Shape]) -> Option<&'a mut Shape> {
        if self.locked {
            return None;
        }
        let id = self.selected?;
        shapes.iter_mut().find(|shape| shape.id() == id)
    }
}

fn refresh_highlights(grid: &Grid, shape: &Shape, highlights: &mut HighlightEngine) {
    if highlights.state(shape.id()).any() {
        highlights.refresh(grid, shape);
    }
}

/// Topmost shape containing the point, else the nearest within tolerance.
fn pick(grid: &Grid, shapes: &[Shape], point: Point, tolerance: f64) -> Option<ShapeId> {
    if !point.is_finite() {
        return None;
    }
    if let Some(shape) = shapes.iter().rev().find(|s| s.hit_test(grid, point, 0.0)) {
        return Some(shape.id());
    }
    shapes
        .iter()
        .rev()
        .map(|shape| (shape.distance_to(grid, point), shape.id()))
        .filter(|(distance, _)| *distance <= tolerance)
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, id)| id)
}
