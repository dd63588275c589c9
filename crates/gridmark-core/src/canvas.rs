//! Canvas: the editing session that ties grid, shapes, highlights and
//! selection together.

use crate::config::EditorConfig;
use crate::error::{GridError, GridResult};
use crate::grid::{CellCoord, Grid};
use crate::highlight::{HighlightEngine, HighlightKind, HighlightState, Marker};
use crate::input::{Command, Key};
use crate::selection::{SelectionController, ShapeState};
use crate::shapes::{Shape, ShapeLabel};
use kurbo::Point;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use std::collections::BTreeSet;

/// One editing session.
///
/// All state changes go through `&mut self` and complete before the call
/// returns; events are handled strictly in the order they are delivered.
#[derive(Debug, Clone)]
pub struct Canvas {
    grid: Grid,
    /// Shapes in placement order.
    shapes: Vec<Shape>,
    highlights: HighlightEngine,
    selection: SelectionController,
    rng: StdRng,
}

impl Canvas {
    /// Create a session on a new grid with default settings.
    pub fn init_grid(rows: i64, cols: i64, cell_size: i64) -> GridResult<Self> {
        let grid = Grid::new(rows, cols, cell_size)?;
        let tolerance = f64::from(grid.cell_size()) / 2.0;
        Ok(Self::from_parts(grid, tolerance, StdRng::from_os_rng()))
    }

    /// Create a session using the cell size, click tolerance and seed from a
    /// config.
    pub fn with_config(config: &EditorConfig, rows: i64, cols: i64) -> GridResult<Self> {
        let grid = Grid::new(rows, cols, i64::from(config.cell_size))?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Ok(Self::from_parts(grid, config.click_tolerance, rng))
    }

    /// Create a session whose random placements are reproducible.
    pub fn with_seed(rows: i64, cols: i64, cell_size: i64, seed: u64) -> GridResult<Self> {
        let grid = Grid::new(rows, cols, cell_size)?;
        let tolerance = f64::from(grid.cell_size()) / 2.0;
        Ok(Self::from_parts(grid, tolerance, StdRng::seed_from_u64(seed)))
    }

    fn from_parts(grid: Grid, click_tolerance: f64, rng: StdRng) -> Self {
        Self {
            grid,
            shapes: Vec::new(),
            highlights: HighlightEngine::new(),
            selection: SelectionController::new(click_tolerance),
            rng,
        }
    }

    /// Place a shape at a random origin where it fits.
    pub fn place_shape(&mut self, width: i64, height: i64, label: ShapeLabel) -> GridResult<&Shape> {
        self.ensure_label_free(label)?;
        let shape = Shape::place(&self.grid, width, height, label, &mut self.rng)?;
        Ok(self.push(shape))
    }

    /// Place a shape with the next unused label (A, then B, then C).
    pub fn place_next(&mut self, width: i64, height: i64) -> GridResult<&Shape> {
        let label = ShapeLabel::ALL
            .into_iter()
            .find(|&label| self.shape(label).is_none())
            .ok_or(GridError::NoFreeLabel)?;
        self.place_shape(width, height, label)
    }

    /// Place a shape at a chosen origin.
    pub fn place_shape_at(
        &mut self,
        width: i64,
        height: i64,
        label: ShapeLabel,
        origin: CellCoord,
    ) -> GridResult<&Shape> {
        self.ensure_label_free(label)?;
        let shape = Shape::place_at(&self.grid, width, height, label, origin)?;
        Ok(self.push(shape))
    }

    fn ensure_label_free(&self, label: ShapeLabel) -> GridResult<()> {
        match self.shape(label) {
            Some(_) => Err(GridError::DuplicateLabel(label)),
            None => Ok(()),
        }
    }

    fn push(&mut self, shape: Shape) -> &Shape {
        let index = self.shapes.len();
        self.shapes.push(shape);
        &self.shapes[index]
    }

    /// Handle a click at a canvas pixel.
    pub fn on_click(&mut self, x: f64, y: f64) {
        self.selection
            .handle_click(&self.grid, &mut self.shapes, Point::new(x, y));
    }

    /// Handle a key press by name. Returns true if a shape changed.
    pub fn on_key(&mut self, key_name: &str) -> bool {
        match Key::from_name(key_name) {
            Some(key) => self.handle_key(key),
            None => {
                log::trace!("Ignored key {:?}", key_name);
                false
            }
        }
    }

    fn handle_key(&mut self, key: Key) -> bool {
        match key {
            Key::Arrow(direction) => self.selection.handle_direction(
                &self.grid,
                &mut self.shapes,
                &mut self.highlights,
                direction,
            ),
            Key::Rotate => {
                self.selection
                    .handle_rotate(&self.grid, &mut self.shapes, &mut self.highlights)
            }
        }
    }

    /// Flip a highlight overlay. Returns the new flag, or `None` when no
    /// shape carries the label.
    pub fn toggle_highlight(&mut self, label: ShapeLabel, kind: HighlightKind) -> Option<bool> {
        let shape = self.shapes.iter().find(|s| s.label == label)?;
        Some(self.highlights.toggle(&self.grid, shape, kind))
    }

    /// Freeze all geometry for the rest of the session.
    pub fn lock(&mut self) {
        self.selection.lock();
    }

    /// Apply a command from the shell.
    pub fn dispatch(&mut self, command: Command) {
        match command {
            Command::Click(point) => self.on_click(point.x, point.y),
            Command::Key(key) => {
                self.handle_key(key);
            }
            Command::ToggleHighlight { label, kind } => {
                self.toggle_highlight(label, kind);
            }
            Command::Lock => self.lock(),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// `(rows, cols, cell_size)`.
    pub fn grid_dimensions(&self) -> (u32, u32, u32) {
        self.grid.dimensions()
    }

    /// Shapes in placement order.
    pub fn list_shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Every marker of every active overlay.
    pub fn list_markers(&self) -> BTreeSet<Marker> {
        self.highlights.markers()
    }

    pub fn shape(&self, label: ShapeLabel) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.label == label)
    }

    pub fn selected_shape(&self) -> Option<&Shape> {
        let id = self.selection.selected()?;
        self.shapes.iter().find(|s| s.id() == id)
    }

    pub fn is_locked(&self) -> bool {
        self.selection.is_locked()
    }

    pub fn highlight_state(&self, label: ShapeLabel) -> Option<HighlightState> {
        self.shape(label).map(|s| self.highlights.state(s.id()))
    }

    pub fn shape_state(&self, label: ShapeLabel) -> Option<ShapeState> {
        self.shape(label).map(|s| self.selection.state_of(s))
    }

    /// Everything a renderer needs, in one serializable value.
    pub fn snapshot(&self) -> CanvasSnapshot {
        CanvasSnapshot {
            grid: self.grid,
            locked: self.is_locked(),
            shapes: self
                .shapes
                .iter()
                .map(|shape| ShapeSnapshot {
                    shape: shape.clone(),
                    state: self.selection.state_of(shape),
                    highlight: self.highlights.state(shape.id()),
                })
                .collect(),
            markers: self.list_markers().into_iter().collect(),
        }
    }
}

/// Serializable view of a canvas for rendering or debugging.
#[derive(Debug, Clone, Serialize)]
pub struct CanvasSnapshot {
    pub grid: Grid,
    pub locked: bool,
    pub shapes: Vec<ShapeSnapshot>,
    pub markers: Vec<Marker>,
}

/// A shape together with its interaction and highlight state.
#[derive(Debug, Clone, Serialize)]
pub struct ShapeSnapshot {
    #[serde(flatten)]
    pub shape: Shape,
    pub state: ShapeState,
    pub highlight: HighlightState,
}

impl CanvasSnapshot {
    /// Serialize the snapshot to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Direction;

    fn inside_marker_cells(canvas: &Canvas, label: ShapeLabel) -> BTreeSet<CellCoord> {
        canvas
            .list_markers()
            .into_iter()
            .filter(|m| m.owner == label && m.kind == HighlightKind::Inside)
            .map(|m| m.cell)
            .collect()
    }

    #[test]
    fn test_init_grid() {
        let canvas = Canvas::init_grid(4, 5, 50).unwrap();
        assert_eq!(canvas.grid_dimensions(), (4, 5, 50));
        assert!(canvas.list_shapes().is_empty());
        assert!(canvas.list_markers().is_empty());
        assert!(matches!(
            Canvas::init_grid(0, 5, 50),
            Err(GridError::InvalidDimension(_))
        ));
    }

    #[test]
    fn test_place_shapes_in_order() {
        let mut canvas = Canvas::with_seed(5, 5, 50, 1).unwrap();
        canvas.place_next(2, 1).unwrap();
        canvas.place_next(1, 3).unwrap();
        canvas.place_next(5, 5).unwrap();
        let labels: Vec<_> = canvas.list_shapes().iter().map(|s| s.label).collect();
        assert_eq!(labels, ShapeLabel::ALL.to_vec());
        assert_eq!(canvas.place_next(1, 1).unwrap_err(), GridError::NoFreeLabel);
    }

    #[test]
    fn test_place_rejects_duplicate_and_oversized() {
        let mut canvas = Canvas::with_seed(3, 3, 50, 2).unwrap();
        canvas.place_shape(1, 1, ShapeLabel::B).unwrap();
        assert_eq!(
            canvas.place_shape(1, 1, ShapeLabel::B).unwrap_err(),
            GridError::DuplicateLabel(ShapeLabel::B)
        );
        assert!(matches!(
            canvas.place_shape(4, 1, ShapeLabel::A),
            Err(GridError::OversizedShape { .. })
        ));
        assert_eq!(canvas.list_shapes().len(), 1);
    }

    #[test]
    fn test_seeded_placement_is_reproducible() {
        let origins = |seed| {
            let mut canvas = Canvas::with_seed(10, 10, 50, seed).unwrap();
            canvas.place_next(2, 3).unwrap();
            canvas.place_next(4, 1).unwrap();
            canvas.list_shapes().iter().map(|s| s.origin()).collect::<Vec<_>>()
        };
        assert_eq!(origins(99), origins(99));
    }

    #[test]
    fn test_with_config() {
        let config = EditorConfig {
            cell_size: 20,
            click_tolerance: 0.0,
            seed: Some(5),
            ..EditorConfig::default()
        };
        let mut canvas = Canvas::with_config(&config, 3, 3).unwrap();
        assert_eq!(canvas.grid_dimensions(), (3, 3, 20));
        canvas.place_shape_at(1, 1, ShapeLabel::A, CellCoord::new(0, 0)).unwrap();
        canvas.on_click(21.0, 5.0);
        assert!(canvas.selected_shape().is_none());
        canvas.on_click(19.0, 5.0);
        assert_eq!(canvas.selected_shape().map(|s| s.label), Some(ShapeLabel::A));
    }

    #[test]
    fn test_non_finite_click_selects_nothing() {
        let mut canvas = Canvas::init_grid(4, 4, 50).unwrap();
        canvas.place_shape_at(1, 1, ShapeLabel::A, CellCoord::new(3, 3)).unwrap();
        canvas.on_click(f64::NAN, f64::NAN);
        assert!(canvas.selected_shape().is_none());
        canvas.on_click(175.0, 175.0);
        canvas.on_click(f64::NAN, 175.0);
        assert!(canvas.selected_shape().is_none());
    }

    #[test]
    fn test_place_at_extreme_origin_is_out_of_bounds() {
        let mut canvas = Canvas::init_grid(4, 4, 50).unwrap();
        assert!(matches!(
            canvas.place_shape_at(1, 1, ShapeLabel::A, CellCoord::new(i64::MAX, 0)),
            Err(GridError::OutOfBounds { .. })
        ));
        assert!(canvas.list_shapes().is_empty());
    }

    #[test]
    fn test_highlight_follows_move() {
        let mut canvas = Canvas::init_grid(4, 4, 50).unwrap();
        canvas.place_shape_at(2, 1, ShapeLabel::A, CellCoord::new(0, 0)).unwrap();

        assert_eq!(canvas.toggle_highlight(ShapeLabel::A, HighlightKind::Inside), Some(true));
        assert_eq!(canvas.list_markers().len(), 2);
        assert_eq!(
            inside_marker_cells(&canvas, ShapeLabel::A),
            [CellCoord::new(0, 0), CellCoord::new(1, 0)].into()
        );

        canvas.on_click(10.0, 10.0);
        assert!(canvas.on_key("Right"));
        assert_eq!(canvas.shape(ShapeLabel::A).unwrap().origin(), CellCoord::new(1, 0));
        assert_eq!(canvas.list_markers().len(), 2);
        assert_eq!(
            inside_marker_cells(&canvas, ShapeLabel::A),
            [CellCoord::new(1, 0), CellCoord::new(2, 0)].into()
        );
        assert!(!canvas.list_markers().iter().any(|m| m.cell == CellCoord::new(0, 0)));
    }

    #[test]
    fn test_outside_highlight_follows_rotation() {
        let mut canvas = Canvas::init_grid(3, 3, 50).unwrap();
        canvas.place_shape_at(3, 1, ShapeLabel::A, CellCoord::new(0, 0)).unwrap();
        canvas.toggle_highlight(ShapeLabel::A, HighlightKind::Outside);
        assert_eq!(canvas.list_markers().len(), 6);

        canvas.on_click(75.0, 25.0);
        assert!(canvas.on_key("r"));
        let shape = canvas.shape(ShapeLabel::A).unwrap();
        assert_eq!((shape.width(), shape.height()), (1, 3));
        let markers = canvas.list_markers();
        assert_eq!(markers.len(), 6);
        assert!(markers.iter().all(|m| m.cell.col != 0));
    }

    #[test]
    fn test_toggle_highlight_twice_restores_markers() {
        let mut canvas = Canvas::init_grid(4, 4, 50).unwrap();
        canvas.place_shape_at(2, 2, ShapeLabel::A, CellCoord::new(0, 0)).unwrap();
        canvas.place_shape_at(2, 2, ShapeLabel::B, CellCoord::new(1, 1)).unwrap();
        canvas.toggle_highlight(ShapeLabel::B, HighlightKind::Inside);
        let before = canvas.list_markers();

        assert_eq!(canvas.toggle_highlight(ShapeLabel::A, HighlightKind::Inside), Some(true));
        assert_eq!(canvas.toggle_highlight(ShapeLabel::A, HighlightKind::Inside), Some(false));
        assert_eq!(canvas.list_markers(), before);
    }

    #[test]
    fn test_toggle_unknown_label_is_noop() {
        let mut canvas = Canvas::init_grid(2, 2, 50).unwrap();
        assert_eq!(canvas.toggle_highlight(ShapeLabel::C, HighlightKind::Inside), None);
        assert!(canvas.list_markers().is_empty());
    }

    #[test]
    fn test_lock_freezes_geometry() {
        let mut canvas = Canvas::init_grid(4, 4, 50).unwrap();
        canvas.place_shape_at(1, 1, ShapeLabel::A, CellCoord::new(1, 1)).unwrap();
        canvas.on_click(75.0, 75.0);
        canvas.lock();

        assert!(!canvas.on_key("Left"));
        assert!(!canvas.on_key("r"));
        assert_eq!(canvas.shape(ShapeLabel::A).unwrap().origin(), CellCoord::new(1, 1));
        assert_eq!(canvas.shape_state(ShapeLabel::A), Some(ShapeState::Locked));

        // Highlights remain available after locking.
        assert_eq!(canvas.toggle_highlight(ShapeLabel::A, HighlightKind::Inside), Some(true));
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let mut canvas = Canvas::init_grid(4, 4, 50).unwrap();
        canvas.place_shape_at(1, 1, ShapeLabel::A, CellCoord::new(1, 1)).unwrap();
        canvas.on_click(75.0, 75.0);
        assert!(!canvas.on_key("space"));
        assert!(!canvas.on_key("left"));
        assert_eq!(canvas.shape(ShapeLabel::A).unwrap().origin(), CellCoord::new(1, 1));
    }

    #[test]
    fn test_dispatch_commands() {
        let mut canvas = Canvas::init_grid(4, 4, 50).unwrap();
        canvas.place_shape_at(1, 1, ShapeLabel::A, CellCoord::new(0, 0)).unwrap();

        canvas.dispatch(Command::Click(Point::new(25.0, 25.0)));
        canvas.dispatch(Command::Key(Key::Arrow(Direction::Down)));
        canvas.dispatch(Command::ToggleHighlight {
            label: ShapeLabel::A,
            kind: HighlightKind::Inside,
        });
        canvas.dispatch(Command::Lock);
        canvas.dispatch(Command::Key(Key::Arrow(Direction::Down)));

        assert_eq!(canvas.shape(ShapeLabel::A).unwrap().origin(), CellCoord::new(0, 1));
        assert!(canvas.is_locked());
        assert_eq!(
            canvas.highlight_state(ShapeLabel::A),
            Some(HighlightState {
                inside: true,
                outside: false
            })
        );
    }

    #[test]
    fn test_snapshot_json() {
        let mut canvas = Canvas::init_grid(2, 2, 50).unwrap();
        canvas.place_shape_at(1, 1, ShapeLabel::A, CellCoord::new(0, 0)).unwrap();
        canvas.toggle_highlight(ShapeLabel::A, HighlightKind::Inside);
        let snapshot = canvas.snapshot();
        assert_eq!(snapshot.shapes.len(), 1);
        assert_eq!(snapshot.markers.len(), 1);

        let value: serde_json::Value = serde_json::from_str(&snapshot.to_json().unwrap()).unwrap();
        assert_eq!(value["locked"], false);
        assert_eq!(value["shapes"][0]["label"], "A");
        assert_eq!(value["shapes"][0]["width"], 1);
        assert_eq!(value["shapes"][0]["state"], "Unselected");
        assert_eq!(value["shapes"][0]["highlight"]["inside"], true);
        assert_eq!(value["markers"][0]["kind"], "Inside");
    }
}
