//! Text UI: typed commands in, a character drawing of the canvas out.

use gridmark_core::{
    Canvas, CellCoord, Command, Direction, GridError, HighlightKind, Key, ShapeLabel,
};
use kurbo::Point;
use thiserror::Error;

/// Action requested by a line of user input.
#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    /// Forward a command to the canvas.
    Canvas(Command),
    /// Draw the grid.
    Show,
    /// Dump the canvas snapshot as JSON.
    Json,
    Help,
    Quit,
    /// Blank line or an ignored key.
    Nothing,
}

/// Errors from parsing a command line.
#[derive(Debug, PartialEq, Error)]
pub enum UiError {
    #[error("Unknown command: {0}")]
    UnknownCommand(String),
    #[error("Usage: {0}")]
    Usage(&'static str),
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Parse one line typed at the command prompt.
pub fn parse_action(line: &str) -> Result<UiAction, UiError> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(UiAction::Nothing);
    };
    let args: Vec<&str> = words.collect();
    let arrow = |direction: Direction| -> Result<UiAction, UiError> {
        Ok(UiAction::Canvas(Command::Key(Key::Arrow(direction))))
    };

    match (head.to_ascii_lowercase().as_str(), args.as_slice()) {
        ("click", [x, y]) => {
            let point = Point::new(coordinate(x)?, coordinate(y)?);
            Ok(UiAction::Canvas(Command::Click(point)))
        }
        ("click", _) => Err(UiError::Usage("click X Y")),
        ("key", [name]) => Ok(Key::from_name(name)
            .map(|key| UiAction::Canvas(Command::Key(key)))
            .unwrap_or(UiAction::Nothing)),
        ("key", _) => Err(UiError::Usage("key NAME")),
        ("left", []) => arrow(Direction::Left),
        ("right", []) => arrow(Direction::Right),
        ("up", []) => arrow(Direction::Up),
        ("down", []) => arrow(Direction::Down),
        ("r", []) => Ok(UiAction::Canvas(Command::Key(Key::Rotate))),
        ("highlight", [target]) => parse_highlight(target),
        ("highlight", _) => Err(UiError::Usage("highlight A | highlight A'")),
        ("lock", []) => Ok(UiAction::Canvas(Command::Lock)),
        ("show", []) => Ok(UiAction::Show),
        ("json", []) => Ok(UiAction::Json),
        ("help", []) => Ok(UiAction::Help),
        ("quit" | "exit", []) => Ok(UiAction::Quit),
        _ => Err(UiError::UnknownCommand(line.trim().to_string())),
    }
}

/// A finite pixel coordinate.
fn coordinate(word: &str) -> Result<f64, UiError> {
    word.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or(UiError::Usage("click X Y"))
}

/// `A` toggles the inside overlay, `A'` the outside one.
fn parse_highlight(target: &str) -> Result<UiAction, UiError> {
    let (label, kind) = match target.strip_suffix('\'') {
        Some(label) => (label, HighlightKind::Outside),
        None => (target, HighlightKind::Inside),
    };
    let label: ShapeLabel = label.parse()?;
    Ok(UiAction::Canvas(Command::ToggleHighlight { label, kind }))
}

/// Draw the canvas as text, two characters per cell.
///
/// The first character is the label of the topmost shape covering the cell
/// (lowercase when selected) or `.`; the second is the marker: `o` inside,
/// `x` outside, `*` both.
pub fn render_text(canvas: &Canvas) -> String {
    let grid = canvas.grid();
    let markers = canvas.list_markers();
    let mut out = String::new();

    for row in 0..i64::from(grid.rows()) {
        let line: Vec<String> = (0..i64::from(grid.cols()))
            .map(|col| {
                let cell = CellCoord::new(col, row);
                let shape = canvas
                    .list_shapes()
                    .iter()
                    .rev()
                    .find(|shape| shape.contains_cell(cell))
                    .map(|shape| {
                        let c = shape.label.as_str().chars().next().unwrap_or('?');
                        if shape.is_selected() { c.to_ascii_lowercase() } else { c }
                    })
                    .unwrap_or('.');
                let here = |kind| markers.iter().any(|m| m.cell == cell && m.kind == kind);
                let mark = match (here(HighlightKind::Inside), here(HighlightKind::Outside)) {
                    (true, true) => '*',
                    (true, false) => 'o',
                    (false, true) => 'x',
                    (false, false) => ' ',
                };
                format!("{shape}{mark}")
            })
            .collect();
        out.push_str(line.join(" ").trim_end());
        out.push('\n');
    }

    let status = if canvas.is_locked() {
        "Locked".to_string()
    } else {
        match canvas.selected_shape() {
            Some(shape) => format!("Selected: {}", shape.label),
            None => "Nothing selected".to_string(),
        }
    };
    out.push_str(&status);
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_canvas_commands() {
        assert_eq!(
            parse_action("click 10 20.5").unwrap(),
            UiAction::Canvas(Command::Click(Point::new(10.0, 20.5)))
        );
        assert_eq!(
            parse_action("  Left ").unwrap(),
            UiAction::Canvas(Command::Key(Key::Arrow(Direction::Left)))
        );
        assert_eq!(
            parse_action("key Down").unwrap(),
            UiAction::Canvas(Command::Key(Key::Arrow(Direction::Down)))
        );
        assert_eq!(
            parse_action("r").unwrap(),
            UiAction::Canvas(Command::Key(Key::Rotate))
        );
        assert_eq!(parse_action("lock").unwrap(), UiAction::Canvas(Command::Lock));
    }

    #[test]
    fn test_parse_highlight() {
        assert_eq!(
            parse_action("highlight B").unwrap(),
            UiAction::Canvas(Command::ToggleHighlight {
                label: ShapeLabel::B,
                kind: HighlightKind::Inside,
            })
        );
        assert_eq!(
            parse_action("highlight C'").unwrap(),
            UiAction::Canvas(Command::ToggleHighlight {
                label: ShapeLabel::C,
                kind: HighlightKind::Outside,
            })
        );
        assert_eq!(
            parse_action("highlight Z"),
            Err(UiError::Grid(GridError::UnknownLabel("Z".to_string())))
        );
    }

    #[test]
    fn test_parse_shell_actions() {
        assert_eq!(parse_action("").unwrap(), UiAction::Nothing);
        assert_eq!(parse_action("key space").unwrap(), UiAction::Nothing);
        assert_eq!(parse_action("show").unwrap(), UiAction::Show);
        assert_eq!(parse_action("json").unwrap(), UiAction::Json);
        assert_eq!(parse_action("QUIT").unwrap(), UiAction::Quit);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse_action("click 1"), Err(UiError::Usage("click X Y")));
        assert_eq!(parse_action("click a b"), Err(UiError::Usage("click X Y")));
        assert_eq!(parse_action("click NaN NaN"), Err(UiError::Usage("click X Y")));
        assert_eq!(parse_action("click 10 inf"), Err(UiError::Usage("click X Y")));
        assert_eq!(parse_action("click -infinity 3"), Err(UiError::Usage("click X Y")));
        assert_eq!(
            parse_action("jump"),
            Err(UiError::UnknownCommand("jump".to_string()))
        );
    }

    #[test]
    fn test_render_text() {
        let mut canvas = Canvas::init_grid(2, 3, 50).unwrap();
        canvas
            .place_shape_at(2, 1, ShapeLabel::A, CellCoord::new(0, 0))
            .unwrap();
        canvas.toggle_highlight(ShapeLabel::A, HighlightKind::Inside);
        canvas.toggle_highlight(ShapeLabel::A, HighlightKind::Outside);
        canvas.on_click(10.0, 10.0);

        let text = render_text(&canvas);
        assert_eq!(text, "ao ao .x\n.x .x .x\nSelected: A\n");

        canvas.lock();
        assert!(render_text(&canvas).ends_with("Locked\n"));
    }
}
