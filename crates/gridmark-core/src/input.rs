//! Input events and commands.
//!
//! The presentation shell turns whatever the user did into a [`Command`] and
//! hands it to [`crate::Canvas::dispatch`]. Everything here is plain data.

use crate::error::{GridError, GridResult};
use crate::highlight::HighlightKind;
use crate::shapes::ShapeLabel;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// A one-cell step in a cardinal direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Column and row delta of one step.
    pub fn delta(self) -> (i64, i64) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
        }
    }
}

/// Keys the editor reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Arrow(Direction),
    Rotate,
}

impl Key {
    /// Map a key name (`Left`, `Right`, `Up`, `Down`, `r`). Other keys are
    /// ignored and map to `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Left" => Some(Key::Arrow(Direction::Left)),
            "Right" => Some(Key::Arrow(Direction::Right)),
            "Up" => Some(Key::Arrow(Direction::Up)),
            "Down" => Some(Key::Arrow(Direction::Down)),
            "r" => Some(Key::Rotate),
            _ => None,
        }
    }
}

/// A user intent forwarded from the shell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Pointer click at a canvas pixel.
    Click(Point),
    Key(Key),
    /// Flip a highlight overlay of the shape with this label.
    ToggleHighlight {
        label: ShapeLabel,
        kind: HighlightKind,
    },
    /// Freeze all geometry for the rest of the session.
    Lock,
}

/// Parse a `"a, b"` pair of positive integers as typed into a size prompt.
pub fn parse_dimension_pair(input: &str) -> GridResult<(i64, i64)> {
    let mut parts = input.split(',').map(str::trim);
    let (Some(first), Some(second), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(GridError::InvalidDimension(format!(
            "expected two comma-separated integers, got {:?}",
            input.trim()
        )));
    };
    let parse = |part: &str| -> GridResult<i64> {
        let value = part.parse::<i64>().map_err(|_| {
            GridError::InvalidDimension(format!("{part:?} is not an integer"))
        })?;
        if value <= 0 {
            return Err(GridError::InvalidDimension(
                "dimensions must be positive integers".to_string(),
            ));
        }
        Ok(value)
    };
    Ok((parse(first)?, parse(second)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_from_name() {
        assert_eq!(Key::from_name("Left"), Some(Key::Arrow(Direction::Left)));
        assert_eq!(Key::from_name("Down"), Some(Key::Arrow(Direction::Down)));
        assert_eq!(Key::from_name("r"), Some(Key::Rotate));
        assert_eq!(Key::from_name("R"), None);
        assert_eq!(Key::from_name("space"), None);
    }

    #[test]
    fn test_direction_delta() {
        assert_eq!(Direction::Left.delta(), (-1, 0));
        assert_eq!(Direction::Up.delta(), (0, -1));
    }

    #[test]
    fn test_parse_dimension_pair() {
        assert_eq!(parse_dimension_pair("4,5").unwrap(), (4, 5));
        assert_eq!(parse_dimension_pair(" 3 , 12 \n").unwrap(), (3, 12));
    }

    #[test]
    fn test_parse_dimension_pair_rejects_bad_input() {
        for input in ["", "4", "4,5,6", "a,5", "4.5,2", "0,3", "3,-1"] {
            assert!(
                matches!(parse_dimension_pair(input), Err(GridError::InvalidDimension(_))),
                "accepted {input:?}"
            );
        }
    }
}
