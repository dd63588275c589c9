//! Shapes placed on the grid.

mod rectangle;

pub use rectangle::{LABEL_INSET, Shape};

use crate::error::GridError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Stable shape identifier, independent of placement order.
pub type ShapeId = Uuid;

/// Label shown on a shape. Each label is used by at most one shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ShapeLabel {
    A,
    B,
    C,
}

/// Maximum number of live shapes, one per label.
pub const MAX_SHAPES: usize = ShapeLabel::ALL.len();

impl ShapeLabel {
    /// All labels in assignment order.
    pub const ALL: [ShapeLabel; 3] = [ShapeLabel::A, ShapeLabel::B, ShapeLabel::C];

    pub fn as_str(self) -> &'static str {
        match self {
            ShapeLabel::A => "A",
            ShapeLabel::B => "B",
            ShapeLabel::C => "C",
        }
    }

    /// Label for the n-th placed shape (0 = A).
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

impl fmt::Display for ShapeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShapeLabel {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "A" | "a" => Ok(ShapeLabel::A),
            "B" | "b" => Ok(ShapeLabel::B),
            "C" | "c" => Ok(ShapeLabel::C),
            other => Err(GridError::UnknownLabel(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_parse() {
        assert_eq!("A".parse::<ShapeLabel>().unwrap(), ShapeLabel::A);
        assert_eq!(" c ".parse::<ShapeLabel>().unwrap(), ShapeLabel::C);
        assert_eq!(
            "D".parse::<ShapeLabel>(),
            Err(GridError::UnknownLabel("D".to_string()))
        );
    }

    #[test]
    fn test_label_from_index() {
        assert_eq!(ShapeLabel::from_index(0), Some(ShapeLabel::A));
        assert_eq!(ShapeLabel::from_index(2), Some(ShapeLabel::C));
        assert_eq!(ShapeLabel::from_index(MAX_SHAPES), None);
    }
}
