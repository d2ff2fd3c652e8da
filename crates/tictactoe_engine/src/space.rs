//! Space identifiers for the 3x3 board.

use super::GameError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// One of the 9 board cells, numbered 0-8 left-to-right, top-to-bottom.
///
/// A `Space` is always on the board; raw keys are validated when converted
/// through [`FromStr`] or [`TryFrom<usize>`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(try_from = "u8", into = "u8")]
#[display("{}", _0)]
pub struct Space(u8);

impl Space {
    /// The center space (4).
    pub const CENTER: Space = Space(4);

    /// All 9 spaces in ascending order.
    pub const ALL: [Space; 9] = [
        Space(0),
        Space(1),
        Space(2),
        Space(3),
        Space(4),
        Space(5),
        Space(6),
        Space(7),
        Space(8),
    ];

    /// Creates a space from a board index, or `None` if it is off the board.
    pub const fn new(index: usize) -> Option<Self> {
        if index < 9 {
            Some(Space(index as u8))
        } else {
            None
        }
    }

    /// Returns the board index (0-8).
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Row of this space (0-2).
    pub const fn row(self) -> usize {
        self.index() / 3
    }

    /// Column of this space (0-2).
    pub const fn col(self) -> usize {
        self.index() % 3
    }

    /// True for the four corner spaces.
    pub const fn is_corner(self) -> bool {
        self.row() != 1 && self.col() != 1
    }

    /// True for the four middle-edge spaces.
    pub const fn is_middle(self) -> bool {
        (self.row() == 1) != (self.col() == 1)
    }

    /// Human-readable name of this space.
    pub fn label(self) -> &'static str {
        match self.0 {
            0 => "Top-left",
            1 => "Top-center",
            2 => "Top-right",
            3 => "Middle-left",
            4 => "Center",
            5 => "Middle-right",
            6 => "Bottom-left",
            7 => "Bottom-center",
            _ => "Bottom-right",
        }
    }
}

impl TryFrom<usize> for Space {
    type Error = GameError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Space::new(index).ok_or_else(|| GameError::KeyNotOnBoard(index.to_string()))
    }
}

impl TryFrom<u8> for Space {
    type Error = GameError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Space::try_from(index as usize)
    }
}

impl From<Space> for u8 {
    fn from(space: Space) -> Self {
        space.0
    }
}

impl FromStr for Space {
    type Err = GameError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        key.trim()
            .parse::<usize>()
            .ok()
            .and_then(Space::new)
            .ok_or_else(|| GameError::KeyNotOnBoard(key.to_string()))
    }
}
