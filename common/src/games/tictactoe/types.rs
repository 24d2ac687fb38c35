use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::error::GameError;

pub const BOARD_SIZE: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Mark {
    #[default]
    Empty,
    X,
    O,
}

impl Mark {
    /// The two units a game can be played with, in the order a bot falls back on.
    pub const VALID_UNITS: [Mark; 2] = [Mark::X, Mark::O];

    pub fn opponent(&self) -> Option<Mark> {
        match self {
            Mark::X => Some(Mark::O),
            Mark::O => Some(Mark::X),
            Mark::Empty => None,
        }
    }

    pub fn is_unit(&self) -> bool {
        *self != Mark::Empty
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mark::Empty => "",
            Mark::X => "X",
            Mark::O => "O",
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Mark {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "X" => Ok(Mark::X),
            "O" => Ok(Mark::O),
            _ => Err(GameError::InvalidUnit(format!(
                "Please use one of the following units: {}.",
                quoted_units()
            ))),
        }
    }
}

impl Serialize for Mark {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Mark {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        if value.is_empty() {
            return Ok(Mark::Empty);
        }
        value.parse().map_err(serde::de::Error::custom)
    }
}

pub(crate) fn quoted_units() -> String {
    Mark::VALID_UNITS
        .iter()
        .map(|unit| format!("\"{}\"", unit))
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn to_pair(&self) -> [usize; 2] {
        [self.row, self.col]
    }
}

/// A cell claimed by a unit. Both the human request and the bot decision use it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub row: usize,
    pub col: usize,
    pub unit: Mark,
}

impl Move {
    pub fn new(row: usize, col: usize, unit: Mark) -> Self {
        Self { row, col, unit }
    }

    pub fn position(&self) -> Position {
        Position::new(self.row, self.col)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.row, self.col, self.unit)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WinningLine {
    pub mark: Mark,
    pub cells: [Position; 3],
}

impl WinningLine {
    pub fn new(mark: Mark, cells: [Position; 3]) -> Self {
        Self { mark, cells }
    }

    pub fn coordinates(&self) -> [[usize; 2]; 3] {
        self.cells.map(|cell| cell.to_pair())
    }
}
