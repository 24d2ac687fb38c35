use super::error::GameError;
use super::types::{BOARD_SIZE, Mark, Position, quoted_units};

pub fn get_available_moves(board: &[Vec<Mark>]) -> Vec<Position> {
    let mut moves = Vec::new();
    for (row, cells) in board.iter().enumerate() {
        for (col, &cell) in cells.iter().enumerate() {
            if cell == Mark::Empty {
                moves.push(Position::new(row, col));
            }
        }
    }
    moves
}

/// True when `grid` is exactly 3 rows of exactly 3 cells.
pub fn is_valid_grid(grid: &[Vec<Mark>]) -> bool {
    grid.len() == BOARD_SIZE && grid.iter().all(|row| row.len() == BOARD_SIZE)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [[Mark; BOARD_SIZE]; BOARD_SIZE],
    bot_unit: Mark,
    human_unit: Mark,
}

impl Board {
    pub fn new(bot_unit: Mark, human_unit: Mark) -> Result<Self, GameError> {
        if !bot_unit.is_unit() || !human_unit.is_unit() {
            return Err(GameError::InvalidUnit(format!(
                "Please use one of the following units: {}.",
                quoted_units()
            )));
        }

        if bot_unit == human_unit {
            return Err(GameError::InvalidUnit(format!(
                "The units must be different. You set both to \"{}\".",
                bot_unit
            )));
        }

        Ok(Self {
            cells: [[Mark::Empty; BOARD_SIZE]; BOARD_SIZE],
            bot_unit,
            human_unit,
        })
    }

    pub fn from_strs(bot_unit: &str, human_unit: &str) -> Result<Self, GameError> {
        Self::new(bot_unit.parse()?, human_unit.parse()?)
    }

    pub fn bot_unit(&self) -> Mark {
        self.bot_unit
    }

    pub fn human_unit(&self) -> Mark {
        self.human_unit
    }

    pub fn place(&mut self, row: usize, col: usize, unit: Mark) -> Result<&mut Self, GameError> {
        if unit != self.bot_unit && unit != self.human_unit {
            return Err(GameError::InvalidUnit(format!(
                "Invalid unit \"{}\". Please use one of the following values: \"{}\", \"{}\".",
                unit, self.human_unit, self.bot_unit
            )));
        }

        if row >= BOARD_SIZE {
            return Err(GameError::InvalidRow(row as i64));
        }

        if col >= BOARD_SIZE {
            return Err(GameError::InvalidColumn(col as i64));
        }

        if self.cells[row][col] != Mark::Empty {
            return Err(GameError::CoordinateOccupied(row, col));
        }

        self.cells[row][col] = unit;
        Ok(self)
    }

    /// Resets a cell, ignoring coordinates outside the board.
    pub fn clear(&mut self, row: usize, col: usize) {
        if let Some(cell) = self.cells.get_mut(row).and_then(|cells| cells.get_mut(col)) {
            *cell = Mark::Empty;
        }
    }

    pub fn get(&self, row: usize, col: usize) -> Mark {
        self.cells
            .get(row)
            .and_then(|cells| cells.get(col))
            .copied()
            .unwrap_or(Mark::Empty)
    }

    pub fn grid(&self) -> Vec<Vec<Mark>> {
        self.cells.iter().map(|row| row.to_vec()).collect()
    }

    pub fn has_empty_cell(&self) -> bool {
        self.cells
            .iter()
            .any(|row| row.iter().any(|&cell| cell == Mark::Empty))
    }
}
