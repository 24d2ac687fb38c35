mod bot_type;
mod first_empty;
mod minimax;
mod random;

use std::fmt;

use super::board::is_valid_grid;
use super::outcome::evaluate;
use super::types::{Mark, Move};

pub use bot_type::BotType;
pub use first_empty::FirstEmptyStrategy;
pub use minimax::{MAX_SCORE, MIN_SCORE, MinimaxStrategy};
pub use random::RandomStrategy;

/// Why a strategy declined to move. Each variant stands in for a reserved,
/// out-of-range move and is never confused with a legal one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refusal {
    InvalidUnit,
    InvalidBoard,
    GameFinished,
}

impl fmt::Display for Refusal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Refusal::InvalidUnit => write!(f, "The human unit is not a valid unit."),
            Refusal::InvalidBoard => write!(f, "The board is not a 3x3 grid."),
            Refusal::GameFinished => write!(f, "The game on this board is already finished."),
        }
    }
}

pub trait MoveStrategy: Send {
    /// Picks the bot's reply on `grid`, playing the unit `human_unit` is not.
    /// Must leave `grid` untouched.
    fn decide(&mut self, grid: &[Vec<Mark>], human_unit: Mark) -> Result<Move, Refusal>;

    fn name(&self) -> &'static str;
}

pub fn bot_unit_for(human_unit: Mark) -> Option<Mark> {
    Mark::VALID_UNITS
        .into_iter()
        .find(|&unit| human_unit.is_unit() && unit != human_unit)
}

/// Checks shared by every strategy; yields the bot's unit when a move is allowed.
pub(crate) fn check_preconditions(grid: &[Vec<Mark>], human_unit: Mark) -> Result<Mark, Refusal> {
    let bot_unit = bot_unit_for(human_unit).ok_or(Refusal::InvalidUnit)?;

    if !is_valid_grid(grid) {
        return Err(Refusal::InvalidBoard);
    }

    if evaluate(grid).is_some() {
        return Err(Refusal::GameFinished);
    }

    Ok(bot_unit)
}
