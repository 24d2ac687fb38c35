use serde::{Deserialize, Serialize};

use super::board::Board;
use super::error::GameError;
use super::outcome::{Outcome, evaluate};
use super::types::Mark;

pub const DRAW_RESULT: &str = "draw";

/// Snapshot returned to callers after every operation. `game` is `None`
/// when no game is in progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub game: Option<GameView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameView {
    pub winner: Option<WinnerView>,
    pub board: Vec<Vec<Mark>>,
    pub units: Units,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinnerView {
    pub result: String,
    pub coordinates: Option<[[usize; 2]; 3]>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Units {
    pub human: Mark,
    pub bot: Mark,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: bool,
    pub detail: String,
}

impl GameState {
    pub fn empty() -> Self {
        Self { game: None }
    }

    pub fn from_board(board: Option<&Board>) -> Self {
        Self {
            game: board.map(GameView::from_board),
        }
    }
}

impl GameView {
    pub fn from_board(board: &Board) -> Self {
        let grid = board.grid();
        let winner = evaluate(&grid).map(WinnerView::from_outcome);
        Self {
            winner,
            board: grid,
            units: Units {
                human: board.human_unit(),
                bot: board.bot_unit(),
            },
        }
    }
}

impl WinnerView {
    pub fn from_outcome(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Win(line) => Self {
                result: line.mark.to_string(),
                coordinates: Some(line.coordinates()),
            },
            Outcome::Draw => Self {
                result: DRAW_RESULT.to_string(),
                coordinates: None,
            },
        }
    }
}

impl From<&GameError> for ErrorBody {
    fn from(err: &GameError) -> Self {
        Self {
            error: true,
            detail: err.to_string(),
        }
    }
}
