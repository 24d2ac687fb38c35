use super::{MoveStrategy, Refusal, check_preconditions};
use crate::games::SessionRng;
use crate::games::tictactoe::board::get_available_moves;
use crate::games::tictactoe::types::{Mark, Move};

/// Picks uniformly among the empty cells.
pub struct RandomStrategy {
    rng: SessionRng,
}

impl RandomStrategy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SessionRng::new(seed),
        }
    }

    pub fn from_random() -> Self {
        Self {
            rng: SessionRng::from_random(),
        }
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }
}

impl MoveStrategy for RandomStrategy {
    fn decide(&mut self, grid: &[Vec<Mark>], human_unit: Mark) -> Result<Move, Refusal> {
        let bot_unit = check_preconditions(grid, human_unit)?;

        let available_moves = get_available_moves(grid);
        self.rng
            .choose(&available_moves)
            .map(|pos| Move::new(pos.row, pos.col, bot_unit))
            .ok_or(Refusal::GameFinished)
    }

    fn name(&self) -> &'static str {
        "random"
    }
}
