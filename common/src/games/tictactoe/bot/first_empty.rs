use super::{MoveStrategy, Refusal, check_preconditions};
use crate::games::tictactoe::board::get_available_moves;
use crate::games::tictactoe::types::{Mark, Move};

/// Always takes the first empty cell in row-major order.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstEmptyStrategy;

impl MoveStrategy for FirstEmptyStrategy {
    fn decide(&mut self, grid: &[Vec<Mark>], human_unit: Mark) -> Result<Move, Refusal> {
        let bot_unit = check_preconditions(grid, human_unit)?;

        get_available_moves(grid)
            .first()
            .map(|pos| Move::new(pos.row, pos.col, bot_unit))
            .ok_or(Refusal::GameFinished)
    }

    fn name(&self) -> &'static str {
        "first_empty"
    }
}
