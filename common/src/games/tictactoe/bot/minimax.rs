use super::{MoveStrategy, Refusal, check_preconditions};
use crate::games::tictactoe::board::get_available_moves;
use crate::games::tictactoe::outcome::{Outcome, evaluate};
use crate::games::tictactoe::types::{Mark, Move, Position};

pub const MAX_SCORE: i32 = 1000;
pub const MIN_SCORE: i32 = -1000;

/// Full-depth minimax with alpha-beta pruning. Never loses.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinimaxStrategy;

impl MoveStrategy for MinimaxStrategy {
    fn decide(&mut self, grid: &[Vec<Mark>], human_unit: Mark) -> Result<Move, Refusal> {
        let bot_unit = check_preconditions(grid, human_unit)?;

        find_best_move(grid, bot_unit, human_unit)
            .map(|pos| Move::new(pos.row, pos.col, bot_unit))
            .ok_or(Refusal::GameFinished)
    }

    fn name(&self) -> &'static str {
        "minimax"
    }
}

fn find_best_move(grid: &[Vec<Mark>], bot_unit: Mark, human_unit: Mark) -> Option<Position> {
    let mut board = grid.to_vec();

    let mut best_move = None;
    let mut best_score = i32::MIN;
    let mut alpha = i32::MIN;

    for pos in get_available_moves(grid) {
        board[pos.row][pos.col] = bot_unit;
        let score = minimax(&mut board, 0, false, bot_unit, human_unit, alpha, i32::MAX);
        board[pos.row][pos.col] = Mark::Empty;

        // Strictly greater keeps the first of equally good moves.
        if score > best_score {
            best_score = score;
            best_move = Some(pos);
        }
        alpha = alpha.max(best_score);
    }

    best_move
}

fn score_outcome(outcome: Outcome, bot_unit: Mark, depth: i32) -> i32 {
    match outcome.winner() {
        Some(winner) if winner == bot_unit => MAX_SCORE - depth,
        Some(_) => MIN_SCORE + depth,
        None => 0,
    }
}

fn minimax(
    board: &mut [Vec<Mark>],
    depth: i32,
    is_maximizing: bool,
    bot_unit: Mark,
    human_unit: Mark,
    mut alpha: i32,
    mut beta: i32,
) -> i32 {
    if let Some(outcome) = evaluate(board) {
        return score_outcome(outcome, bot_unit, depth);
    }

    let moves = get_available_moves(board);

    if is_maximizing {
        let mut max_eval = i32::MIN;
        for pos in moves {
            board[pos.row][pos.col] = bot_unit;
            let eval = minimax(board, depth + 1, false, bot_unit, human_unit, alpha, beta);
            board[pos.row][pos.col] = Mark::Empty;

            max_eval = max_eval.max(eval);
            alpha = alpha.max(eval);
            if beta <= alpha {
                break;
            }
        }
        max_eval
    } else {
        let mut min_eval = i32::MAX;
        for pos in moves {
            board[pos.row][pos.col] = human_unit;
            let eval = minimax(board, depth + 1, true, bot_unit, human_unit, alpha, beta);
            board[pos.row][pos.col] = Mark::Empty;

            min_eval = min_eval.min(eval);
            beta = beta.min(eval);
            if beta <= alpha {
                break;
            }
        }
        min_eval
    }
}
