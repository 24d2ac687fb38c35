mod board;
mod bot;
mod error;
mod game_session;
mod game_state;
mod outcome;
mod storage;
mod types;

pub use board::{Board, get_available_moves, is_valid_grid};
pub use bot::{
    BotType, FirstEmptyStrategy, MAX_SCORE, MIN_SCORE, MinimaxStrategy, MoveStrategy,
    RandomStrategy, Refusal, bot_unit_for,
};
pub use error::{ErrorKind, GameError};
pub use game_session::GameSession;
pub use game_state::{DRAW_RESULT, ErrorBody, GameState, GameView, Units, WinnerView};
pub use outcome::{Outcome, evaluate, find_winning_line};
pub use storage::{GameStorage, MemoryStorage};
pub use types::{BOARD_SIZE, Mark, Move, Position, WinningLine};
