use crate::log;

use super::board::Board;
use super::bot::MoveStrategy;
use super::error::GameError;
use super::game_state::GameState;
use super::outcome::evaluate;
use super::storage::GameStorage;
use super::types::{BOARD_SIZE, Mark};

/// Drives one human-versus-bot game kept in a caller-supplied [`GameStorage`].
///
/// The session holds no board of its own: a storage without a board is the
/// `NoGame` state, a storage with a board is `InProgress`, finished or not.
/// Bot replies go through the same [`Board::place`] checks as human moves.
pub struct GameSession {
    strategy: Box<dyn MoveStrategy>,
}

impl GameSession {
    pub fn new(strategy: Box<dyn MoveStrategy>) -> Self {
        Self { strategy }
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    pub fn state<S: GameStorage + ?Sized>(storage: &S) -> GameState {
        GameState::from_board(storage.board())
    }

    pub fn start<S: GameStorage + ?Sized>(
        &self,
        storage: &mut S,
        human_unit: Mark,
        bot_unit: Mark,
    ) -> Result<GameState, GameError> {
        if storage.has_board() {
            return Err(GameError::GameAlreadyInProgress);
        }

        let board = Board::new(bot_unit, human_unit)?;
        let state = GameState::from_board(Some(&board));
        storage.store(board);
        Ok(state)
    }

    /// Like [`GameSession::start`], with units as the caller sent them. The
    /// in-progress check runs before the units are parsed.
    pub fn start_from_strs<S: GameStorage + ?Sized>(
        &self,
        storage: &mut S,
        human_unit: &str,
        bot_unit: &str,
    ) -> Result<GameState, GameError> {
        if storage.has_board() {
            return Err(GameError::GameAlreadyInProgress);
        }

        self.start(storage, human_unit.parse()?, bot_unit.parse()?)
    }

    pub fn apply_human_move<S: GameStorage + ?Sized>(
        &mut self,
        storage: &mut S,
        row: i64,
        col: i64,
    ) -> Result<GameState, GameError> {
        let board = storage.board_mut().ok_or(GameError::NoGameInProgress)?;

        if evaluate(&board.grid()).is_some() {
            return Err(GameError::GameAlreadyDone);
        }

        let row_idx = board_index(row).ok_or(GameError::InvalidRow(row))?;
        let col_idx = board_index(col).ok_or(GameError::InvalidColumn(col))?;
        let human_unit = board.human_unit();
        board.place(row_idx, col_idx, human_unit)?;

        if evaluate(&board.grid()).is_none() && board.has_empty_cell() {
            self.play_bot_turn(board)?;
        }

        Ok(GameState::from_board(Some(&*board)))
    }

    pub fn delete<S: GameStorage + ?Sized>(storage: &mut S) {
        storage.remove();
    }

    fn play_bot_turn(&mut self, board: &mut Board) -> Result<(), GameError> {
        let decided = match self.strategy.decide(&board.grid(), board.human_unit()) {
            Ok(decided) => decided,
            Err(refusal) => {
                log!("Bot {} refused to move: {}", self.strategy.name(), refusal);
                return Err(GameError::bot_move(refusal));
            }
        };

        if let Err(err) = board.place(decided.row, decided.col, decided.unit) {
            log!("Bot {} proposed {}: {}", self.strategy.name(), decided, err);
            return Err(GameError::bot_move(err));
        }

        if decided.unit != board.bot_unit() {
            board.clear(decided.row, decided.col);
            log!("Bot {} played the human unit at {}", self.strategy.name(), decided);
            return Err(GameError::bot_move(GameError::InvalidUnit(format!(
                "Invalid unit \"{}\". The bot plays \"{}\".",
                decided.unit,
                board.bot_unit()
            ))));
        }

        Ok(())
    }
}

fn board_index(value: i64) -> Option<usize> {
    usize::try_from(value).ok().filter(|&idx| idx < BOARD_SIZE)
}
