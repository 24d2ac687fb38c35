use super::board::Board;

/// Where the live board of one session is kept between requests.
/// An empty storage means no game is in progress.
pub trait GameStorage {
    fn board(&self) -> Option<&Board>;
    fn board_mut(&mut self) -> Option<&mut Board>;
    fn store(&mut self, board: Board);
    fn remove(&mut self);

    fn has_board(&self) -> bool {
        self.board().is_some()
    }
}

/// Keeps the board in memory. Used by the server's session map and by tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    board: Option<Board>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GameStorage for MemoryStorage {
    fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    fn board_mut(&mut self) -> Option<&mut Board> {
        self.board.as_mut()
    }

    fn store(&mut self, board: Board) {
        self.board = Some(board);
    }

    fn remove(&mut self) {
        self.board = None;
    }
}
