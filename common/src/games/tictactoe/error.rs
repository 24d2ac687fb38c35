use std::fmt;

/// How a caller should react to a [`GameError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed input: missing fields or units outside the unit set.
    Validation,
    /// The session is in the wrong state for the operation.
    StateConflict,
    /// A move broke the board rules, including moves proposed by the bot.
    RuleViolation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    MissingBody,
    InvalidBody(String),
    MissingField(&'static str),
    EmptyField(&'static str),
    InvalidUnit(String),
    InvalidRow(i64),
    InvalidColumn(i64),
    CoordinateOccupied(usize, usize),
    GameAlreadyInProgress,
    NoGameInProgress,
    GameAlreadyDone,
    InvalidBotMove(String),
}

impl GameError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GameError::MissingBody
            | GameError::InvalidBody(_)
            | GameError::MissingField(_)
            | GameError::EmptyField(_)
            | GameError::InvalidUnit(_) => ErrorKind::Validation,
            GameError::GameAlreadyInProgress
            | GameError::NoGameInProgress
            | GameError::GameAlreadyDone => ErrorKind::StateConflict,
            GameError::InvalidRow(_)
            | GameError::InvalidColumn(_)
            | GameError::CoordinateOccupied(_, _)
            | GameError::InvalidBotMove(_) => ErrorKind::RuleViolation,
        }
    }

    pub fn bot_move(detail: impl fmt::Display) -> Self {
        GameError::InvalidBotMove(format!("The bot chose an invalid move. {}", detail))
    }
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::MissingBody => write!(f, "Missing body content."),
            GameError::InvalidBody(detail) => write!(f, "Invalid body content: {}", detail),
            GameError::MissingField(field) => write!(f, "Missing the \"{}\" attribute.", field),
            GameError::EmptyField(field) => {
                write!(f, "Please provide a value for the \"{}\" attribute.", field)
            }
            GameError::InvalidUnit(detail) => write!(f, "{}", detail),
            GameError::InvalidRow(row) => write!(
                f,
                "Invalid row \"{}\". Please use one of the following values: \"0\", \"1\", \"2\".",
                row
            ),
            GameError::InvalidColumn(col) => write!(
                f,
                "Invalid column \"{}\". Please use one of the following values: \"0\", \"1\", \"2\".",
                col
            ),
            GameError::CoordinateOccupied(row, col) => {
                write!(f, "The position \"{},{}\" is already in use.", row, col)
            }
            GameError::GameAlreadyInProgress => write!(
                f,
                "There is already another game in progress. To start a new game you must delete the one currently in progress."
            ),
            GameError::NoGameInProgress => write!(f, "There is no game in progress."),
            GameError::GameAlreadyDone => {
                write!(f, "The game is already done. Delete it to start a new one.")
            }
            GameError::InvalidBotMove(detail) => write!(f, "{}", detail),
        }
    }
}

impl std::error::Error for GameError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_groups_errors() {
        assert_eq!(GameError::MissingField("row").kind(), ErrorKind::Validation);
        assert_eq!(GameError::InvalidUnit(String::new()).kind(), ErrorKind::Validation);
        assert_eq!(GameError::NoGameInProgress.kind(), ErrorKind::StateConflict);
        assert_eq!(GameError::GameAlreadyDone.kind(), ErrorKind::StateConflict);
        assert_eq!(GameError::InvalidRow(7).kind(), ErrorKind::RuleViolation);
        assert_eq!(GameError::CoordinateOccupied(0, 0).kind(), ErrorKind::RuleViolation);
    }

    #[test]
    fn test_bot_move_prefixes_detail() {
        let err = GameError::bot_move(GameError::CoordinateOccupied(1, 2));
        assert_eq!(
            err.to_string(),
            "The bot chose an invalid move. The position \"1,2\" is already in use."
        );
        assert_eq!(err.kind(), ErrorKind::RuleViolation);
    }
}
