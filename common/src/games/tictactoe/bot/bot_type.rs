use std::fmt;

use serde::{Deserialize, Serialize};

use super::{FirstEmptyStrategy, MinimaxStrategy, MoveStrategy, RandomStrategy};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BotType {
    FirstEmpty,
    Random,
    #[default]
    Minimax,
}

impl BotType {
    pub fn create_strategy(&self) -> Box<dyn MoveStrategy> {
        match self {
            BotType::FirstEmpty => Box::new(FirstEmptyStrategy),
            BotType::Random => Box::new(RandomStrategy::from_random()),
            BotType::Minimax => Box::new(MinimaxStrategy),
        }
    }
}

impl fmt::Display for BotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BotType::FirstEmpty => "first_empty",
            BotType::Random => "random",
            BotType::Minimax => "minimax",
        };
        write!(f, "{}", name)
    }
}
