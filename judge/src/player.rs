use clap::ValueEnum;
use corner_bot::corner_strategy;
use max_flips_bot::MaxFlipsStrategy;
use random_bot::RandomStrategy;
use trios_bot_utils::Strategy;

/// The automated players the judge knows about.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum PlayerKind {
    /// Plays strong cards into the corners
    Corner,
    /// Plays the move that flips the most cards
    MaxFlips,
    /// Plays a random legal move
    Random,
}

impl PlayerKind {
    /// The seed is only used by players that make random choices.
    pub fn strategy(self, seed: u64) -> Box<dyn Strategy> {
        match self {
            PlayerKind::Corner => Box::new(corner_strategy()),
            PlayerKind::MaxFlips => Box::new(MaxFlipsStrategy),
            PlayerKind::Random => Box::new(RandomStrategy::new(seed)),
        }
    }
}

impl std::fmt::Display for PlayerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayerKind::Corner => f.write_str("corner"),
            PlayerKind::MaxFlips => f.write_str("max-flips"),
            PlayerKind::Random => f.write_str("random"),
        }
    }
}

pub struct Player {
    pub name: String,
    pub strategy: Box<dyn Strategy>,
}

impl Player {
    pub fn new(name: impl Into<String>, kind: PlayerKind, seed: u64) -> Self {
        Self {
            name: name.into(),
            strategy: kind.strategy(seed),
        }
    }
}
