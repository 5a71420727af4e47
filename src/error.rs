use thiserror::Error;

/// Errors raised while configuring or driving a game.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("word list is empty")]
    EmptyWordList,

    #[error("word list contains '{0}' more than once")]
    DuplicateWord(String),

    #[error("word '{0}' cannot be scrambled (needs at least two distinct letters)")]
    UnshuffleableWord(String),

    #[error("round limit must be at least 1")]
    InvalidRoundLimit,

    #[error("round limit {max_words} exceeds the {available} words available")]
    RoundLimitExceedsWordList { max_words: usize, available: usize },

    #[error("{max_words} rounds of {score_increase} points overflow the score")]
    ScoreOverflow { max_words: usize, score_increase: u32 },

    #[error("no unused word left after {used} rounds")]
    WordListExhausted { used: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;
