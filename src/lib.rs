// Library interface for unscramble
// This allows integration tests to access internal modules

pub mod cli;
pub mod error;
pub mod game_state;
pub mod logging;
pub mod wordbank;

// Re-export commonly used items for easier testing
pub use cli::game_loop;
pub use error::{GameError, Result};
pub use game_state::{GameUiState, GameViewModel, GuessOutcome, SubscriptionId, shuffle_word};
pub use wordbank::{
    GameConfig, MAX_NO_OF_WORDS, SCORE_INCREASE, WordList, load_wordbank_from_file,
    load_wordbank_from_str,
};
