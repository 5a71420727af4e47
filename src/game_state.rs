//! Game state controller for the unscramble game.
//!
//! `GameViewModel` owns one game: the active word, the words already played,
//! the player's in-progress guess, and the published [`GameUiState`]. Hosts
//! read the state through [`GameViewModel::subscribe`] or
//! [`GameViewModel::ui_state`] and drive the game with the four actions.
//!
//! # State Machine
//! - `reset` → round 1 of `max_no_of_words`
//! - correct guess or skip → next round, or game over once every round has
//!   been played
//! - wrong guess → same round with `is_guessed_word_wrong` set
//! - game over is terminal until the next `reset`

use crate::error::{GameError, Result};
use crate::wordbank::{GameConfig, WordList};
use crate::{debug_log, info_log};
use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::collections::HashSet;

const MAX_SHUFFLE_ATTEMPTS: usize = 64;

/// Snapshot of everything a host needs to draw the game.
///
/// Replaced wholesale on every transition, never patched in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameUiState {
    pub current_scrambled_word: String,
    pub is_guessed_word_wrong: bool,
    pub score: u32,
    pub current_word_count: usize,
    pub is_game_over: bool,
}

impl Default for GameUiState {
    fn default() -> Self {
        Self {
            current_scrambled_word: String::new(),
            is_guessed_word_wrong: false,
            score: 0,
            current_word_count: 1,
            is_game_over: false,
        }
    }
}

/// What `check_user_guess` did with the pending guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    Correct,
    Wrong,
    /// The game had already ended; nothing changed.
    GameOver,
}

/// Handle returned by [`GameViewModel::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(&GameUiState)>;

pub struct GameViewModel<R: Rng = StdRng> {
    ui_state: GameUiState,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
    current_word: String,
    used_words: HashSet<String>,
    user_guess: String,
    words: WordList,
    config: GameConfig,
    rng: R,
}

impl<R: Rng> std::fmt::Debug for GameViewModel<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameViewModel")
            .field("ui_state", &self.ui_state)
            .field("observers", &self.observers.len())
            .field("used_words", &self.used_words.len())
            .field("user_guess", &self.user_guess)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<R: Rng> GameViewModel<R> {
    /// Validate the configuration against the word list and start a game.
    pub fn new(words: WordList, config: GameConfig, rng: R) -> Result<Self> {
        config.validate(&words)?;

        let mut view_model = Self {
            ui_state: GameUiState::default(),
            observers: Vec::new(),
            next_subscription: 0,
            current_word: String::new(),
            used_words: HashSet::with_capacity(config.max_no_of_words),
            user_guess: String::new(),
            words,
            config,
            rng,
        };
        view_model.reset()?;
        Ok(view_model)
    }

    pub fn ui_state(&self) -> &GameUiState {
        &self.ui_state
    }

    pub fn user_guess(&self) -> &str {
        &self.user_guess
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn word_list(&self) -> &WordList {
        &self.words
    }

    /// Register an observer. It receives the current state immediately and
    /// every state published afterwards.
    pub fn subscribe<F>(&mut self, mut observer: F) -> SubscriptionId
    where
        F: FnMut(&GameUiState) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        observer(&self.ui_state);
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Returns `false` if the id was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    /// Start a new game: forget played words and publish round 1.
    pub fn reset(&mut self) -> Result<()> {
        self.used_words.clear();
        let scrambled = self.pick_random_word_and_shuffle()?;
        info_log!("Game reset, {} rounds", self.config.max_no_of_words);
        self.publish(GameUiState {
            current_scrambled_word: scrambled,
            ..GameUiState::default()
        });
        Ok(())
    }

    pub fn update_user_guess(&mut self, guessed_word: impl Into<String>) {
        self.user_guess = guessed_word.into();
        debug_log!("User guess updated: {:?}", self.user_guess);
    }

    /// Score the pending guess against the active word, then clear it.
    pub fn check_user_guess(&mut self) -> Result<GuessOutcome> {
        let outcome = self.evaluate_guess();
        self.update_user_guess("");
        outcome
    }

    /// Move to the next round without scoring.
    pub fn skip_word(&mut self) -> Result<()> {
        let result = if self.ui_state.is_game_over {
            debug_log!("Skip ignored, game is over");
            Ok(())
        } else {
            info_log!("Word skipped in round {}", self.ui_state.current_word_count);
            self.update_game_state(self.ui_state.score)
        };
        self.update_user_guess("");
        result
    }

    fn evaluate_guess(&mut self) -> Result<GuessOutcome> {
        if self.ui_state.is_game_over {
            debug_log!("Guess ignored, game is over");
            return Ok(GuessOutcome::GameOver);
        }

        if self.user_guess.to_lowercase() == self.current_word.to_lowercase() {
            let updated_score = self.ui_state.score + self.config.score_increase;
            info_log!("Correct guess, score {}", updated_score);
            self.update_game_state(updated_score)?;
            Ok(GuessOutcome::Correct)
        } else {
            debug_log!("Wrong guess in round {}", self.ui_state.current_word_count);
            self.publish(GameUiState {
                is_guessed_word_wrong: true,
                ..self.ui_state.clone()
            });
            Ok(GuessOutcome::Wrong)
        }
    }

    /// Single place that advances the round counter or ends the game.
    fn update_game_state(&mut self, updated_score: u32) -> Result<()> {
        if self.used_words.len() == self.config.max_no_of_words {
            info_log!("Game over, final score {}", updated_score);
            self.publish(GameUiState {
                is_guessed_word_wrong: false,
                score: updated_score,
                is_game_over: true,
                ..self.ui_state.clone()
            });
        } else {
            let scrambled = self.pick_random_word_and_shuffle()?;
            self.publish(GameUiState {
                current_scrambled_word: scrambled,
                is_guessed_word_wrong: false,
                score: updated_score,
                current_word_count: self.ui_state.current_word_count + 1,
                is_game_over: false,
            });
        }
        Ok(())
    }

    fn pick_random_word_and_shuffle(&mut self) -> Result<String> {
        let unused: Vec<&String> = self
            .words
            .as_slice()
            .iter()
            .filter(|word| !self.used_words.contains(word.as_str()))
            .collect();

        let word = unused
            .choose(&mut self.rng)
            .map(|word| (*word).clone())
            .ok_or(GameError::WordListExhausted {
                used: self.used_words.len(),
            })?;

        self.used_words.insert(word.clone());
        let scrambled = shuffle_word(&word, &mut self.rng);
        debug_log!("Picked word #{}: {} -> {}", self.used_words.len(), word, scrambled);
        self.current_word = word;
        Ok(scrambled)
    }

    fn publish(&mut self, state: GameUiState) {
        self.ui_state = state;
        for (_, observer) in &mut self.observers {
            observer(&self.ui_state);
        }
    }
}

/// Random permutation of `word` that differs from it.
///
/// Falls back to a one-character rotation when the shuffles keep landing on
/// the input word; the rotation differs for any word with two distinct letters.
pub fn shuffle_word<R: Rng + ?Sized>(word: &str, rng: &mut R) -> String {
    scramble_with(word, |letters| letters.shuffle(rng))
}

fn scramble_with<F>(word: &str, mut shuffle: F) -> String
where
    F: FnMut(&mut [char]),
{
    let mut letters: Vec<char> = word.chars().collect();
    for _ in 0..MAX_SHUFFLE_ATTEMPTS {
        shuffle(letters.as_mut_slice());
        let candidate: String = letters.iter().collect();
        if candidate != word {
            return candidate;
        }
    }

    let mut rotated: Vec<char> = word.chars().collect();
    if !rotated.is_empty() {
        rotated.rotate_left(1);
    }
    rotated.into_iter().collect()
}
