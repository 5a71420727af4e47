use crate::error::Result;
use crate::game_state::{GameUiState, GameViewModel, GuessOutcome};
use crate::info_log;
use crate::wordbank::GameConfig;
use clap::Parser;
use rand::Rng;
use std::io::BufRead;
use std::path::PathBuf;

/// Unscramble CLI options
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a newline-delimited word list file
    #[arg(short = 'i', long = "input")]
    pub wordbank_path: Option<PathBuf>,

    /// Rounds per game
    #[arg(short = 'n', long = "max-words")]
    pub max_words: Option<usize>,

    /// Points per correct guess
    #[arg(short = 's', long = "score-increase")]
    pub score_increase: Option<u32>,

    /// Seed for a reproducible game
    #[arg(long)]
    pub seed: Option<u64>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Apply the command-line overrides on top of the default limits.
    pub fn game_config(&self) -> GameConfig {
        let defaults = GameConfig::default();
        GameConfig {
            max_no_of_words: self.max_words.unwrap_or(defaults.max_no_of_words),
            score_increase: self.score_increase.unwrap_or(defaults.score_increase),
        }
    }
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

#[derive(Debug, PartialEq, Eq)]
pub enum PlayerInput {
    Guess(String),
    Skip,
    NewGame,
    Exit,
}

fn parse_input(line: &str) -> PlayerInput {
    let input = line.trim();
    match input.to_lowercase().as_str() {
        "exit" => PlayerInput::Exit,
        "skip" => PlayerInput::Skip,
        "next" | "reset" => PlayerInput::NewGame,
        _ => PlayerInput::Guess(input.to_string()),
    }
}

/// Read one line of player input. End of input counts as `Exit`.
pub fn read_input<R: BufRead>(reader: &mut R) -> Result<PlayerInput> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(PlayerInput::Exit);
    }
    Ok(parse_input(&line))
}

pub fn render_state(state: &GameUiState, max_no_of_words: usize) -> String {
    if state.is_game_over {
        return format!(
            "Game over! You scored {} after {} words.\nType 'next' to play again or 'exit' to quit.",
            state.score, state.current_word_count
        );
    }

    let mut out = format!(
        "\nWord {}/{} | Score {}\nUnscramble: {}",
        state.current_word_count, max_no_of_words, state.score, state.current_scrambled_word
    );
    if state.is_guessed_word_wrong {
        out.push_str("\nWrong guess! Try again.");
    }
    out
}

pub fn display_prompt() {
    println!("Enter your guess ('skip' for a new word, 'next' to restart, 'exit' to quit):");
}

pub fn display_game_over_hint() {
    println!("The game is over. Type 'next' to play again or 'exit' to quit.");
}

pub fn display_exit_message() {
    println!("Exiting.");
}

/// Drive a game from line input until the player exits or input ends.
///
/// The loop only calls controller actions; everything shown to the player
/// comes from the state observer registered here.
pub fn game_loop<G: Rng, R: BufRead>(view_model: &mut GameViewModel<G>, mut reader: R) -> Result<()> {
    let max_no_of_words = view_model.config().max_no_of_words;
    let subscription =
        view_model.subscribe(move |state| println!("{}", render_state(state, max_no_of_words)));

    let result = run_commands(view_model, &mut reader);
    view_model.unsubscribe(subscription);
    result
}

fn run_commands<G: Rng, R: BufRead>(view_model: &mut GameViewModel<G>, reader: &mut R) -> Result<()> {
    loop {
        if !view_model.ui_state().is_game_over {
            display_prompt();
        }

        match read_input(reader)? {
            PlayerInput::Exit => {
                display_exit_message();
                return Ok(());
            }
            PlayerInput::NewGame => {
                info_log!("Player requested a new game");
                view_model.reset()?;
            }
            PlayerInput::Skip => {
                if view_model.ui_state().is_game_over {
                    display_game_over_hint();
                } else {
                    view_model.skip_word()?;
                }
            }
            PlayerInput::Guess(guess) => {
                view_model.update_user_guess(guess);
                if view_model.check_user_guess()? == GuessOutcome::GameOver {
                    display_game_over_hint();
                }
            }
        }
    }
}
