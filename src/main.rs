use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io;
use std::process::ExitCode;
use unscramble::cli::parse_cli;
use unscramble::logging::init_logger;
use unscramble::wordbank::resolve_wordbank;
use unscramble::{GameViewModel, game_loop};

fn main() -> ExitCode {
    let cli = parse_cli();
    init_logger(cli.verbose);

    let words = match resolve_wordbank(cli.wordbank_path.as_deref()) {
        Ok(words) => words,
        Err(e) => {
            eprintln!("Failed to load word list: {e}");
            return ExitCode::FAILURE;
        }
    };
    println!("Loaded {} words.", words.len());

    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut view_model = match GameViewModel::new(words, cli.game_config(), rng) {
        Ok(view_model) => view_model,
        Err(e) => {
            eprintln!("Invalid game configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    let stdin = io::stdin();
    if let Err(e) = game_loop(&mut view_model, stdin.lock()) {
        log::error!("Game loop failed: {e}");
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
