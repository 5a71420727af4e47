use crate::error::{GameError, Result};
use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

pub const EMBEDDED_WORDBANK: &str = include_str!("resources/words.txt");

/// Rounds played per game.
pub const MAX_NO_OF_WORDS: usize = 10;

/// Points awarded for each correct guess.
pub const SCORE_INCREASE: u32 = 20;

const CONFIG_DIR_NAME: &str = "unscramble";
const WORDBANK_FILE_NAME: &str = "words.txt";

/// Per-game limits consumed by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub max_no_of_words: usize,
    pub score_increase: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_no_of_words: MAX_NO_OF_WORDS,
            score_increase: SCORE_INCREASE,
        }
    }
}

impl GameConfig {
    /// Rejects round limits the word list cannot serve without repeats, and
    /// increments whose final score would not fit in a `u32`.
    pub fn validate(&self, words: &WordList) -> Result<()> {
        if self.max_no_of_words == 0 {
            return Err(GameError::InvalidRoundLimit);
        }
        if self.max_no_of_words > words.len() {
            return Err(GameError::RoundLimitExceedsWordList {
                max_words: self.max_no_of_words,
                available: words.len(),
            });
        }
        let max_score = u64::from(self.score_increase) * self.max_no_of_words as u64;
        if max_score > u64::from(u32::MAX) {
            return Err(GameError::ScoreOverflow {
                max_words: self.max_no_of_words,
                score_increase: self.score_increase,
            });
        }
        Ok(())
    }
}

/// Immutable, validated list of known words.
///
/// Every word is lowercase, unique, and has at least two distinct
/// characters, so it always has a scrambled form that differs from itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordList {
    words: Vec<String>,
}

impl WordList {
    /// Lowercases every word, then rejects empty lists, duplicates and words
    /// that cannot be scrambled.
    pub fn new(words: Vec<String>) -> Result<Self> {
        let words: Vec<String> = words.into_iter().map(|w| w.to_lowercase()).collect();
        if words.is_empty() {
            return Err(GameError::EmptyWordList);
        }

        let mut seen = HashSet::with_capacity(words.len());
        for word in &words {
            if !is_shuffleable(word) {
                return Err(GameError::UnshuffleableWord(word.clone()));
            }
            if !seen.insert(word.as_str()) {
                return Err(GameError::DuplicateWord(word.clone()));
            }
        }

        Ok(Self { words })
    }

    /// The list compiled into the binary.
    pub fn embedded() -> Result<Self> {
        Self::new(load_wordbank_from_str(EMBEDDED_WORDBANK))
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|w| w == word)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.words
    }
}

fn is_shuffleable(word: &str) -> bool {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => chars.any(|c| c != first),
        None => false,
    }
}

fn normalize_line(line: &str) -> Option<String> {
    let word = line.trim();
    if word.is_empty() || word.starts_with('#') {
        return None;
    }
    Some(word.to_lowercase())
}

pub fn load_wordbank_from_str(data: &str) -> Vec<String> {
    data.lines().filter_map(normalize_line).collect()
}

pub fn load_wordbank_from_file<P: AsRef<Path>>(path: P) -> io::Result<Vec<String>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut words = Vec::new();
    for line in reader.lines() {
        if let Some(word) = normalize_line(&line?) {
            words.push(word);
        }
    }
    Ok(words)
}

/// `<config dir>/unscramble/words.txt`, if the platform has a config dir.
#[must_use]
pub fn default_wordbank_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(WORDBANK_FILE_NAME))
}

/// Resolve the word list: explicit path, then the user config file, then
/// the embedded list.
pub fn resolve_wordbank(explicit: Option<&Path>) -> Result<WordList> {
    if let Some(path) = explicit {
        return WordList::new(load_wordbank_from_file(path)?);
    }

    if let Some(path) = default_wordbank_path()
        && path.is_file()
    {
        crate::info_log!("Loading word list from {}", path.display());
        return WordList::new(load_wordbank_from_file(&path)?);
    }

    WordList::embedded()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| (*w).to_string()).collect()
    }

    #[test]
    fn test_embedded_wordbank_is_valid() {
        let list = WordList::embedded().expect("embedded list should validate");
        assert!(list.len() >= MAX_NO_OF_WORDS);
        assert!(list.contains("animal"));
        assert!(list.iter().all(|w| w == w.to_lowercase()));
    }

    #[test]
    fn test_load_wordbank_from_str_normalizes() {
        // Comments and blank lines are skipped, words are trimmed and lowercased
        let data = "# comment\n  Apple \n\nGRAPE\nlemon\n";
        assert_eq!(
            load_wordbank_from_str(data),
            words(&["apple", "grape", "lemon"])
        );
    }

    #[test]
    fn test_word_list_rejects_empty() {
        assert!(matches!(WordList::new(Vec::new()), Err(GameError::EmptyWordList)));
    }

    #[test]
    fn test_word_list_rejects_duplicates() {
        let result = WordList::new(words(&["apple", "grape", "apple"]));
        match result {
            Err(GameError::DuplicateWord(w)) => assert_eq!(w, "apple"),
            other => panic!("Expected DuplicateWord, got {other:?}"),
        }
    }

    #[test]
    fn test_word_list_duplicates_ignore_case() {
        // "Apple" and "apple" are the same answer to a case-insensitive guess
        let result = WordList::new(words(&["Apple", "grape", "apple"]));
        match result {
            Err(GameError::DuplicateWord(w)) => assert_eq!(w, "apple"),
            other => panic!("Expected DuplicateWord, got {other:?}"),
        }
    }

    #[test]
    fn test_word_list_lowercases_words() {
        let list = WordList::new(words(&["Apple", "GRAPE"])).unwrap();
        assert_eq!(list.as_slice(), &words(&["apple", "grape"])[..]);
        assert!(list.contains("apple"));
        assert!(!list.contains("Apple"));
    }

    #[test]
    fn test_word_list_rejects_single_letter_word() {
        // A single letter has no scrambled form different from itself
        let result = WordList::new(words(&["apple", "a"]));
        assert!(matches!(result, Err(GameError::UnshuffleableWord(w)) if w == "a"));
    }

    #[test]
    fn test_word_list_rejects_repeated_letter_word() {
        // Every permutation of "zzz" is "zzz"
        let result = WordList::new(words(&["apple", "zzz"]));
        assert!(matches!(result, Err(GameError::UnshuffleableWord(w)) if w == "zzz"));
    }

    #[test]
    fn test_config_validation() {
        let list = WordList::new(words(&["apple", "grape"])).unwrap();

        // One round per word is the most a two-word list can serve
        assert!(GameConfig { max_no_of_words: 2, score_increase: 20 }.validate(&list).is_ok());
        assert!(matches!(
            GameConfig { max_no_of_words: 0, score_increase: 20 }.validate(&list),
            Err(GameError::InvalidRoundLimit)
        ));
        assert!(matches!(
            GameConfig { max_no_of_words: 3, score_increase: 20 }.validate(&list),
            Err(GameError::RoundLimitExceedsWordList { max_words: 3, available: 2 })
        ));
    }

    #[test]
    fn test_config_rejects_score_overflow() {
        let list = WordList::new(words(&["apple", "grape"])).unwrap();

        // Two correct guesses worth u32::MAX each cannot fit in the score
        let result = GameConfig { max_no_of_words: 2, score_increase: u32::MAX }.validate(&list);
        assert!(matches!(
            result,
            Err(GameError::ScoreOverflow { max_words: 2, score_increase: u32::MAX })
        ));

        // A single round of u32::MAX still fits exactly
        assert!(GameConfig { max_no_of_words: 1, score_increase: u32::MAX }.validate(&list).is_ok());
        assert!(GameConfig { max_no_of_words: 2, score_increase: u32::MAX / 2 }.validate(&list).is_ok());
    }

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.max_no_of_words, MAX_NO_OF_WORDS);
        assert_eq!(config.score_increase, SCORE_INCREASE);
    }

    #[test]
    fn test_load_wordbank_from_file() {
        let path = std::env::temp_dir().join("unscramble_wordbank_unit_test.txt");
        {
            let mut file = File::create(&path).unwrap();
            writeln!(file, "Puzzle").unwrap();
            writeln!(file, "  riddle  ").unwrap();
        }

        let loaded = load_wordbank_from_file(&path).unwrap();
        assert_eq!(loaded, words(&["puzzle", "riddle"]));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_load_wordbank_from_missing_file() {
        let result = load_wordbank_from_file("/definitely/not/a/real/wordbank.txt");
        assert!(result.is_err());
    }

    #[test]
    fn test_resolve_wordbank_explicit_missing_file_is_io_error() {
        // An explicit path is never silently replaced by the embedded list
        let result = resolve_wordbank(Some(Path::new("/definitely/not/a/real/wordbank.txt")));
        assert!(matches!(result, Err(GameError::Io(_))));
    }
}
