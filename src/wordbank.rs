use crate::error::GameError;
use chrono::NaiveDate;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

pub const EMBEDDED_WORDBANK: &str = include_str!("resources/wordbank.txt");
pub const DEFAULT_WORD_LENGTH: usize = 5;

fn normalize(line: &str, word_len: usize) -> Option<String> {
    let word = line.trim().to_ascii_uppercase();
    (word.len() == word_len && word.chars().all(|c| c.is_ascii_alphabetic())).then_some(word)
}

fn dedup(words: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    words.filter(|w| seen.insert(w.clone())).collect()
}

pub fn load_wordbank_from_str(data: &str, word_len: usize) -> Vec<String> {
    dedup(data.lines().filter_map(|line| normalize(line, word_len)))
}

pub fn load_wordbank_from_file<P: AsRef<Path>>(
    path: P,
    word_len: usize,
) -> Result<Vec<String>, GameError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut words = Vec::new();
    for line in reader.lines() {
        if let Some(word) = normalize(&line?, word_len) {
            words.push(word);
        }
    }
    Ok(dedup(words.into_iter()))
}

/// Hands out target words, one per game.
#[derive(Clone, Debug)]
pub struct WordPicker {
    words: Vec<String>,
    index: usize,
}

impl WordPicker {
    /// Every game uses the same word.
    pub fn fixed(word: &str) -> Self {
        Self {
            words: vec![word.trim().to_ascii_uppercase()],
            index: 0,
        }
    }

    /// Start at the word of the day for `date`, counting days from 2021-06-19.
    pub fn daily(words: Vec<String>, date: NaiveDate) -> Result<Self, GameError> {
        if words.is_empty() {
            return Err(GameError::EmptyWordBank);
        }
        let epoch = NaiveDate::from_ymd_opt(2021, 6, 19).unwrap_or(NaiveDate::MIN);
        let days = (date - epoch).num_days();
        let index = days.rem_euclid(words.len() as i64) as usize;
        Ok(Self { words, index })
    }

    pub fn current(&self) -> &str {
        &self.words[self.index]
    }

    /// Move to the next word, wrapping around the bank.
    pub fn advance(&mut self) -> &str {
        self.index = (self.index + 1) % self.words.len();
        self.current()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
