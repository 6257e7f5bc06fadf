use crate::error::GameError;
use crate::evaluator::{LetterStatus, Row, Scoring};
use crate::game_state::{
    DEFAULT_MAX_ATTEMPTS, Game, GameInterface, MAX_ATTEMPTS_LIMIT, GameSettings, Key, Transition, UserAction,
};
use crate::wordbank::{
    DEFAULT_WORD_LENGTH, EMBEDDED_WORDBANK, WordPicker, load_wordbank_from_file,
    load_wordbank_from_str,
};
use chrono::NaiveDate;
use clap::Parser;
use std::collections::VecDeque;
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// Guess the hidden word
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Play this word instead of one from the word bank
    #[arg(short, long)]
    pub word: Option<String>,

    /// Path to a newline-delimited word bank file
    #[arg(short = 'i', long = "input")]
    pub wordbank_path: Option<PathBuf>,

    /// Word length used when filtering the word bank
    #[arg(short, long, default_value_t = DEFAULT_WORD_LENGTH)]
    pub length: usize,

    /// Number of attempts per game
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_MAX_ATTEMPTS,
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new()
            .range(1..=MAX_ATTEMPTS_LIMIT as u64)
    )]
    pub max_attempts: usize,

    /// How repeated letters are scored
    #[arg(short, long, value_enum, default_value_t)]
    pub scoring: Scoring,

    /// Line-based play on stdin/stdout instead of the full-screen UI
    #[arg(long)]
    pub plain: bool,

    /// Write the log here instead of the cache directory
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

impl Cli {
    pub fn settings(&self) -> GameSettings {
        GameSettings {
            max_attempts: self.max_attempts,
            scoring: self.scoring,
        }
    }

    /// Build the word source: a fixed word, or the word bank starting at `today`.
    pub fn word_picker(&self, today: NaiveDate) -> Result<WordPicker, GameError> {
        if let Some(word) = &self.word {
            return Ok(WordPicker::fixed(word));
        }
        let words = match &self.wordbank_path {
            Some(path) => load_wordbank_from_file(path, self.length)?,
            None => load_wordbank_from_str(EMBEDDED_WORDBANK, self.length),
        };
        WordPicker::daily(words, today)
    }
}

/// Render an evaluated row as `[A]` correct, `(A)` present, ` A ` absent.
pub fn format_row(row: &Row) -> String {
    row.letters()
        .iter()
        .map(|letter| {
            let c = letter.value();
            match letter.status() {
                LetterStatus::Correct => format!("[{c}]"),
                LetterStatus::Present => format!("({c})"),
                LetterStatus::Absent | LetterStatus::Unknown => format!(" {c} "),
            }
        })
        .collect()
}

fn format_hints(game: &Game) -> String {
    let hints = game.letter_hints();
    let absent: String = hints
        .iter()
        .filter(|(_, s)| **s == LetterStatus::Absent)
        .map(|(c, _)| *c)
        .collect();
    if absent.is_empty() {
        String::new()
    } else {
        format!("Not in word: {absent}")
    }
}

/// Line-based frontend. Each line is typed as letters followed by Enter.
pub struct CliInterface<R: BufRead, W: Write> {
    reader: R,
    writer: W,
    pending: VecDeque<UserAction>,
}

impl<R: BufRead, W: Write> CliInterface<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            pending: VecDeque::new(),
        }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    // Output failures are not actionable mid-game
    fn say(&mut self, text: &str) {
        let _ = writeln!(self.writer, "{text}");
    }

    fn prompt(&mut self, game: &Game) {
        if game.is_over() {
            self.say("\nType 'new' for another word or 'exit' to quit:");
        } else {
            let text = format!(
                "\nAttempt {}/{} - enter a {}-letter guess ('exit' to quit, 'new' for a new word):",
                game.active_row_index() + 1,
                game.max_attempts(),
                game.word_len()
            );
            self.say(&text);
        }
    }

    fn queue_line(&mut self, line: &str) {
        match line.to_ascii_lowercase().as_str() {
            "exit" => self.pending.push_back(UserAction::Exit),
            "new" | "next" => self.pending.push_back(UserAction::NewGame),
            _ => {
                self.pending
                    .extend(line.chars().map(|c| UserAction::Key(Key::Char(c))));
                self.pending.push_back(UserAction::Key(Key::Enter));
            }
        }
    }
}

impl<R: BufRead, W: Write> GameInterface for CliInterface<R, W> {
    fn display_new_game(&mut self, game: &Game) {
        let text = format!(
            "New game: guess the {}-letter word in {} attempts.",
            game.word_len(),
            game.max_attempts()
        );
        self.say(&text);
    }

    fn read_action(&mut self, game: &Game) -> Option<UserAction> {
        if let Some(action) = self.pending.pop_front() {
            return Some(action);
        }

        self.prompt(game);
        let mut input = String::new();
        match self.reader.read_line(&mut input) {
            Ok(0) => return Some(UserAction::Exit),
            Ok(_) => {}
            Err(e) => {
                log::warn!("Cannot read input, ending session: {e}");
                let text = format!("Cannot read input ({e}). Exiting.");
                self.say(&text);
                return Some(UserAction::Exit);
            }
        }
        let line = input.trim();
        if line.is_empty() {
            return None;
        }
        self.queue_line(line);
        self.pending.pop_front()
    }

    fn display_transition(&mut self, game: &Game, key: Key, transition: Transition) {
        match transition {
            Transition::Ignored if key == Key::Enter && !game.is_over() => {
                let text = format!("Not enough letters. Enter {} letters.", game.word_len());
                self.say(&text);
                // Clear the partial row so the next line starts fresh
                let typed = game.active_row().len();
                for _ in 0..typed {
                    self.pending.push_front(UserAction::Key(Key::Backspace));
                }
            }
            Transition::Ignored if key == Key::Enter => {
                self.say("The game is over.");
            }
            Transition::Advanced { attempt } => {
                let row = format_row(&game.grid()[attempt - 1]);
                self.say(&row);
                let hints = format_hints(game);
                if !hints.is_empty() {
                    self.say(&hints);
                }
            }
            Transition::Won { attempts } => {
                let row = format_row(&game.grid()[attempts - 1]);
                self.say(&row);
                let text = format!("You won in {attempts}/{}!", game.max_attempts());
                self.say(&text);
            }
            Transition::Lost => {
                let row = format_row(&game.grid()[game.active_row_index()]);
                self.say(&row);
                let text = format!("Out of attempts. The word was {}.", game.target());
                self.say(&text);
            }
            _ => {}
        }
    }

    fn display_exit_message(&mut self) {
        self.say("Exiting.");
    }
}
