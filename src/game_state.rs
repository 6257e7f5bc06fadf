use crate::error::GameError;
use crate::evaluator::{Letter, LetterStatus, Row, Scoring, evaluate};
use crate::wordbank::WordPicker;
use crate::{debug_log, info_log};
use log::info;
use std::collections::BTreeMap;

pub const DEFAULT_MAX_ATTEMPTS: usize = 6;
pub const MAX_ATTEMPTS_LIMIT: usize = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    Won,
    Lost,
}

/// Per-game settings, fixed once the game is constructed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameSettings {
    pub max_attempts: usize,
    pub scoring: Scoring,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            scoring: Scoring::default(),
        }
    }
}

/// What a single operation did to the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// Nothing changed
    Ignored,
    LetterAdded(char),
    LetterRemoved,
    /// Row evaluated without a win; `attempt` is the new active row index
    Advanced { attempt: usize },
    Won { attempts: usize },
    Lost,
}

/// A key press, already stripped of any frontend-specific encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Backspace,
    Enter,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UserAction {
    Key(Key),
    NewGame,
    Exit,
}

/// The attempt evaluator and game state machine.
///
/// Rows before `active_row` are evaluated and never touched again; rows after
/// it stay empty. Once the status leaves `Playing` every operation is a no-op.
#[derive(Clone, Debug)]
pub struct Game {
    target: String,
    settings: GameSettings,
    status: GameStatus,
    active_row: usize,
    grid: Vec<Row>,
}

impl Game {
    /// Start a game. The target is upper-cased and must be non-empty ASCII letters.
    pub fn new(target: &str, settings: GameSettings) -> Result<Self, GameError> {
        let target = target.trim();
        if target.is_empty() {
            return Err(GameError::EmptyTarget);
        }
        if let Some(c) = target.chars().find(|c| !c.is_ascii_alphabetic()) {
            return Err(GameError::InvalidTargetChar(c));
        }
        if settings.max_attempts == 0 {
            return Err(GameError::ZeroAttempts);
        }
        if settings.max_attempts > MAX_ATTEMPTS_LIMIT {
            return Err(GameError::TooManyAttempts(settings.max_attempts));
        }

        Ok(Self {
            target: target.to_ascii_uppercase(),
            settings,
            status: GameStatus::Playing,
            active_row: 0,
            grid: vec![Row::new(); settings.max_attempts],
        })
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status != GameStatus::Playing
    }

    pub fn active_row_index(&self) -> usize {
        self.active_row
    }

    pub fn active_row(&self) -> &Row {
        &self.grid[self.active_row]
    }

    pub fn grid(&self) -> &[Row] {
        &self.grid
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn word_len(&self) -> usize {
        self.target.len()
    }

    pub fn max_attempts(&self) -> usize {
        self.settings.max_attempts
    }

    pub fn scoring(&self) -> Scoring {
        self.settings.scoring
    }

    /// Number of rows that have been submitted and evaluated.
    pub fn attempts_used(&self) -> usize {
        if self.is_over() {
            self.active_row + 1
        } else {
            self.active_row
        }
    }

    /// Best status seen so far for every guessed letter.
    pub fn letter_hints(&self) -> BTreeMap<char, LetterStatus> {
        let mut hints = BTreeMap::new();
        for letter in self.grid[..self.attempts_used()]
            .iter()
            .flat_map(Row::letters)
        {
            hints
                .entry(letter.value())
                .and_modify(|s: &mut LetterStatus| *s = s.strongest(letter.status()))
                .or_insert(letter.status());
        }
        hints
    }

    pub fn append_letter(&mut self, c: char) -> Transition {
        if !c.is_ascii_alphabetic() || self.is_over() {
            return Transition::Ignored;
        }
        let word_len = self.word_len();
        let row = &mut self.grid[self.active_row];
        if row.len() >= word_len {
            return Transition::Ignored;
        }
        let letter = Letter::new(c);
        row.push(letter);
        Transition::LetterAdded(letter.value())
    }

    pub fn delete_letter(&mut self) -> Transition {
        if self.is_over() {
            return Transition::Ignored;
        }
        match self.grid[self.active_row].pop() {
            Some(_) => Transition::LetterRemoved,
            None => Transition::Ignored,
        }
    }

    pub fn submit_attempt(&mut self) -> Transition {
        if self.is_over() || self.active_row().len() != self.word_len() {
            return Transition::Ignored;
        }

        let evaluated = evaluate(self.active_row(), &self.target, self.settings.scoring);
        let correct = evaluated.count(LetterStatus::Correct);
        debug_log!(
            "submit_attempt() - row {} '{}' scored {} correct",
            self.active_row,
            evaluated.word(),
            correct
        );
        self.grid[self.active_row] = evaluated;

        if correct == self.word_len() {
            self.status = GameStatus::Won;
            Transition::Won {
                attempts: self.active_row + 1,
            }
        } else if self.active_row == self.settings.max_attempts - 1 {
            self.status = GameStatus::Lost;
            Transition::Lost
        } else {
            self.active_row += 1;
            Transition::Advanced {
                attempt: self.active_row,
            }
        }
    }

    /// Route a key press to the matching operation.
    pub fn handle_key(&mut self, key: Key) -> Transition {
        match key {
            Key::Char(c) => self.append_letter(c),
            Key::Backspace => self.delete_letter(),
            Key::Enter => self.submit_attempt(),
        }
    }
}

/// A frontend able to show a game and collect the player's input.
pub trait GameInterface {
    fn display_new_game(&mut self, game: &Game);
    /// Returns `None` when no action is available yet.
    fn read_action(&mut self, game: &Game) -> Option<UserAction>;
    fn display_transition(&mut self, game: &Game, key: Key, transition: Transition);
    fn display_exit_message(&mut self);
}

/// Drive games from `interface` until the player exits.
///
/// Each new game takes the next word from `picker`.
pub fn game_loop<I: GameInterface + ?Sized>(
    picker: &mut WordPicker,
    settings: GameSettings,
    interface: &mut I,
) -> Result<(), GameError> {
    let mut game = start_game(picker.current(), settings)?;
    interface.display_new_game(&game);

    loop {
        let Some(action) = interface.read_action(&game) else {
            continue;
        };

        match action {
            UserAction::Exit => {
                info!("Player exited");
                interface.display_exit_message();
                return Ok(());
            }
            UserAction::NewGame => {
                game = start_game(picker.advance(), settings)?;
                interface.display_new_game(&game);
            }
            UserAction::Key(key) => {
                let transition = game.handle_key(key);
                info_log!("game_loop() - {:?} -> {:?}", key, transition);
                match transition {
                    Transition::Won { attempts } => info!("Game won in {attempts} attempt(s)"),
                    Transition::Lost => info!("Game lost, word was {}", game.target()),
                    _ => {}
                }
                interface.display_transition(&game, key, transition);
            }
        }
    }
}

fn start_game(target: &str, settings: GameSettings) -> Result<Game, GameError> {
    let game = Game::new(target, settings)?;
    info!(
        "Starting game: {} letters, {} attempts, {:?} scoring",
        game.word_len(),
        game.max_attempts(),
        game.scoring()
    );
    Ok(game)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apple() -> Game {
        Game::new("APPLE", GameSettings::default()).unwrap()
    }

    fn type_word(game: &mut Game, word: &str) {
        for c in word.chars() {
            game.append_letter(c);
        }
    }

    fn guess(game: &mut Game, word: &str) -> Transition {
        type_word(game, word);
        game.submit_attempt()
    }

    #[test]
    fn test_new_game_starts_playing_with_empty_grid() {
        let game = apple();
        assert_eq!(game.status(), GameStatus::Playing);
        assert_eq!(game.active_row_index(), 0);
        assert_eq!(game.grid().len(), DEFAULT_MAX_ATTEMPTS);
        assert!(game.grid().iter().all(Row::is_empty));
        assert_eq!(game.word_len(), 5);
        assert_eq!(game.attempts_used(), 0);
    }

    #[test]
    fn test_new_game_rejects_bad_config() {
        assert!(matches!(
            Game::new("", GameSettings::default()),
            Err(GameError::EmptyTarget)
        ));
        assert!(matches!(
            Game::new("AP9LE", GameSettings::default()),
            Err(GameError::InvalidTargetChar('9'))
        ));
        let settings = GameSettings {
            max_attempts: 0,
            ..GameSettings::default()
        };
        assert!(matches!(
            Game::new("APPLE", settings),
            Err(GameError::ZeroAttempts)
        ));
    }

    #[test]
    fn test_new_game_rejects_huge_attempt_count() {
        for max_attempts in [MAX_ATTEMPTS_LIMIT + 1, 1_000_000_000, usize::MAX] {
            let settings = GameSettings {
                max_attempts,
                ..GameSettings::default()
            };
            assert!(matches!(
                Game::new("APPLE", settings),
                Err(GameError::TooManyAttempts(n)) if n == max_attempts
            ));
        }
        let settings = GameSettings {
            max_attempts: MAX_ATTEMPTS_LIMIT,
            ..GameSettings::default()
        };
        assert_eq!(Game::new("APPLE", settings).unwrap().grid().len(), MAX_ATTEMPTS_LIMIT);
    }

    #[test]
    fn test_target_is_case_insensitive() {
        let mut game = Game::new("apple", GameSettings::default()).unwrap();
        assert_eq!(game.target(), "APPLE");
        assert_eq!(guess(&mut game, "aPpLe"), Transition::Won { attempts: 1 });
    }

    #[test]
    fn test_winning_guess() {
        let mut game = apple();
        assert_eq!(guess(&mut game, "APPLE"), Transition::Won { attempts: 1 });
        assert_eq!(game.status(), GameStatus::Won);
        assert_eq!(game.grid()[0].count(LetterStatus::Correct), 5);
        assert_eq!(game.attempts_used(), 1);
    }

    #[test]
    fn test_non_winning_guess_advances() {
        let mut game = apple();
        assert_eq!(guess(&mut game, "PAPER"), Transition::Advanced { attempt: 1 });
        assert_eq!(game.status(), GameStatus::Playing);
        assert_eq!(game.active_row_index(), 1);
        let statuses: Vec<_> = game.grid()[0].letters().iter().map(|l| l.status()).collect();
        assert_eq!(
            statuses,
            vec![
                LetterStatus::Present,
                LetterStatus::Present,
                LetterStatus::Correct,
                LetterStatus::Present,
                LetterStatus::Absent,
            ]
        );
    }

    #[test]
    fn test_lost_exactly_after_last_attempt() {
        let mut game = apple();
        for attempt in 1..DEFAULT_MAX_ATTEMPTS {
            assert_eq!(guess(&mut game, "ZZZZZ"), Transition::Advanced { attempt });
            assert_eq!(game.status(), GameStatus::Playing);
        }
        assert_eq!(guess(&mut game, "ZZZZZ"), Transition::Lost);
        assert_eq!(game.status(), GameStatus::Lost);
        assert_eq!(game.active_row_index(), DEFAULT_MAX_ATTEMPTS - 1);
        assert_eq!(game.attempts_used(), DEFAULT_MAX_ATTEMPTS);
        assert_eq!(
            game.grid()[DEFAULT_MAX_ATTEMPTS - 1].count(LetterStatus::Absent),
            5
        );
    }

    #[test]
    fn test_win_on_last_attempt() {
        let settings = GameSettings {
            max_attempts: 2,
            ..GameSettings::default()
        };
        let mut game = Game::new("APPLE", settings).unwrap();
        guess(&mut game, "CRANE");
        assert_eq!(guess(&mut game, "APPLE"), Transition::Won { attempts: 2 });
        assert_eq!(game.status(), GameStatus::Won);
    }

    #[test]
    fn test_single_attempt_game_is_lost_after_one_miss() {
        let settings = GameSettings {
            max_attempts: 1,
            ..GameSettings::default()
        };
        let mut game = Game::new("APPLE", settings).unwrap();
        assert_eq!(guess(&mut game, "CRANE"), Transition::Lost);

        let grid = game.grid().to_vec();
        for key in [Key::Char('A'), Key::Backspace, Key::Enter] {
            assert_eq!(game.handle_key(key), Transition::Ignored);
        }
        assert_eq!(game.grid(), grid.as_slice());
        assert_eq!(game.status(), GameStatus::Lost);
        assert_eq!(game.active_row_index(), 0);
    }

    #[test]
    fn test_short_row_cannot_be_submitted() {
        let mut game = apple();
        type_word(&mut game, "APP");
        assert_eq!(game.submit_attempt(), Transition::Ignored);
        assert_eq!(game.status(), GameStatus::Playing);
        assert_eq!(game.active_row_index(), 0);
        assert_eq!(game.active_row().word(), "APP");
        assert!(
            game.active_row()
                .letters()
                .iter()
                .all(|l| l.status() == LetterStatus::Unknown)
        );
    }

    #[test]
    fn test_extra_letters_ignored() {
        let mut game = apple();
        type_word(&mut game, "APPLE");
        assert_eq!(game.append_letter('S'), Transition::Ignored);
        assert_eq!(game.active_row().len(), 5);
    }

    #[test]
    fn test_non_alphabetic_input_ignored() {
        let mut game = apple();
        for c in ['1', ' ', '-', 'é', '\n'] {
            assert_eq!(game.append_letter(c), Transition::Ignored);
        }
        assert!(game.active_row().is_empty());
        assert_eq!(game.append_letter('a'), Transition::LetterAdded('A'));
    }

    #[test]
    fn test_delete_on_empty_row_leaves_grid_unchanged() {
        let mut game = apple();
        let before = game.grid().to_vec();
        assert_eq!(game.delete_letter(), Transition::Ignored);
        assert_eq!(game.grid(), before.as_slice());
    }

    #[test]
    fn test_delete_removes_last_letter_of_active_row_only() {
        let mut game = apple();
        guess(&mut game, "CRANE");
        type_word(&mut game, "AP");
        assert_eq!(game.delete_letter(), Transition::LetterRemoved);
        assert_eq!(game.active_row().word(), "A");
        assert_eq!(game.grid()[0].word(), "CRANE");

        // an evaluated row is out of reach once the active row is empty
        game.delete_letter();
        assert_eq!(game.delete_letter(), Transition::Ignored);
        assert_eq!(game.grid()[0].word(), "CRANE");
    }

    #[test]
    fn test_finished_game_ignores_input() {
        let mut game = apple();
        guess(&mut game, "APPLE");
        let grid = game.grid().to_vec();

        for key in [Key::Char('X'), Key::Backspace, Key::Enter] {
            assert_eq!(game.handle_key(key), Transition::Ignored);
        }
        assert_eq!(game.grid(), grid.as_slice());
        assert_eq!(game.status(), GameStatus::Won);
    }

    #[test]
    fn test_rows_after_active_row_stay_empty() {
        let mut game = apple();
        guess(&mut game, "CRANE");
        type_word(&mut game, "PL");
        assert!(game.grid()[2..].iter().all(Row::is_empty));
    }

    #[test]
    fn test_handle_key_dispatch() {
        let mut game = apple();
        assert_eq!(game.handle_key(Key::Char('p')), Transition::LetterAdded('P'));
        assert_eq!(game.handle_key(Key::Backspace), Transition::LetterRemoved);
        assert_eq!(game.handle_key(Key::Enter), Transition::Ignored);
    }

    #[test]
    fn test_letter_hints_keep_strongest_status() {
        let mut game = apple();
        guess(&mut game, "PAPER");
        guess(&mut game, "ALOUD");
        type_word(&mut game, "XY");

        let hints = game.letter_hints();
        assert_eq!(hints.get(&'P'), Some(&LetterStatus::Correct));
        assert_eq!(hints.get(&'A'), Some(&LetterStatus::Correct));
        assert_eq!(hints.get(&'E'), Some(&LetterStatus::Present));
        assert_eq!(hints.get(&'R'), Some(&LetterStatus::Absent));
        assert_eq!(hints.get(&'L'), Some(&LetterStatus::Present));
        // typed but not submitted
        assert_eq!(hints.get(&'X'), None);
    }

    #[test]
    fn test_classic_scoring_setting_is_used() {
        let settings = GameSettings {
            scoring: Scoring::Classic,
            ..GameSettings::default()
        };
        let mut game = Game::new("APPLE", settings).unwrap();
        guess(&mut game, "PPPPP");
        assert_eq!(game.grid()[0].count(LetterStatus::Correct), 2);
        assert_eq!(game.grid()[0].count(LetterStatus::Present), 0);
    }
}
