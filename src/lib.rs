// Library interface for wordle-game
// The binary and the integration tests both build on these modules

pub mod cli;
pub mod error;
pub mod evaluator;
pub mod game_state;
pub mod logging;
pub mod tui;
pub mod wordbank;

pub use error::GameError;
pub use evaluator::{Letter, LetterStatus, Row, Scoring, evaluate};
pub use game_state::{
    Game, GameInterface, GameSettings, GameStatus, Key, Transition, UserAction, game_loop,
};
pub use wordbank::{WordPicker, load_wordbank_from_file, load_wordbank_from_str};
