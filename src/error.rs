use std::fmt;
use std::io;

#[derive(Debug)]
pub enum GameError {
    EmptyTarget,
    InvalidTargetChar(char),
    ZeroAttempts,
    TooManyAttempts(usize),
    EmptyWordBank,
    Io(io::Error),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::EmptyTarget => write!(f, "target word is empty"),
            GameError::InvalidTargetChar(c) => {
                write!(f, "target word may only contain letters ('{c}' is not a letter)")
            }
            GameError::ZeroAttempts => write!(f, "at least one attempt is required"),
            GameError::TooManyAttempts(n) => write!(
                f,
                "{n} attempts requested, at most {} are allowed",
                crate::game_state::MAX_ATTEMPTS_LIMIT
            ),
            GameError::EmptyWordBank => write!(f, "word bank contains no usable words"),
            GameError::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for GameError {
    fn from(e: io::Error) -> Self {
        GameError::Io(e)
    }
}
