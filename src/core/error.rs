use std::fmt;
use thiserror::Error;

/// What a validated piece of user input names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Item,
    TeamName,
}

impl InputKind {
    fn with_article(self) -> &'static str {
        match self {
            InputKind::Item => "an item",
            InputKind::TeamName => "a team name",
        }
    }
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputKind::Item => write!(f, "Item"),
            InputKind::TeamName => write!(f, "Team name"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PickerError {
    #[error("Please enter {}", .kind.with_article())]
    EmptyInput { kind: InputKind },

    #[error("{kind} must be {max} characters or less")]
    InputTooLong { kind: InputKind, max: usize },

    #[error("Add some items first!")]
    NoItemsAvailable,

    #[error("Cannot delete the last team!")]
    CannotDeleteLastTeam,

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Codec error: {0}")]
    Codec(String),

    #[error("Lock error: {0}")]
    LockError(String),
}

pub type Result<T> = std::result::Result<T, PickerError>;

impl<T> From<std::sync::PoisonError<T>> for PickerError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        Self::LockError(err.to_string())
    }
}

impl From<serde_json::Error> for PickerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Codec(err.to_string())
    }
}
