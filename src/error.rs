//! Error type shared by the engine, the stores and the terminal session.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::combat::types::Tier;
use crate::items::ItemKind;

#[derive(Error, Debug)]
pub enum GameError {
    /// Malformed input data (question record, save field). Recovered by
    /// substituting defaults or skipping the record.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A file could not be read or written.
    #[error("Could not access {}: {source}", .path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Empty or unparseable user input.
    #[error("Invalid input: {0}")]
    Input(String),

    #[error("Not enough gold: need {needed}, have {have}")]
    NotEnoughGold { needed: u32, have: u32 },

    #[error("You don't have a {}", .0.info().name)]
    ItemNotOwned(ItemKind),

    #[error("No questions available for {0} battles")]
    NoQuestions(Tier),

    #[error("The battle is already over")]
    BattleOver,

    #[error("The battle is still in progress")]
    BattleInProgress,
}

impl GameError {
    pub fn persistence(path: impl Into<PathBuf>, source: io::Error) -> Self {
        GameError::Persistence {
            path: path.into(),
            source,
        }
    }

    /// Errors the session reports as a warning and then keeps playing.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, GameError::BattleOver | GameError::BattleInProgress)
    }
}

pub type Result<T> = std::result::Result<T, GameError>;
