//! Error types for the fallible edges of the game: terminal I/O,
//! configuration and log setup.  The simulation itself never fails.

use std::io;

use crate::config::ConfigError;

#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Logging setup failed: {0}")]
    Logging(String),
}

pub type GameResult<T> = Result<T, GameError>;
