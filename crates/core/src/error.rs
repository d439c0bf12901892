//! Error types for chess-tactics-core

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid position notation: {0}")]
    InvalidNotation(String),

    #[error("Rules engine rejected move '{label}' in position {position}")]
    IllegalMove { label: String, position: String },

    #[error("Not a board square: {0}")]
    InvalidSquare(String),

    #[error("PGN parsing error: {0}")]
    Pgn(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
