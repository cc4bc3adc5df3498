//! Error types for the simulation.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("World dimensions must be positive, got {rows}x{cols}")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("Rule '{rule}' does not support cell type {cell}")]
    UnsupportedCellType { rule: String, cell: &'static str },

    #[error("Unknown rule: {0}")]
    UnknownRule(String),

    #[error("Unknown pattern: {0}")]
    UnknownPattern(String),

    #[error("Internal error: gathered {found} neighbors, expected {expected}")]
    NeighborhoodSize { expected: usize, found: usize },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
