// ABOUTME: Error types for the slide-deck library
// ABOUTME: Provides structured error handling for editing, navigation and persistence

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeckError {
    #[error("Failed to access file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to (de)serialize deck: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("A deck must contain at least one slide")]
    EmptyDeck,

    #[error("Slide not found: {0}")]
    SlideNotFound(String),

    #[error("Index {index} is out of range for a deck of {len} slides")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Persistence backend error: {0}")]
    Backend(String),

    #[error("Markdown import error: {0}")]
    Import(String),

    #[error("Invalid color value: {0}")]
    InvalidColor(String),

    #[error("Fullscreen request failed: {0}")]
    Fullscreen(String),

    #[error("Path not found: {0}")]
    PathNotFoundError(PathBuf),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Input validation error: {0}")]
    ValidationError(String),

    #[error("Unknown error: {0}")]
    UnknownError(String),
}

impl From<anyhow::Error> for DeckError {
    fn from(err: anyhow::Error) -> Self {
        DeckError::UnknownError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DeckError>;
