//! Error types for Fathom

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),
}

impl Error {
    /// Whether this error was caused by bad caller input (as opposed to I/O or config)
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
