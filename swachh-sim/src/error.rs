//! Error types for SwachhSim

use thiserror::Error;

/// SwachhSim error type
#[derive(Error, Debug)]
pub enum SwachhError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("World setup error: {0}")]
    Setup(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for SwachhError {
    fn from(e: toml::de::Error) -> Self {
        SwachhError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SwachhError>;
