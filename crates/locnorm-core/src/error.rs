//! Error types for locnorm.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("No valid North American locations for brand '{brand}'")]
    EmptyResult { brand: String },

    #[error("Reference data error: {0}")]
    Reference(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(String),
}

pub type Result<T> = std::result::Result<T, Error>;
