//! Error types for GEX analysis

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GexError {
    /// Structurally unusable snapshot: missing `data` container or no records
    #[error("Invalid input format: {0}")]
    InvalidInputFormat(String),

    /// No exposure rows to derive key levels from
    #[error("Insufficient data: no exposure rows to analyze")]
    InsufficientData,

    #[error("Data error: {0}")]
    Data(String),

    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type GexResult<T> = Result<T, GexError>;

impl GexError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInputFormat(msg.into())
    }

    pub fn data(msg: impl Into<String>) -> Self {
        Self::Data(msg.into())
    }

    /// Whether the run may still complete with an empty result
    pub fn is_recoverable(&self) -> bool {
        matches!(self, GexError::InsufficientData)
    }
}

impl From<serde_json::Error> for GexError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}
