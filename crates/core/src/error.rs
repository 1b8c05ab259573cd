use thiserror::Error;

#[derive(Error, Debug)]
pub enum PatternError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Scan cancelled")]
    Cancelled,

    #[error("Unresolved reference: {0}")]
    Unresolved(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, PatternError>;
