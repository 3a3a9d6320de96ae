use thiserror::Error;

#[derive(Error, Debug)]
pub enum PosyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request failed with status: {0}")]
    Status(reqwest::StatusCode),

    #[error("Year out of range: {0}")]
    InvalidYear(i32),

    #[error("Unknown mood: {0}")]
    UnknownMood(String),

    #[error("Invalid month: {0}")]
    InvalidMonth(u32),
}

pub type Result<T> = std::result::Result<T, PosyError>;
