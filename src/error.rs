use thiserror::Error;

pub type Result<T> = std::result::Result<T, NavError>;

#[derive(Debug, Error)]
pub enum NavError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid command: {0}")]
    InvalidCommand(String),
    #[error("Error: {0}")]
    Generic(String),
}

impl From<String> for NavError {
    fn from(error: String) -> Self {
        NavError::Generic(error)
    }
}

impl From<&str> for NavError {
    fn from(error: &str) -> Self {
        NavError::Generic(error.to_string())
    }
}
