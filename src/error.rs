use thiserror::Error;

#[derive(Debug, Error)]
pub enum PollinationsError {
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Request error: {0}")]
    RequestError(String),
    #[error("Response error: {0}")]
    ResponseError(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<reqwest::Error> for PollinationsError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) => PollinationsError::ResponseError(format!("HTTP {}: {}", status, e)),
            None => PollinationsError::RequestError(e.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, PollinationsError>;
