//! Client error types

/// Error type for sentiment service operations
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Invalid JSON in response body: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Unexpected HTTP status: {0}")]
    UnexpectedStatus(u16),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}
