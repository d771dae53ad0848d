//! Load generator error types

use sentibench_client::ClientError;

/// Error type for load-run construction and execution
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Client error: {0}")]
    Client(#[from] ClientError),

    #[error("Stage profile has no stages")]
    EmptyProfile,
}
