//! Error types

use thiserror::Error;

/// Failure of an operation on a [`TodoSource`](crate::traits::TodoSource)
#[derive(Debug, Error)]
pub enum NetworkError {
    /// The request could not be sent, or its response could not be read
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    /// The response body is not the expected JSON
    #[error("invalid JSON payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),
    /// The server URL cannot be used to build requests
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    /// The source refused the operation
    #[error("source unavailable: {0}")]
    Unavailable(String),
}

impl From<url::ParseError> for NetworkError {
    fn from(err: url::ParseError) -> Self {
        NetworkError::InvalidUrl(err.to_string())
    }
}

/// Failure of a [`KeyValueStore`](crate::traits::KeyValueStore)
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("unable to access the backing file: {0}")]
    Io(#[from] std::io::Error),
    #[error("unable to (de)serialize stored values: {0}")]
    Serialization(#[from] serde_json::Error),
}
