//! Error types for FinMind requests

use thiserror::Error;

/// FinMind client errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or HTTP error
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// Non-success HTTP status
    #[error("HTTP error: {0}")]
    HttpStatus(reqwest::StatusCode),

    /// FinMind answered with a non-200 `status` field
    #[error("FinMind API returned status: {status}, message: {msg}")]
    ApiStatus { status: i64, msg: String },

    /// JSON parsing error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Payload did not have the expected shape
    #[error("Unexpected payload: {0}")]
    Payload(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Map client failures onto the transport / application / data-shape taxonomy
impl From<ClientError> for revenue_core::Error {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::NetworkError(_) | ClientError::HttpStatus(_) => {
                revenue_core::Error::Transport(err.to_string())
            }
            ClientError::ApiStatus { status, msg } => {
                revenue_core::Error::Application { status, msg }
            }
            ClientError::JsonError(_) | ClientError::Payload(_) => {
                revenue_core::Error::DataShape(err.to_string())
            }
            ClientError::ConfigError(msg) => revenue_core::Error::Config(msg),
        }
    }
}
