//! Error types for revenue-core

use thiserror::Error;

/// Result type alias for revenue-core
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while reaching or decoding an external collaborator
///
/// The first three variants mirror the failure taxonomy every lookup call
/// site has to handle: the collaborator could not be reached, it answered
/// with a non-success application status, or its payload did not have the
/// expected shape.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Network or HTTP-level failure reaching a collaborator
    #[error("Transport error: {0}")]
    Transport(String),

    /// Collaborator answered, but with a non-success application status
    #[error("Application error (status {status}): {msg}")]
    Application { status: i64, msg: String },

    /// Missing fields, non-array payload or unexpected null
    #[error("Unexpected data shape: {0}")]
    DataShape(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error message
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Network or HTTP-level failure
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Non-success application status inside a successful transport response
    pub fn is_application(&self) -> bool {
        matches!(self, Self::Application { .. })
    }

    /// Malformed payload
    pub fn is_data_shape(&self) -> bool {
        matches!(self, Self::DataShape(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Application {
            status: 400,
            msg: "bad request".to_string(),
        };
        assert_eq!(err.to_string(), "Application error (status 400): bad request");

        let err = Error::DataShape("data is not an array".to_string());
        assert_eq!(err.to_string(), "Unexpected data shape: data is not an array");
    }

    #[test]
    fn test_error_classification() {
        assert!(Error::Transport("timeout".into()).is_transport());
        assert!(
            Error::Application {
                status: 402,
                msg: String::new()
            }
            .is_application()
        );
        assert!(Error::DataShape("null".into()).is_data_shape());
        assert!(!Error::Other("x".into()).is_transport());
    }
}
