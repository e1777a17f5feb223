//! Transport layer error types.

/// Transport error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TransportError {
    #[error("Connection error: {0}")]
    Connection(String),
    #[error("Timeout")]
    Timeout,
    #[error("Request error: {0}")]
    Request(String),
}

impl From<TransportError> for crate::error::SetupError {
    fn from(err: TransportError) -> Self {
        crate::error::SetupError::Transport {
            message: err.to_string(),
        }
    }
}

impl From<TransportError> for crate::error::GeminiError {
    fn from(err: TransportError) -> Self {
        use crate::error::NetworkError;
        match err {
            TransportError::Timeout => NetworkError::Timeout.into(),
            TransportError::Connection(message) | TransportError::Request(message) => {
                NetworkError::ConnectionFailed { message }.into()
            }
        }
    }
}
