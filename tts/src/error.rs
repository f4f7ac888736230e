use thiserror::Error;

use crate::client::ClientError;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TtsError {
    #[error("request timed out")]
    Timeout,
    #[error("connection failed: {0}")]
    Connection(String),
    #[error("text-to-speech client is closed")]
    Closed,
    #[error("streaming synthesis is not supported")]
    StreamingUnsupported,
    #[error("input has already ended")]
    InputEnded,
}

impl TtsError {
    /// Whether the host may retry the call that produced this error.
    pub fn is_retryable(&self) -> bool {
        matches!(self, TtsError::Timeout | TtsError::Connection(_))
    }
}

impl From<ClientError> for TtsError {
    fn from(e: ClientError) -> Self {
        match e {
            ClientError::Timeout => TtsError::Timeout,
            ClientError::Transport(msg) => TtsError::Connection(msg),
        }
    }
}

/// Convenience result type used throughout this crate.
pub type Result<T> = std::result::Result<T, TtsError>;
