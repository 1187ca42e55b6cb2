//! Client error types

use thiserror::Error;

/// Errors that can occur talking to the model service
#[derive(Debug, Error)]
pub enum OllamaError {
    /// The service answered with a non-2xx status
    #[error("service error {status}: {message}")]
    Service { status: u16, message: String },

    /// Connection, DNS, or socket failure before a response arrived
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered 2xx but the body was not the expected JSON
    #[error("malformed response: {0}")]
    Json(#[from] serde_json::Error),
}

impl OllamaError {
    /// Check if this is a service-side (non-2xx) error
    pub fn is_service(&self) -> bool {
        matches!(self, OllamaError::Service { .. })
    }

    /// Check if this is a transport-level failure
    pub fn is_transport(&self) -> bool {
        matches!(self, OllamaError::Transport(_))
    }

    /// Get the HTTP status if this is a service error
    pub fn status(&self) -> Option<u16> {
        match self {
            OllamaError::Service { status, .. } => Some(*status),
            _ => None,
        }
    }
}
