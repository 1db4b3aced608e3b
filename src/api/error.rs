use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// The server rejected the request and supplied a human-readable message.
    #[error("{message}")]
    Rejected { message: String },

    /// Non-2xx response without a usable message body.
    #[error("request failed with status {status}")]
    Status { status: reqwest::StatusCode },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Error body shape used by the auth service: `{"message": "..."}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl ApiError {
    /// Build an error from a non-2xx response, preferring the server's
    /// own `message` field when the body carries one.
    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message)
            .filter(|m| !m.is_empty());

        match message {
            Some(message) => ApiError::Rejected { message },
            None => ApiError::Status { status },
        }
    }

    /// The server-supplied message, if this failure carried one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Rejected { message } => Some(message),
            _ => None,
        }
    }

    /// True for transport-level failures (connection, timeout, malformed body).
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }
}
