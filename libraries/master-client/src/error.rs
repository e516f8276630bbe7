//! Error types for the master node client.

use master_core::ValidationError;
use reqwest::Response;
use thiserror::Error;

/// Errors that can occur when talking to a master node.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server is offline or unreachable
    #[error("Server unreachable: {0}")]
    ServerUnreachable(String),

    /// Auth endpoint refused the request
    #[error("Authentication failed (status {0})")]
    AuthFailed(u16),

    /// Playlist or path does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Server returned an error response
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Failed to parse server response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Invalid server URL
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Refused locally before sending anything
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),
}

/// Coarse classification of [`ClientError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request could not be sent or the response not received
    NetworkFailure,
    /// Non-200 on an auth endpoint
    AuthFailure,
    /// Playlist or path absent
    NotFound,
    /// Non-200 elsewhere, or an unreadable payload
    ServerError,
    /// Bad input caught before any request was made
    InvalidInput,
}

impl ClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Request(_) | ClientError::ServerUnreachable(_) => ErrorKind::NetworkFailure,
            ClientError::AuthFailed(_) => ErrorKind::AuthFailure,
            ClientError::NotFound(_) => ErrorKind::NotFound,
            ClientError::ServerError { .. } | ClientError::ParseError(_) => ErrorKind::ServerError,
            ClientError::InvalidUrl(_) | ClientError::Validation(_) => ErrorKind::InvalidInput,
        }
    }

    /// Whether the server answered with a non-success status.
    ///
    /// These are the outcomes the compatibility layer collapses into
    /// `false`, empty or absent results.
    pub fn is_status(&self) -> bool {
        matches!(
            self,
            ClientError::AuthFailed(_) | ClientError::NotFound(_) | ClientError::ServerError { .. }
        )
    }
}

impl From<url::ParseError> for ClientError {
    fn from(e: url::ParseError) -> Self {
        ClientError::InvalidUrl(e.to_string())
    }
}

/// Classify a failure to send a request.
pub(crate) fn send_error(e: reqwest::Error) -> ClientError {
    if e.is_connect() || e.is_timeout() {
        ClientError::ServerUnreachable(e.to_string())
    } else {
        ClientError::Request(e)
    }
}

/// Build a `ServerError` from a non-success response.
pub(crate) async fn server_error(response: Response) -> ClientError {
    let status = response.status().as_u16();
    let message = response.text().await.unwrap_or_default();
    ClientError::ServerError { status, message }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
