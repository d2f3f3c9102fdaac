//! # Client Error Types
//!
//! Unified error handling for GenePattern API dispatch and client startup.
//!
//! Per-call failures come in two kinds that callers care about: the server
//! rejected the request ([`ClientError::ApiError`]) or no response arrived at
//! all ([`ClientError::TransportError`]). Neither is retried.

use thiserror::Error;

/// Client operation result type
pub type ClientResult<T> = Result<T, ClientError>;

/// Error types for client operations
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP Error: {status} for URL: {url}\nResponse: {body}")]
    ApiError {
        status: u16,
        url: String,
        body: String,
    },

    #[error("Request Exception: {0}")]
    TransportError(String),

    #[error("No API key available from credential provider '{provider}'")]
    MissingCredential { provider: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Unknown credential provider '{name}'. Available providers: [{available}]")]
    UnknownCredentialProvider { name: String, available: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON serialization/deserialization failed: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl ClientError {
    /// Create a remote rejection error from an HTTP response
    pub fn api_error(status: u16, url: impl Into<String>, body: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            url: url.into(),
            body: body.into(),
        }
    }

    /// Create a transport failure from the underlying HTTP stack error
    pub fn transport(err: &reqwest::Error) -> Self {
        Self::TransportError(err.to_string())
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError(message.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Create an error for a successful response with the wrong shape
    pub fn unexpected_response(message: impl Into<String>) -> Self {
        Self::UnexpectedResponse(message.into())
    }

    /// HTTP status of a remote rejection, if this is one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::ApiError { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether this error should abort process startup rather than a single call.
    #[must_use]
    pub fn is_startup_error(&self) -> bool {
        matches!(
            self,
            ClientError::ConfigError(_) | ClientError::UnknownCredentialProvider { .. }
        )
    }
}
