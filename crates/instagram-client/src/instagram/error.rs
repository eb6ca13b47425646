//! Error taxonomy for API calls
//!
//! Every facade operation returns `ApiError`. Transport and decode failures
//! keep their own types so callers can match on the failure mode, and each
//! converts into `ApiError` with `?`.

/// Failure to complete the HTTP round trip
#[derive(Debug, Clone, thiserror::Error)]
pub enum TransportError {
    #[error("Request timed out: {0}")]
    Timeout(String),
    #[error("Connection failed: {0}")]
    Connect(String),
    #[error("Empty response body (HTTP {status})")]
    EmptyBody { status: u16 },
    #[error("Network error: {0}")]
    Network(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        // Strip the URL so the access token never ends up in an error message
        let err = err.without_url();
        if err.is_timeout() {
            TransportError::Timeout(err.to_string())
        } else if err.is_connect() {
            TransportError::Connect(err.to_string())
        } else {
            TransportError::Network(err.to_string())
        }
    }
}

/// Failure to map a response body onto the requested type
#[derive(Debug, thiserror::Error)]
#[error("Failed to decode {type_name}: {source}")]
pub struct DecodeError {
    pub type_name: &'static str,
    #[source]
    pub source: serde_json::Error,
}

/// Error returned by every `InstagramClient` operation
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    /// The token was missing, expired or revoked
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("API error {code} ({error_type}): {message}")]
    Api {
        code: u16,
        error_type: String,
        message: String,
    },
    /// A precondition on the call arguments failed; nothing was sent
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl ApiError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        ApiError::InvalidArgument(message.into())
    }

    /// Returns true for errors raised before any request was sent
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, ApiError::InvalidArgument(_))
    }
}
