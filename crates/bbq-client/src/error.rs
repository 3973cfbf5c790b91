//! Errors surfaced by the container service client.

use thiserror::Error;

/// Failure of a single call against the container service.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The configured service address cannot be turned into a URL.
    #[error("invalid garden address '{address}': {message}")]
    InvalidAddress {
        /// Address as supplied by the caller.
        address: String,
        /// Why it was rejected.
        message: String,
    },

    /// The request never produced an HTTP response.
    #[error("{operation} failed: {source}")]
    Transport {
        /// Operation being performed.
        operation: &'static str,
        /// Underlying transport error.
        source: reqwest::Error,
    },

    /// The service answered with a non-success status.
    #[error("{operation} rejected by service (HTTP {status}): {message}")]
    Service {
        /// Operation being performed.
        operation: &'static str,
        /// HTTP status code.
        status: u16,
        /// Error type reported by the service, if any.
        kind: Option<String>,
        /// Error message reported by the service.
        message: String,
    },

    /// The response body could not be decoded.
    #[error("{operation} returned an unreadable response: {source}")]
    Decode {
        /// Operation being performed.
        operation: &'static str,
        /// Underlying decoding error.
        source: serde_json::Error,
    },
}

/// Convenience alias for client results.
pub type Result<T> = std::result::Result<T, ClientError>;
