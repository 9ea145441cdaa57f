//! Error types for the Nudeny client.
//!
//! # Design
//! Failures are split by where they happen: `InvalidArgument` before any
//! I/O, `Io` while reading a file for a multipart body, and `Transport` once
//! the request is on the wire. A non-2xx status is not an error; it comes
//! back as an ordinary `HttpResponse`.

use std::path::PathBuf;

use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors returned by `NudenyClient` builders and `Dispatcher` operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// An input element was not a string. Raised before any I/O.
    #[error("invalid argument at index {index}: {reason}")]
    InvalidArgument { index: usize, reason: String },

    /// A file named in a multipart request could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Connection, DNS, TLS or protocol failure from the HTTP client.
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),

    /// The URL list could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A multipart header name or value would break the part head.
    #[error("invalid multipart header `{name}`: {reason}")]
    InvalidHeader { name: String, reason: String },

    /// A capability name matched none of the service's capabilities.
    #[error("unknown capability `{0}`")]
    UnknownCapability(String),

    /// The configured base address is unusable.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ApiError {
    pub fn transport<E>(error: E) -> Self
    where
        E: Into<BoxError>,
    {
        ApiError::Transport(error.into())
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        ApiError::Transport(Box::new(error))
    }
}
