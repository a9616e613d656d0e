//! Error types for paste operations.
//!
//! Every failure a caller can see is a [`PasteError`]. Configuration problems
//! (odd header lists, bad paste references, malformed base URLs) are detected
//! before any network activity; server-side failures carry the response body
//! text verbatim as their message.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while uploading, fetching or listing pastes.
#[derive(Debug, Error)]
pub enum PasteError {
    /// Extra headers were not supplied as name/value pairs.
    #[error("invalid headers: expected name/value pairs, got {count} values")]
    InvalidHeaders {
        /// Number of values supplied (always odd).
        count: usize,
    },

    /// An extra header name or value is not valid HTTP.
    #[error("invalid header: {name}")]
    InvalidHeader {
        /// The offending header name.
        name: String,
    },

    /// The paste reference is neither a bare paste ID nor a public paste URL.
    #[error("invalid paste URL: {reference}")]
    InvalidReference {
        /// The rejected reference as supplied by the caller.
        reference: String,
    },

    /// The resolved request URL could not be parsed.
    #[error("invalid URL: {url}")]
    InvalidUrl {
        /// The invalid URL string.
        url: String,
    },

    /// Network-level error (DNS resolution, connection refused, TLS errors, etc.)
    #[error("network error requesting {url}: {source}")]
    Network {
        /// The request URL.
        url: String,
        /// The underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// Request timed out before completion.
    #[error("timeout requesting {url}")]
    Timeout {
        /// The URL that timed out.
        url: String,
    },

    /// The caller's cancellation handle fired before the request completed.
    #[error("request to {url} was cancelled")]
    Cancelled {
        /// The request URL.
        url: String,
    },

    /// Reading the upload payload failed while the body was being streamed.
    #[error("failed to read upload payload: {source}")]
    Payload {
        /// The error returned by the payload reader.
        #[source]
        source: std::io::Error,
    },

    /// The server answered with a non-success status.
    ///
    /// The display text is exactly the (trimmed) response body.
    #[error("{message}")]
    Server {
        /// The HTTP status code.
        status: u16,
        /// The trimmed response body.
        message: String,
    },

    /// A JSON response body could not be decoded.
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        /// The request URL.
        url: String,
        /// The underlying decode error.
        #[source]
        source: serde_json::Error,
    },

    /// Writing fetched paste content to the caller's writer failed.
    #[error("failed to write paste content: {source}")]
    Write {
        /// The error returned by the writer.
        #[source]
        source: std::io::Error,
    },

    /// Local file system error (opening an upload file).
    #[error("IO error on {path}: {source}")]
    Io {
        /// The file path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

impl PasteError {
    /// Creates an invalid-headers error for a list of `count` values.
    pub fn invalid_headers(count: usize) -> Self {
        Self::InvalidHeaders { count }
    }

    /// Creates an invalid-header error.
    pub fn invalid_header(name: impl Into<String>) -> Self {
        Self::InvalidHeader { name: name.into() }
    }

    /// Creates an invalid paste reference error.
    pub fn invalid_reference(reference: impl Into<String>) -> Self {
        Self::InvalidReference {
            reference: reference.into(),
        }
    }

    /// Creates an invalid URL error.
    pub fn invalid_url(url: impl Into<String>) -> Self {
        Self::InvalidUrl { url: url.into() }
    }

    /// Creates a network error from a reqwest error.
    ///
    /// Timeouts are promoted to [`PasteError::Timeout`].
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            Self::Timeout { url: url.into() }
        } else {
            Self::Network {
                url: url.into(),
                source,
            }
        }
    }

    /// Creates a cancellation error.
    pub fn cancelled(url: impl Into<String>) -> Self {
        Self::Cancelled { url: url.into() }
    }

    /// Creates a payload read error.
    pub fn payload(source: std::io::Error) -> Self {
        Self::Payload { source }
    }

    /// Creates a server error from a status code and raw response body.
    pub fn server(status: u16, body: &str) -> Self {
        Self::Server {
            status,
            message: body.trim().to_string(),
        }
    }

    /// Creates a decode error.
    pub fn decode(url: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Decode {
            url: url.into(),
            source,
        }
    }

    /// Creates a content write error.
    pub fn write(source: std::io::Error) -> Self {
        Self::Write { source }
    }

    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns `true` for errors raised before any network activity.
    #[must_use]
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Self::InvalidHeaders { .. }
                | Self::InvalidHeader { .. }
                | Self::InvalidReference { .. }
                | Self::InvalidUrl { .. }
        )
    }
}
