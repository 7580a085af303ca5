//! Error types for the ClusterView client.

use thiserror::Error;

/// Result alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors surfaced by the dispatch client.
///
/// The formatter and resolver never fail; everything here is either a
/// configuration problem caught at construction time or a transport-level
/// outcome reported after dispatch.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Client configuration was rejected.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// HTTP request could not be dispatched or completed.
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server replied with a non-success status.
    #[error("Server error ({status}): {message}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        message: String,
    },

    /// Server replied with a payload the client could not decode.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ClientError {
    /// HTTP status associated with this error, when the server produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Server { status, .. } => Some(*status),
            ClientError::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
