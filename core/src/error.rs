//! Error type produced by transports and surfaced by `UserClient`.
//!
//! # Design
//! The client does not classify failures itself. Whatever a `Transport`
//! returns is handed back to the caller unchanged, so this enum is the full
//! taxonomy: network failure, timeout, remote rejection, plus the two JSON
//! encoding edges.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    /// Connection could not be established or was interrupted.
    #[error("{0}")]
    Network(String),

    /// The request did not complete before the configured timeout.
    #[error("{0}")]
    Timeout(String),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The server answered 2xx but the body is not a JSON object.
    #[error("deserialization failed: {0}")]
    Decode(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Encode(String),
}

impl TransportError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, TransportError::Timeout(_))
    }

    /// The HTTP status for remote rejections, `None` for everything else.
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
