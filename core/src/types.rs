//! Data types for the user API.
//!
//! # Design
//! Users are schema-agnostic: payloads and records are plain JSON objects, so
//! fields the remote service adds or renames pass through untouched. Only the
//! identifier and per-call options get dedicated types.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A user object as returned by the remote service. Handed back unmodified.
pub type UserRecord = Map<String, Value>;

/// Fields supplied by the caller when creating a user. Sent as-is.
pub type UserPayload = Map<String, Value>;

/// Identifier substituted into the `/users/{id}` path segment.
///
/// No validation is performed; whatever the id renders to is what the
/// remote service receives. Plain integer literals and negative ids convert
/// to `Number`; a `u64` beyond `i64::MAX` is kept as its decimal text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    Number(i64),
    Text(String),
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserId::Number(n) => write!(f, "{n}"),
            UserId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for UserId {
    fn from(n: i64) -> Self {
        UserId::Number(n)
    }
}

impl From<i32> for UserId {
    fn from(n: i32) -> Self {
        UserId::Number(n.into())
    }
}

impl From<u32> for UserId {
    fn from(n: u32) -> Self {
        UserId::Number(n.into())
    }
}

impl From<u64> for UserId {
    fn from(n: u64) -> Self {
        match i64::try_from(n) {
            Ok(n) => UserId::Number(n),
            Err(_) => UserId::Text(n.to_string()),
        }
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        UserId::Text(s.to_string())
    }
}

impl From<String> for UserId {
    fn from(s: String) -> Self {
        UserId::Text(s)
    }
}

/// Per-call options forwarded verbatim to the transport.
///
/// `timeout: None` means "use whatever the transport does by default"; the
/// client never substitutes its own value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestOptions {
    pub timeout: Option<Duration>,
}

impl RequestOptions {
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
        }
    }
}
