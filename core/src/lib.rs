//! Async client for a remote `/users` resource.
//!
//! # Overview
//! Two operations, `fetch_user` and `create_user`, each wrapping a single
//! HTTP exchange. Requests go through an injected `Transport`, so the client
//! has no global HTTP object and tests substitute a fake instead of
//! intercepting a shared one.
//!
//! # Design
//! - `UserClient` is stateless apart from `base_url` and its transport.
//! - User payloads and records are JSON objects; the client never adds,
//!   removes or renames a field.
//! - Errors come back exactly as the transport produced them. The fetch path
//!   logs once before returning an error, the create path does not.
//! - `HttpTransport` is the ureq-backed production transport.

pub mod client;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use client::{UserClient, DEFAULT_BASE_URL};
pub use error::TransportError;
pub use http::HttpTransport;
pub use transport::{Transport, TransportResponse};
pub use types::{RequestOptions, UserId, UserPayload, UserRecord};
