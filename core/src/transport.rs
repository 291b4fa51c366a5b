//! The HTTP capability `UserClient` is built on.
//!
//! # Design
//! `UserClient` never talks to the network directly. It is handed a
//! `Transport` at construction and issues exactly one call on it per
//! operation. Production code uses `HttpTransport`; tests pass a fake that
//! records calls and returns canned outcomes.

use async_trait::async_trait;

use crate::error::TransportError;
use crate::types::{RequestOptions, UserPayload, UserRecord};

/// Successful outcome of a transport call: a 2xx status and a JSON object body.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    pub data: UserRecord,
}

/// GET/POST primitives with structured success and failure outcomes.
///
/// Implementations resolve `Ok` only for 2xx responses whose body decodes to
/// a JSON object. Every other outcome is a `TransportError`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(
        &self,
        url: &str,
        options: &RequestOptions,
    ) -> Result<TransportResponse, TransportError>;

    async fn post(
        &self,
        url: &str,
        body: &UserPayload,
    ) -> Result<TransportResponse, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn get(
        &self,
        url: &str,
        options: &RequestOptions,
    ) -> Result<TransportResponse, TransportError> {
        (**self).get(url, options).await
    }

    async fn post(
        &self,
        url: &str,
        body: &UserPayload,
    ) -> Result<TransportResponse, TransportError> {
        (**self).post(url, body).await
    }
}
