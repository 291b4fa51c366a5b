//! Fetch and create operations for the user API.
//!
//! # Design
//! `UserClient` holds only a `base_url` and the injected `Transport`, and
//! carries no mutable state between calls. Each operation builds its URL,
//! issues exactly one transport call and hands the response body back
//! untouched. Failures are never recovered or retried.
//!
//! `fetch_user` emits one `error!` event before returning a failure;
//! `create_user` returns failures without logging.

use tracing::error;

use crate::error::TransportError;
use crate::transport::Transport;
use crate::types::{RequestOptions, UserId, UserPayload, UserRecord};

/// Base URL of the public user service the client targets when none is given.
pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

/// Client for the `/users` resource.
#[derive(Debug, Clone)]
pub struct UserClient<T> {
    base_url: String,
    transport: T,
}

impl<T: Transport> UserClient<T> {
    pub fn new(base_url: &str, transport: T) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
        }
    }

    pub fn with_default_base_url(transport: T) -> Self {
        Self::new(DEFAULT_BASE_URL, transport)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetch a single user.
    ///
    /// `options` reach the transport unchanged; pass
    /// `RequestOptions::default()` to leave the timeout to the transport.
    pub async fn fetch_user(
        &self,
        user_id: impl Into<UserId>,
        options: RequestOptions,
    ) -> Result<UserRecord, TransportError> {
        let user_id = user_id.into();
        let url = self.user_url(&user_id);
        match self.transport.get(&url, &options).await {
            Ok(response) => Ok(response.data),
            Err(err) => {
                error!(%user_id, error = %err, "error fetching user");
                Err(err)
            }
        }
    }

    /// Create a user from `payload` and return the record the service stored.
    pub async fn create_user(&self, payload: &UserPayload) -> Result<UserRecord, TransportError> {
        let response = self.transport.post(&self.users_url(), payload).await?;
        Ok(response.data)
    }

    fn users_url(&self) -> String {
        format!("{}/users", self.base_url)
    }

    fn user_url(&self, user_id: &UserId) -> String {
        format!("{}/users/{user_id}", self.base_url)
    }
}
