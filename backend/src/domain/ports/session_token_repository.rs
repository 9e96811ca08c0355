//! Driven port for issued bearer tokens.
//!
//! Adapters only ever see [`TokenDigest`]s; raw tokens stay with the client.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{SessionToken, TokenDigest};

use super::define_port_error;

define_port_error! {
    /// Errors raised by session token adapters.
    pub enum SessionTokenRepositoryError {
        Connection { message: String } => "session token store connection failed: {message}",
        Query { message: String } => "session token store query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionTokenRepository: Send + Sync {
    async fn insert(&self, token: &SessionToken) -> Result<(), SessionTokenRepositoryError>;

    async fn find_by_digest(
        &self,
        digest: &TokenDigest,
    ) -> Result<Option<SessionToken>, SessionTokenRepositoryError>;

    /// Drop every token that expired at or before `now`; returns how many.
    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64, SessionTokenRepositoryError>;
}
