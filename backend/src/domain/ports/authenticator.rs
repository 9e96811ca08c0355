//! Driving port for account and token use cases.
//!
//! Inbound adapters call this to register, log in and resolve a presented
//! bearer token to a caller identity, without knowing how credentials or
//! tokens are stored.

use async_trait::async_trait;

use crate::domain::{AccessToken, Error, LoginCredentials, Registration, User, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Create an account and issue its first token.
    async fn register(&self, registration: Registration) -> Result<AccessToken, Error>;

    /// Check credentials and issue a fresh token.
    async fn login(&self, credentials: LoginCredentials) -> Result<AccessToken, Error>;

    /// Resolve a presented token to its owner; unknown or expired tokens are
    /// `unauthorized`.
    async fn verify_token(&self, token: &AccessToken) -> Result<UserId, Error>;

    /// Public profile of an authenticated caller.
    async fn current_user(&self, caller: &UserId) -> Result<User, Error>;
}
