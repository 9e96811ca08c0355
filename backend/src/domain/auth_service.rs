//! Account registration, login and bearer-token verification.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Duration;
use mockable::Clock;
use tracing::{error, info, warn};

use crate::domain::ports::{
    Authenticator, PasswordHasher, PasswordHasherError, SessionTokenRepository,
    SessionTokenRepositoryError, UserPersistenceError, UserRepository,
};
use crate::domain::{
    AccessToken, Error, LoginCredentials, Registration, SessionToken, User, UserAccount, UserId,
};

const INVALID_CREDENTIALS: &str = "invalid credentials";
const INVALID_TOKEN: &str = "Token is not valid";
const STORE_UNAVAILABLE: &str = "Service temporarily unavailable";

fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            error!(%message, "user repository unavailable");
            Error::service_unavailable(STORE_UNAVAILABLE)
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateUsername { .. } => {
            Error::conflict("Username is already taken")
        }
    }
}

fn map_token_error(error: SessionTokenRepositoryError) -> Error {
    match error {
        SessionTokenRepositoryError::Connection { message } => {
            error!(%message, "session token store unavailable");
            Error::service_unavailable(STORE_UNAVAILABLE)
        }
        SessionTokenRepositoryError::Query { message } => {
            Error::internal(format!("session token store error: {message}"))
        }
    }
}

fn map_hasher_error(error: PasswordHasherError) -> Error {
    Error::internal(error.to_string())
}

/// Token lifetime handed to [`AuthService`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenTtl(Duration);

impl TokenTtl {
    pub fn hours(hours: u32) -> Self {
        Self(Duration::hours(i64::from(hours)))
    }

    pub fn as_duration(self) -> Duration {
        self.0
    }
}

impl Default for TokenTtl {
    fn default() -> Self {
        Self::hours(120)
    }
}

/// Collaborators of [`AuthService`].
pub struct AuthServicePorts<U, T, H> {
    pub users: Arc<U>,
    pub tokens: Arc<T>,
    pub hasher: Arc<H>,
    pub clock: Arc<dyn Clock>,
}

/// Default [`Authenticator`] backed by user, token and hashing ports.
pub struct AuthService<U, T, H> {
    users: Arc<U>,
    tokens: Arc<T>,
    hasher: Arc<H>,
    clock: Arc<dyn Clock>,
    ttl: TokenTtl,
}

impl<U, T, H> AuthService<U, T, H> {
    pub fn new(ports: AuthServicePorts<U, T, H>, ttl: TokenTtl) -> Self {
        let AuthServicePorts {
            users,
            tokens,
            hasher,
            clock,
        } = ports;
        Self {
            users,
            tokens,
            hasher,
            clock,
            ttl,
        }
    }
}

impl<U, T, H> AuthService<U, T, H>
where
    U: UserRepository,
    T: SessionTokenRepository,
    H: PasswordHasher,
{
    async fn issue_token(&self, user_id: &UserId) -> Result<AccessToken, Error> {
        let token = AccessToken::generate();
        let now = self.clock.utc();
        let record = SessionToken {
            digest: token.digest(),
            user_id: user_id.clone(),
            created_at: now,
            expires_at: now + self.ttl.as_duration(),
        };
        self.tokens
            .insert(&record)
            .await
            .map_err(map_token_error)?;

        // Opportunistic cleanup; a failure here must not block the login.
        if let Err(err) = self.tokens.purge_expired(now).await {
            warn!(error = %err, "failed to purge expired session tokens");
        }
        Ok(token)
    }
}

#[async_trait]
impl<U, T, H> Authenticator for AuthService<U, T, H>
where
    U: UserRepository,
    T: SessionTokenRepository,
    H: PasswordHasher,
{
    async fn register(&self, registration: Registration) -> Result<AccessToken, Error> {
        let password_hash = self
            .hasher
            .hash(registration.password())
            .await
            .map_err(map_hasher_error)?;
        let user = User::new(
            UserId::random(),
            registration.username().clone(),
            self.clock.utc(),
        );
        let account = UserAccount {
            user,
            password_hash,
        };

        self.users.create(&account).await.map_err(|err| {
            if matches!(err, UserPersistenceError::DuplicateUsername { .. }) {
                info!(username = %account.user.username(), "registration rejected: username taken");
            }
            map_user_error(err)
        })?;

        info!(user_id = %account.user.id(), "user registered");
        self.issue_token(account.user.id()).await
    }

    async fn login(&self, credentials: LoginCredentials) -> Result<AccessToken, Error> {
        let account = self
            .users
            .find_by_username(credentials.username())
            .await
            .map_err(map_user_error)?;
        let Some(account) = account else {
            warn!("login rejected: unknown username");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };

        let matches = self
            .hasher
            .verify(credentials.password(), &account.password_hash)
            .await
            .map_err(map_hasher_error)?;
        if !matches {
            warn!(user_id = %account.user.id(), "login rejected: wrong password");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }

        info!(user_id = %account.user.id(), "user logged in");
        self.issue_token(account.user.id()).await
    }

    async fn verify_token(&self, token: &AccessToken) -> Result<UserId, Error> {
        let record = self
            .tokens
            .find_by_digest(&token.digest())
            .await
            .map_err(map_token_error)?
            .ok_or_else(|| Error::unauthorized(INVALID_TOKEN))?;

        if record.is_expired_at(self.clock.utc()) {
            return Err(Error::unauthorized(INVALID_TOKEN));
        }
        Ok(record.user_id)
    }

    async fn current_user(&self, caller: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(caller)
            .await
            .map_err(map_user_error)?
            // A valid token for a deleted account is still an invalid token.
            .ok_or_else(|| Error::unauthorized(INVALID_TOKEN))
    }
}

#[cfg(test)]
#[path = "auth_service_tests.rs"]
mod tests;
