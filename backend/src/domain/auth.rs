//! Authentication primitives: credentials, bearer tokens and their digests.
//!
//! Inbound adapters build these from raw strings; services never see an
//! unvalidated credential.

use std::fmt;

use chrono::{DateTime, Utc};
use rand::RngCore;
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use crate::domain::{UserId, UserValidationError, Username};

pub const PASSWORD_MIN: usize = 6;
pub const PASSWORD_MAX: usize = 128;
const TOKEN_BYTES: usize = 32;

/// Failures raised while validating credential payloads.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialsValidationError {
    #[error("username is required")]
    EmptyUsername,
    #[error(transparent)]
    Username(UserValidationError),
    #[error("password is required")]
    EmptyPassword,
    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },
    #[error("password must be at most {max} characters")]
    PasswordTooLong { max: usize },
}

impl CredentialsValidationError {
    /// Name of the payload field the failure refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyUsername | Self::Username(_) => "username",
            Self::EmptyPassword | Self::PasswordTooShort { .. } | Self::PasswordTooLong { .. } => {
                "password"
            }
        }
    }
}

/// Credentials offered at login.
///
/// Only presence is checked; a handle that could never have been registered
/// simply fails to authenticate.
///
/// # Examples
/// ```
/// use expense_tracker::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("  alice ", "hunter22").unwrap();
/// assert_eq!(creds.username(), "alice");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    pub fn try_from_parts(
        username: &str,
        password: &str,
    ) -> Result<Self, Vec<CredentialsValidationError>> {
        let username = username.trim();
        let mut errors = Vec::new();
        if username.is_empty() {
            errors.push(CredentialsValidationError::EmptyUsername);
        }
        if password.is_empty() {
            errors.push(CredentialsValidationError::EmptyPassword);
        }
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(Self {
            username: username.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

/// Credentials offered at registration, held to the full account rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    username: Username,
    password: Zeroizing<String>,
}

impl Registration {
    pub fn try_from_parts(
        username: &str,
        password: &str,
    ) -> Result<Self, Vec<CredentialsValidationError>> {
        let mut errors = Vec::new();

        let username = match Username::new(username) {
            Ok(name) => Some(name),
            Err(UserValidationError::EmptyUsername) => {
                errors.push(CredentialsValidationError::EmptyUsername);
                None
            }
            Err(err) => {
                errors.push(CredentialsValidationError::Username(err));
                None
            }
        };

        let length = password.chars().count();
        if password.is_empty() {
            errors.push(CredentialsValidationError::EmptyPassword);
        } else if length < PASSWORD_MIN {
            errors.push(CredentialsValidationError::PasswordTooShort { min: PASSWORD_MIN });
        } else if length > PASSWORD_MAX {
            errors.push(CredentialsValidationError::PasswordTooLong { max: PASSWORD_MAX });
        }

        match username {
            Some(username) if errors.is_empty() => Ok(Self {
                username,
                password: Zeroizing::new(password.to_owned()),
            }),
            _ => Err(errors),
        }
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

/// Opaque bearer token handed to the client exactly once.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(Zeroizing<String>);

impl AccessToken {
    /// 32 random bytes from the OS generator, hex encoded.
    pub fn generate() -> Self {
        let mut bytes = Zeroizing::new([0_u8; TOKEN_BYTES]);
        OsRng.fill_bytes(bytes.as_mut());
        Self(Zeroizing::new(hex::encode(bytes.as_ref())))
    }

    /// Wrap a token presented by a client.
    pub fn from_presented(raw: impl Into<String>) -> Self {
        Self(Zeroizing::new(raw.into()))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn digest(&self) -> TokenDigest {
        TokenDigest::of(self.expose())
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(..)")
    }
}

/// Hex SHA-256 of an access token; the only form that is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TokenDigest(String);

impl TokenDigest {
    pub fn of(token: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        Self(hex::encode(hasher.finalize()))
    }

    /// Rehydrate a digest read back from storage.
    pub fn from_stored(hex_digest: impl Into<String>) -> Self {
        Self(hex_digest.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Issued token record as kept by the session store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken {
    pub digest: TokenDigest,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl SessionToken {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}
