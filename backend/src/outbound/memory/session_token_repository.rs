use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{SessionTokenRepository, SessionTokenRepositoryError};
use crate::domain::{SessionToken, TokenDigest};

use super::poisoned;

/// Issued tokens keyed by digest.
#[derive(Debug, Default)]
pub struct InMemorySessionTokenRepository {
    tokens: Mutex<HashMap<TokenDigest, SessionToken>>,
}

impl InMemorySessionTokenRepository {
    fn tokens(
        &self,
    ) -> Result<MutexGuard<'_, HashMap<TokenDigest, SessionToken>>, SessionTokenRepositoryError>
    {
        self.tokens
            .lock()
            .map_err(|_| SessionTokenRepositoryError::query(poisoned("token store")))
    }
}

#[async_trait]
impl SessionTokenRepository for InMemorySessionTokenRepository {
    async fn insert(&self, token: &SessionToken) -> Result<(), SessionTokenRepositoryError> {
        self.tokens()?.insert(token.digest.clone(), token.clone());
        Ok(())
    }

    async fn find_by_digest(
        &self,
        digest: &TokenDigest,
    ) -> Result<Option<SessionToken>, SessionTokenRepositoryError> {
        Ok(self.tokens()?.get(digest).cloned())
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64, SessionTokenRepositoryError> {
        let mut tokens = self.tokens()?;
        let before = tokens.len();
        tokens.retain(|_, token| !token.is_expired_at(now));
        Ok(u64::try_from(before - tokens.len()).unwrap_or(u64::MAX))
    }
}
