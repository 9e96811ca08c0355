//! PostgreSQL-backed `SessionTokenRepository`. Stores digests only.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{SessionTokenRepository, SessionTokenRepositoryError};
use crate::domain::{SessionToken, TokenDigest, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::SessionTokenRow;
use super::pool::{DbPool, PoolError};
use super::schema::session_tokens;

#[derive(Clone)]
pub struct DieselSessionTokenRepository {
    pool: DbPool,
}

impl DieselSessionTokenRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> SessionTokenRepositoryError {
    map_basic_pool_error(error, SessionTokenRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> SessionTokenRepositoryError {
    map_basic_diesel_error(
        error,
        SessionTokenRepositoryError::query,
        SessionTokenRepositoryError::connection,
    )
}

impl From<&SessionToken> for SessionTokenRow {
    fn from(token: &SessionToken) -> Self {
        Self {
            digest: token.digest.as_str().to_owned(),
            user_id: *token.user_id.as_uuid(),
            created_at: token.created_at,
            expires_at: token.expires_at,
        }
    }
}

impl From<SessionTokenRow> for SessionToken {
    fn from(row: SessionTokenRow) -> Self {
        Self {
            digest: TokenDigest::from_stored(row.digest),
            user_id: UserId::from_uuid(row.user_id),
            created_at: row.created_at,
            expires_at: row.expires_at,
        }
    }
}

#[async_trait]
impl SessionTokenRepository for DieselSessionTokenRepository {
    async fn insert(&self, token: &SessionToken) -> Result<(), SessionTokenRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(session_tokens::table)
            .values(&SessionTokenRow::from(token))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_digest(
        &self,
        digest: &TokenDigest,
    ) -> Result<Option<SessionToken>, SessionTokenRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = session_tokens::table
            .filter(session_tokens::digest.eq(digest.as_str()))
            .select(SessionTokenRow::as_select())
            .first::<SessionTokenRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(SessionToken::from))
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64, SessionTokenRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let expired = session_tokens::table.filter(session_tokens::expires_at.le(now));
        let removed = diesel::delete(expired)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(u64::try_from(removed).unwrap_or(u64::MAX))
    }
}
