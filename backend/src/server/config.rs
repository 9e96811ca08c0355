//! HTTP server configuration object.

use std::net::SocketAddr;

use expense_tracker::domain::TokenTtl;
use expense_tracker::outbound::persistence::DbPool;

/// Everything `create_server` needs beyond the health state.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) token_ttl: TokenTtl,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) cors_origins: Vec<String>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(bind_addr: SocketAddr, token_ttl: TokenTtl) -> Self {
        Self {
            bind_addr,
            token_ttl,
            db_pool: None,
            cors_origins: Vec::new(),
        }
    }

    /// Browser origins allowed to send credentialed cross-origin requests.
    #[must_use]
    pub fn with_cors_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_origins = origins;
        self
    }

    /// Switch storage from in-memory adapters to PostgreSQL.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}
