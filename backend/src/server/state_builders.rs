//! Assemble `HttpState` from either PostgreSQL or in-memory adapters.

use std::sync::Arc;

use mockable::DefaultClock;
use tracing::warn;

use expense_tracker::domain::ports::{
    ExpenseRepository, PasswordHasher, SessionTokenRepository, UserRepository,
};
use expense_tracker::domain::{AuthService, AuthServicePorts, ExpenseService, TokenTtl};
use expense_tracker::inbound::http::state::{HttpState, HttpStatePorts};
use expense_tracker::outbound::crypto::Argon2PasswordHasher;
use expense_tracker::outbound::memory::{
    InMemoryExpenseRepository, InMemorySessionTokenRepository, InMemoryUserRepository,
};
use expense_tracker::outbound::persistence::{
    DieselExpenseRepository, DieselSessionTokenRepository, DieselUserRepository,
};

use super::ServerConfig;

/// Driven adapters backing one server instance.
pub(crate) struct Adapters<E, U, T, H> {
    pub expenses: E,
    pub users: U,
    pub tokens: T,
    pub hasher: H,
}

pub(crate) fn assemble<E, U, T, H>(adapters: Adapters<E, U, T, H>, ttl: TokenTtl) -> HttpState
where
    E: ExpenseRepository + 'static,
    U: UserRepository + 'static,
    T: SessionTokenRepository + 'static,
    H: PasswordHasher + 'static,
{
    let Adapters {
        expenses,
        users,
        tokens,
        hasher,
    } = adapters;
    let expenses = Arc::new(ExpenseService::new(
        Arc::new(expenses),
        Arc::new(DefaultClock),
    ));
    let auth = Arc::new(AuthService::new(
        AuthServicePorts {
            users: Arc::new(users),
            tokens: Arc::new(tokens),
            hasher: Arc::new(hasher),
            clock: Arc::new(DefaultClock),
        },
        ttl,
    ));
    HttpState::new(HttpStatePorts {
        auth,
        expenses: expenses.clone(),
        expenses_query: expenses,
    })
}

/// PostgreSQL when a pool is configured, otherwise process memory.
pub(crate) fn build_http_state(config: &ServerConfig) -> HttpState {
    match &config.db_pool {
        Some(pool) => assemble(
            Adapters {
                expenses: DieselExpenseRepository::new(pool.clone()),
                users: DieselUserRepository::new(pool.clone()),
                tokens: DieselSessionTokenRepository::new(pool.clone()),
                hasher: Argon2PasswordHasher,
            },
            config.token_ttl,
        ),
        None => {
            warn!("no database configured; data is kept in memory and lost on restart");
            assemble(
                Adapters {
                    expenses: InMemoryExpenseRepository::default(),
                    users: InMemoryUserRepository::default(),
                    tokens: InMemorySessionTokenRepository::default(),
                    hasher: Argon2PasswordHasher,
                },
                config.token_ttl,
            )
        }
    }
}
