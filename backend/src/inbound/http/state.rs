//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and depend only on driving
//! ports, so they can be exercised without I/O.

use std::sync::Arc;

use crate::domain::ports::{Authenticator, ExpenseCommand, ExpenseQuery};

/// Parameter object bundling the port implementations handlers need.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub auth: Arc<dyn Authenticator>,
    pub expenses: Arc<dyn ExpenseCommand>,
    pub expenses_query: Arc<dyn ExpenseQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub auth: Arc<dyn Authenticator>,
    pub expenses: Arc<dyn ExpenseCommand>,
    pub expenses_query: Arc<dyn ExpenseQuery>,
}

impl HttpState {
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use expense_tracker::domain::ExpenseService;
    /// use expense_tracker::domain::ports::FixtureExpenseRepository;
    /// use expense_tracker::inbound::http::state::{HttpState, HttpStatePorts};
    /// use expense_tracker::outbound::memory::{
    ///     InMemorySessionTokenRepository, InMemoryUserRepository,
    /// };
    /// use expense_tracker::domain::{AuthService, AuthServicePorts, TokenTtl};
    /// use expense_tracker::domain::ports::FixturePasswordHasher;
    ///
    /// let expenses = Arc::new(ExpenseService::new(
    ///     Arc::new(FixtureExpenseRepository),
    ///     Arc::new(DefaultClock),
    /// ));
    /// let auth = Arc::new(AuthService::new(
    ///     AuthServicePorts {
    ///         users: Arc::new(InMemoryUserRepository::default()),
    ///         tokens: Arc::new(InMemorySessionTokenRepository::default()),
    ///         hasher: Arc::new(FixturePasswordHasher),
    ///         clock: Arc::new(DefaultClock),
    ///     },
    ///     TokenTtl::default(),
    /// ));
    /// let state = HttpState::new(HttpStatePorts {
    ///     auth,
    ///     expenses: expenses.clone(),
    ///     expenses_query: expenses,
    /// });
    /// let _auth = state.auth.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            auth,
            expenses,
            expenses_query,
        } = ports;
        Self {
            auth,
            expenses,
            expenses_query,
        }
    }
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}
