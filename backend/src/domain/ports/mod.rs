//! Domain ports for the hexagonal boundary.
//!
//! Driving ports (`ExpenseCommand`, `ExpenseQuery`, `Authenticator`) are
//! called by inbound adapters; driven ports are implemented by outbound
//! adapters and consumed by the services.

mod macros;
pub(crate) use macros::define_port_error;

mod authenticator;
mod expense_command;
mod expense_query;
mod expense_repository;
mod password_hasher;
mod session_token_repository;
mod user_repository;

pub use authenticator::Authenticator;
#[cfg(test)]
pub use authenticator::MockAuthenticator;
pub use expense_command::{
    CreateExpenseRequest, DeleteExpenseRequest, ExpenseCommand, UpdateExpenseRequest,
};
#[cfg(test)]
pub use expense_command::MockExpenseCommand;
pub use expense_query::ExpenseQuery;
#[cfg(test)]
pub use expense_query::MockExpenseQuery;
#[cfg(test)]
pub use expense_repository::MockExpenseRepository;
pub use expense_repository::{
    ExpenseOrder, ExpenseRepository, ExpenseRepositoryError, FixtureExpenseRepository,
};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{FixturePasswordHasher, PasswordHasher, PasswordHasherError};
#[cfg(test)]
pub use session_token_repository::MockSessionTokenRepository;
pub use session_token_repository::{SessionTokenRepository, SessionTokenRepositoryError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
