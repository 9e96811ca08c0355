//! In-process adapters.
//!
//! Used when no database is configured and by HTTP tests. State lives only
//! as long as the process.

mod expense_repository;
mod session_token_repository;
mod user_repository;

pub use expense_repository::InMemoryExpenseRepository;
pub use session_token_repository::InMemorySessionTokenRepository;
pub use user_repository::InMemoryUserRepository;

fn poisoned(store: &str) -> String {
    format!("{store} lock poisoned")
}
