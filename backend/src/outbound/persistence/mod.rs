//! PostgreSQL adapters built on Diesel, `diesel-async` and a bb8 pool.
//!
//! Row structs and table definitions stay private to this module; the
//! repositories only hand domain types back out. Driver errors are logged at
//! debug level and surface as `Connection` or `Query` port errors.
//!
//! ```no_run
//! # async fn wire() -> Result<(), Box<dyn std::error::Error>> {
//! use expense_tracker::outbound::persistence::{
//!     DbPool, DieselExpenseRepository, PoolConfig, run_pending_migrations,
//! };
//!
//! let url = "postgres://localhost/expenses";
//! run_pending_migrations(url).await?;
//! let pool = DbPool::new(PoolConfig::new(url)).await?;
//! let _expenses = DieselExpenseRepository::new(pool);
//! # Ok(())
//! # }
//! ```

mod diesel_basic_error_mapping;
mod diesel_expense_repository;
mod diesel_session_token_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_expense_repository::DieselExpenseRepository;
pub use diesel_session_token_repository::DieselSessionTokenRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
