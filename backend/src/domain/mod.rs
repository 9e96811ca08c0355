//! Domain entities, services and ports.
//!
//! Nothing in here depends on actix-web or Diesel. Inbound adapters talk to
//! the driving ports in [`ports`]; outbound adapters implement the driven
//! ones.
//!
//! Public surface:
//! - `Error` / `ErrorCode`: transport-agnostic failure payload.
//! - `Expense`, `ExpenseFields`, `Category`, `Amount`: the expense record and
//!   its validated parts.
//! - `ExpenseSummary`: totals and per-category breakdown.
//! - `guard` / `Owned`: the per-record ownership check.
//! - `ExpenseService`, `AuthService`: default port implementations.

pub mod auth;
pub mod auth_service;
pub mod error;
pub mod expense;
pub mod expense_service;
pub mod ownership;
pub mod ports;
pub mod summary;
pub mod trace_id;
pub mod user;

pub use self::auth::{
    AccessToken, CredentialsValidationError, LoginCredentials, Registration, SessionToken,
    TokenDigest,
};
pub use self::auth_service::{AuthService, AuthServicePorts, TokenTtl};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::expense::{
    Amount, Category, Expense, ExpenseDraft, ExpenseFields, ExpenseId, ExpenseTitle,
    ExpenseValidationError, RawAmount,
};
pub use self::expense_service::ExpenseService;
pub use self::ownership::{Owned, OwnershipError, guard};
pub use self::summary::{CategoryTotal, ExpenseSummary};
pub use self::trace_id::TraceId;
pub use self::user::{PasswordHash, User, UserAccount, UserId, UserValidationError, Username};

/// Response header carrying the request's trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";
