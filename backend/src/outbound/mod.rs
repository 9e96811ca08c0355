//! Outbound adapters implementing the driven ports.
//!
//! - `persistence`: PostgreSQL repositories via Diesel.
//! - `memory`: process-local repositories for development and tests.
//! - `crypto`: Argon2id password hashing.
//!
//! Adapters translate between domain types and storage representations and
//! hold no business rules.

pub mod crypto;
pub mod memory;
pub mod persistence;
