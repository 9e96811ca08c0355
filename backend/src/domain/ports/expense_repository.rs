//! Driven port for expense persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Expense, ExpenseId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by expense repository adapters.
    pub enum ExpenseRepositoryError {
        /// The store could not be reached.
        Connection { message: String } => "expense repository connection failed: {message}",
        /// A query or mutation failed while executing.
        Query { message: String } => "expense repository query failed: {message}",
    }
}

/// Sort order for owner listings, by creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpenseOrder {
    NewestFirst,
    OldestFirst,
}

/// Storage for expense records.
///
/// Writes are per-record atomic. `update` and `delete` report whether a row
/// was touched so callers can detect a record that vanished mid-operation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExpenseRepository: Send + Sync {
    async fn insert(&self, expense: &Expense) -> Result<(), ExpenseRepositoryError>;

    async fn find_by_id(&self, id: &ExpenseId) -> Result<Option<Expense>, ExpenseRepositoryError>;

    /// Every expense owned by `owner`. Ties on `created_at` keep insertion order.
    async fn list_by_owner(
        &self,
        owner: &UserId,
        order: ExpenseOrder,
    ) -> Result<Vec<Expense>, ExpenseRepositoryError>;

    /// Overwrite title, category and amount, stamping `updated_at`.
    /// `Ok(false)` when the id is gone.
    async fn update(
        &self,
        expense: &Expense,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, ExpenseRepositoryError>;

    /// Remove permanently. `Ok(false)` when the id is gone.
    async fn delete(&self, id: &ExpenseId) -> Result<bool, ExpenseRepositoryError>;
}

/// Repository that stores nothing; for wiring tests that never touch expenses.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureExpenseRepository;

#[async_trait]
impl ExpenseRepository for FixtureExpenseRepository {
    async fn insert(&self, _expense: &Expense) -> Result<(), ExpenseRepositoryError> {
        Ok(())
    }

    async fn find_by_id(&self, _id: &ExpenseId) -> Result<Option<Expense>, ExpenseRepositoryError> {
        Ok(None)
    }

    async fn list_by_owner(
        &self,
        _owner: &UserId,
        _order: ExpenseOrder,
    ) -> Result<Vec<Expense>, ExpenseRepositoryError> {
        Ok(Vec::new())
    }

    async fn update(
        &self,
        _expense: &Expense,
        _updated_at: DateTime<Utc>,
    ) -> Result<bool, ExpenseRepositoryError> {
        Ok(false)
    }

    async fn delete(&self, _id: &ExpenseId) -> Result<bool, ExpenseRepositoryError> {
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn fixture_never_finds_anything() {
        let repo = FixtureExpenseRepository;
        let id = ExpenseId::random();
        assert_eq!(repo.find_by_id(&id).await, Ok(None));
        assert_eq!(repo.delete(&id).await, Ok(false));
        let listed = repo
            .list_by_owner(&UserId::random(), ExpenseOrder::NewestFirst)
            .await
            .expect("fixture list succeeds");
        assert!(listed.is_empty());
    }

    #[rstest]
    fn connection_error_names_the_cause() {
        let err = ExpenseRepositoryError::connection("pool timed out");
        assert_eq!(
            err.to_string(),
            "expense repository connection failed: pool timed out"
        );
    }
}
