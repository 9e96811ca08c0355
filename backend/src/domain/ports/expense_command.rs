//! Driving port for expense mutations.
//!
//! Every request names the caller; the service applies the ownership guard
//! before touching an existing record.

use async_trait::async_trait;

use crate::domain::{Error, Expense, ExpenseFields, ExpenseId, UserId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateExpenseRequest {
    pub owner_id: UserId,
    pub fields: ExpenseFields,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateExpenseRequest {
    pub caller: UserId,
    pub expense_id: ExpenseId,
    pub fields: ExpenseFields,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteExpenseRequest {
    pub caller: UserId,
    pub expense_id: ExpenseId,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExpenseCommand: Send + Sync {
    /// Persist a new expense owned by the caller and return it.
    async fn create_expense(&self, request: CreateExpenseRequest) -> Result<Expense, Error>;

    /// Replace the mutable fields of an expense the caller owns.
    async fn update_expense(&self, request: UpdateExpenseRequest) -> Result<Expense, Error>;

    /// Permanently remove an expense the caller owns.
    async fn delete_expense(&self, request: DeleteExpenseRequest) -> Result<(), Error>;
}
