//! Driving port for expense reads.

use async_trait::async_trait;

use crate::domain::{Error, Expense, ExpenseSummary, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExpenseQuery: Send + Sync {
    /// The caller's expenses, newest first.
    async fn list_expenses(&self, caller: &UserId) -> Result<Vec<Expense>, Error>;

    /// Totals over the caller's expenses.
    async fn summarize(&self, caller: &UserId) -> Result<ExpenseSummary, Error>;
}
