use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{ExpenseOrder, ExpenseRepository, ExpenseRepositoryError};
use crate::domain::{Expense, ExpenseId, UserId};

use super::poisoned;

/// Expenses kept in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryExpenseRepository {
    rows: Mutex<Vec<Expense>>,
}

impl InMemoryExpenseRepository {
    fn rows(&self) -> Result<MutexGuard<'_, Vec<Expense>>, ExpenseRepositoryError> {
        self.rows
            .lock()
            .map_err(|_| ExpenseRepositoryError::query(poisoned("expense store")))
    }
}

#[async_trait]
impl ExpenseRepository for InMemoryExpenseRepository {
    async fn insert(&self, expense: &Expense) -> Result<(), ExpenseRepositoryError> {
        let mut rows = self.rows()?;
        if rows.iter().any(|row| row.id() == expense.id()) {
            return Err(ExpenseRepositoryError::query(format!(
                "duplicate expense id {}",
                expense.id()
            )));
        }
        rows.push(expense.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &ExpenseId) -> Result<Option<Expense>, ExpenseRepositoryError> {
        Ok(self.rows()?.iter().find(|row| row.id() == *id).cloned())
    }

    async fn list_by_owner(
        &self,
        owner: &UserId,
        order: ExpenseOrder,
    ) -> Result<Vec<Expense>, ExpenseRepositoryError> {
        let mut owned: Vec<Expense> = self
            .rows()?
            .iter()
            .filter(|row| row.owner_id() == owner)
            .cloned()
            .collect();
        // Stable sort keeps insertion order among equal timestamps.
        owned.sort_by_key(Expense::created_at);
        if order == ExpenseOrder::NewestFirst {
            owned.reverse();
        }
        Ok(owned)
    }

    async fn update(
        &self,
        expense: &Expense,
        _updated_at: DateTime<Utc>,
    ) -> Result<bool, ExpenseRepositoryError> {
        let mut rows = self.rows()?;
        match rows.iter_mut().find(|row| row.id() == expense.id()) {
            Some(row) => {
                *row = expense.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &ExpenseId) -> Result<bool, ExpenseRepositoryError> {
        let mut rows = self.rows()?;
        let before = rows.len();
        rows.retain(|row| row.id() != *id);
        Ok(rows.len() != before)
    }
}
