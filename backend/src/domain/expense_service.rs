//! Expense use cases.
//!
//! [`ExpenseService`] implements both expense driving ports on top of an
//! [`ExpenseRepository`]. Per-record operations run find, guard, then write;
//! a write that touches nothing means the record vanished in between and is
//! reported as not found.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{error, info, warn};

use crate::domain::ownership::{OwnershipError, guard};
use crate::domain::ports::{
    CreateExpenseRequest, DeleteExpenseRequest, ExpenseCommand, ExpenseOrder, ExpenseQuery,
    ExpenseRepository, ExpenseRepositoryError, UpdateExpenseRequest,
};
use crate::domain::{Error, Expense, ExpenseId, ExpenseSummary, UserId};

const NOT_FOUND: &str = "Expense not found";
const NOT_OWNER: &str = "Not authorized";
const STORE_UNAVAILABLE: &str = "Service temporarily unavailable";

fn map_repository_error(error: ExpenseRepositoryError) -> Error {
    match error {
        ExpenseRepositoryError::Connection { message } => {
            error!(%message, "expense repository unavailable");
            Error::service_unavailable(STORE_UNAVAILABLE)
        }
        ExpenseRepositoryError::Query { message } => {
            Error::internal(format!("expense repository error: {message}"))
        }
    }
}

fn map_ownership_error(error: OwnershipError, caller: &UserId, expense_id: &ExpenseId) -> Error {
    match error {
        OwnershipError::NotFound => Error::not_found(NOT_FOUND),
        OwnershipError::NotOwner => {
            warn!(%caller, %expense_id, "caller does not own expense");
            Error::forbidden(NOT_OWNER)
        }
    }
}

#[derive(Clone)]
pub struct ExpenseService<R> {
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> ExpenseService<R> {
    /// # Examples
    /// ```
    /// # use std::sync::Arc;
    /// # use mockable::DefaultClock;
    /// use expense_tracker::domain::ExpenseService;
    /// use expense_tracker::domain::ports::FixtureExpenseRepository;
    ///
    /// let service = ExpenseService::new(
    ///     Arc::new(FixtureExpenseRepository),
    ///     Arc::new(DefaultClock),
    /// );
    /// # let _ = service;
    /// ```
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }
}

impl<R> ExpenseService<R>
where
    R: ExpenseRepository,
{
    async fn owned_expense(&self, caller: &UserId, id: &ExpenseId) -> Result<Expense, Error> {
        let found = self
            .repo
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?;
        guard(caller, found).map_err(|err| map_ownership_error(err, caller, id))
    }
}

#[async_trait]
impl<R> ExpenseCommand for ExpenseService<R>
where
    R: ExpenseRepository,
{
    async fn create_expense(&self, request: CreateExpenseRequest) -> Result<Expense, Error> {
        let CreateExpenseRequest { owner_id, fields } = request;
        let expense = Expense::new(ExpenseId::random(), owner_id, fields, self.clock.utc());

        self.repo
            .insert(&expense)
            .await
            .map_err(map_repository_error)?;

        info!(expense_id = %expense.id(), owner = %expense.owner_id(), "expense created");
        Ok(expense)
    }

    async fn update_expense(&self, request: UpdateExpenseRequest) -> Result<Expense, Error> {
        let UpdateExpenseRequest {
            caller,
            expense_id,
            fields,
        } = request;
        let revised = self
            .owned_expense(&caller, &expense_id)
            .await?
            .revise(fields);

        let touched = self
            .repo
            .update(&revised, self.clock.utc())
            .await
            .map_err(map_repository_error)?;
        if !touched {
            return Err(Error::not_found(NOT_FOUND));
        }

        info!(%expense_id, owner = %caller, "expense updated");
        Ok(revised)
    }

    async fn delete_expense(&self, request: DeleteExpenseRequest) -> Result<(), Error> {
        let DeleteExpenseRequest { caller, expense_id } = request;
        self.owned_expense(&caller, &expense_id).await?;

        let removed = self
            .repo
            .delete(&expense_id)
            .await
            .map_err(map_repository_error)?;
        if !removed {
            return Err(Error::not_found(NOT_FOUND));
        }

        info!(%expense_id, owner = %caller, "expense deleted");
        Ok(())
    }
}

#[async_trait]
impl<R> ExpenseQuery for ExpenseService<R>
where
    R: ExpenseRepository,
{
    async fn list_expenses(&self, caller: &UserId) -> Result<Vec<Expense>, Error> {
        self.repo
            .list_by_owner(caller, ExpenseOrder::NewestFirst)
            .await
            .map_err(map_repository_error)
    }

    async fn summarize(&self, caller: &UserId) -> Result<ExpenseSummary, Error> {
        let expenses = self
            .repo
            .list_by_owner(caller, ExpenseOrder::OldestFirst)
            .await
            .map_err(map_repository_error)?;
        Ok(ExpenseSummary::from_expenses(&expenses))
    }
}

#[cfg(test)]
#[path = "expense_service_tests.rs"]
mod tests;
