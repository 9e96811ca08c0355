//! PostgreSQL-backed `ExpenseRepository`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ExpenseOrder, ExpenseRepository, ExpenseRepositoryError};
use crate::domain::{Amount, Category, Expense, ExpenseFields, ExpenseId, ExpenseTitle, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{ExpenseRow, ExpenseUpdate, NewExpenseRow};
use super::pool::{DbPool, PoolError};
use super::schema::expenses;

#[derive(Clone)]
pub struct DieselExpenseRepository {
    pool: DbPool,
}

impl DieselExpenseRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ExpenseRepositoryError {
    map_basic_pool_error(error, ExpenseRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> ExpenseRepositoryError {
    map_basic_diesel_error(
        error,
        ExpenseRepositoryError::query,
        ExpenseRepositoryError::connection,
    )
}

/// Rebuild a domain expense, rejecting rows that no longer validate.
fn row_to_expense(row: ExpenseRow) -> Result<Expense, ExpenseRepositoryError> {
    let ExpenseRow {
        id,
        owner_id,
        title,
        category,
        amount_minor,
        created_at,
    } = row;
    let corrupt = |what: &str, err: &dyn std::fmt::Display| {
        ExpenseRepositoryError::query(format!("corrupt {what} on expense {id}: {err}"))
    };

    let fields = ExpenseFields {
        title: ExpenseTitle::new(&title).map_err(|err| corrupt("title", &err))?,
        category: category
            .parse::<Category>()
            .map_err(|err| corrupt("category", &err))?,
        amount: Amount::from_minor_units(amount_minor).map_err(|err| corrupt("amount", &err))?,
    };
    Ok(Expense::new(
        ExpenseId::from_uuid(id),
        UserId::from_uuid(owner_id),
        fields,
        created_at,
    ))
}

#[async_trait]
impl ExpenseRepository for DieselExpenseRepository {
    async fn insert(&self, expense: &Expense) -> Result<(), ExpenseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewExpenseRow {
            id: *expense.id().as_uuid(),
            owner_id: *expense.owner_id().as_uuid(),
            title: expense.title().as_str(),
            category: expense.category().as_str(),
            amount_minor: expense.amount().minor_units(),
            created_at: expense.created_at(),
        };

        diesel::insert_into(expenses::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: &ExpenseId) -> Result<Option<Expense>, ExpenseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = expenses::table
            .filter(expenses::id.eq(id.as_uuid()))
            .select(ExpenseRow::as_select())
            .first::<ExpenseRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_expense).transpose()
    }

    async fn list_by_owner(
        &self,
        owner: &UserId,
        order: ExpenseOrder,
    ) -> Result<Vec<Expense>, ExpenseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let query = expenses::table
            .filter(expenses::owner_id.eq(owner.as_uuid()))
            .select(ExpenseRow::as_select());
        let rows: Vec<ExpenseRow> = match order {
            ExpenseOrder::NewestFirst => {
                query
                    .order((expenses::created_at.desc(), expenses::seq.desc()))
                    .load::<ExpenseRow>(&mut conn)
                    .await
            }
            ExpenseOrder::OldestFirst => {
                query
                    .order((expenses::created_at.asc(), expenses::seq.asc()))
                    .load::<ExpenseRow>(&mut conn)
                    .await
            }
        }
        .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_expense).collect()
    }

    async fn update(
        &self,
        expense: &Expense,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, ExpenseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changes = ExpenseUpdate {
            title: expense.title().as_str(),
            category: expense.category().as_str(),
            amount_minor: expense.amount().minor_units(),
            updated_at,
        };

        let target = expenses::table.filter(expenses::id.eq(*expense.id().as_uuid()));
        let touched = diesel::update(target)
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(touched > 0)
    }

    async fn delete(&self, id: &ExpenseId) -> Result<bool, ExpenseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let removed = diesel::delete(expenses::table.filter(expenses::id.eq(id.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(removed > 0)
    }
}
