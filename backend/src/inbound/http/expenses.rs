//! Expense HTTP handlers.
//!
//! ```text
//! GET    /api/expenses
//! POST   /api/expenses          {"title":"Coffee","category":"Food & Dining","amount":4.5}
//! PUT    /api/expenses/{id}     {"title":"Coffee","category":"Food & Dining","amount":5}
//! DELETE /api/expenses/{id}
//! GET    /api/expenses/summary
//! ```

use actix_web::{delete, get, post, put, web};
use chrono::SecondsFormat;
use rust_decimal::Decimal;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::ports::{CreateExpenseRequest, DeleteExpenseRequest, UpdateExpenseRequest};
use crate::domain::{
    CategoryTotal, Error, Expense, ExpenseDraft, ExpenseFields, ExpenseId, ExpenseSummary,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_amount, validation_error};

/// Body for create and update.
///
/// Fields are optional at the JSON level so a missing field is reported
/// alongside the others instead of failing deserialisation.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseRequestBody {
    #[schema(example = "Coffee")]
    pub title: Option<String>,
    #[schema(example = "Food & Dining")]
    pub category: Option<String>,
    /// JSON number or numeric string.
    #[schema(value_type = f64, example = 4.5)]
    pub amount: Option<Value>,
}

impl ExpenseRequestBody {
    fn into_fields(self) -> Result<ExpenseFields, Error> {
        let amount = parse_amount(self.amount.as_ref());
        ExpenseDraft {
            title: self.title,
            category: self.category,
            amount,
        }
        .validate()
        .map_err(|errors| validation_error(&errors))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
struct FloatAmount(#[serde(with = "rust_decimal::serde::float")] Decimal);

/// Expense as returned to clients.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseResponseBody {
    #[schema(format = "uuid")]
    pub id: String,
    #[schema(format = "uuid")]
    pub owner_id: String,
    pub title: String,
    #[schema(example = "Food & Dining")]
    pub category: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 4.5)]
    pub amount: Decimal,
    #[schema(format = "date-time")]
    pub created_at: String,
}

impl From<Expense> for ExpenseResponseBody {
    fn from(value: Expense) -> Self {
        Self {
            id: value.id().to_string(),
            owner_id: value.owner_id().to_string(),
            title: value.title().as_str().to_owned(),
            category: value.category().as_str().to_owned(),
            amount: value.amount().value(),
            created_at: value
                .created_at()
                .to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// Category totals in first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryBreakdownBody(Vec<CategoryTotal>);

impl Serialize for CategoryBreakdownBody {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for entry in &self.0 {
            map.serialize_entry(entry.category.as_str(), &FloatAmount(entry.total))?;
        }
        map.end()
    }
}

/// Aggregate totals for the caller.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponseBody {
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 175.0)]
    pub total_amount: Decimal,
    #[schema(example = 3)]
    pub total_expenses: u64,
    #[schema(
        value_type = std::collections::HashMap<String, f64>,
        example = json!({"Travel": 150.0, "Other": 25.0})
    )]
    pub category_breakdown: CategoryBreakdownBody,
}

impl From<ExpenseSummary> for SummaryResponseBody {
    fn from(value: ExpenseSummary) -> Self {
        Self {
            total_amount: value.total_amount,
            total_expenses: value.total_expenses,
            category_breakdown: CategoryBreakdownBody(value.category_breakdown),
        }
    }
}

/// Confirmation message returned by delete.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageBody {
    #[schema(example = "Expense removed")]
    pub msg: String,
}

fn parse_expense_id(raw: &str) -> Result<ExpenseId, Error> {
    raw.parse()
        .map_err(|_| Error::not_found("Expense not found"))
}

/// List the caller's expenses, newest first.
#[utoipa::path(
    get,
    path = "/api/expenses",
    responses(
        (status = 200, description = "Expenses", body = [ExpenseResponseBody]),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["expenses"],
    operation_id = "listExpenses",
    security(("AuthToken" = []))
)]
#[get("/expenses")]
pub async fn list_expenses(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
) -> ApiResult<web::Json<Vec<ExpenseResponseBody>>> {
    let expenses = state.expenses_query.list_expenses(caller.user_id()).await?;
    Ok(web::Json(
        expenses.into_iter().map(ExpenseResponseBody::from).collect(),
    ))
}

/// Record a new expense owned by the caller.
#[utoipa::path(
    post,
    path = "/api/expenses",
    request_body = ExpenseRequestBody,
    responses(
        (status = 200, description = "Created expense", body = ExpenseResponseBody),
        (status = 400, description = "Validation failed", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["expenses"],
    operation_id = "createExpense",
    security(("AuthToken" = []))
)]
#[post("/expenses")]
pub async fn create_expense(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    payload: web::Json<ExpenseRequestBody>,
) -> ApiResult<web::Json<ExpenseResponseBody>> {
    let fields = payload.into_inner().into_fields()?;
    let expense = state
        .expenses
        .create_expense(CreateExpenseRequest {
            owner_id: caller.into_inner(),
            fields,
        })
        .await?;
    Ok(web::Json(expense.into()))
}

/// Aggregate totals over the caller's expenses.
#[utoipa::path(
    get,
    path = "/api/expenses/summary",
    responses(
        (status = 200, description = "Summary", body = SummaryResponseBody),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["expenses"],
    operation_id = "expenseSummary",
    security(("AuthToken" = []))
)]
#[get("/expenses/summary")]
pub async fn expense_summary(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
) -> ApiResult<web::Json<SummaryResponseBody>> {
    let summary = state.expenses_query.summarize(caller.user_id()).await?;
    Ok(web::Json(summary.into()))
}

/// Replace title, category and amount of an expense the caller owns.
#[utoipa::path(
    put,
    path = "/api/expenses/{id}",
    params(("id" = String, Path, description = "Expense id")),
    request_body = ExpenseRequestBody,
    responses(
        (status = 200, description = "Updated expense", body = ExpenseResponseBody),
        (status = 400, description = "Validation failed", body = ErrorSchema),
        (status = 401, description = "Unauthorized or not the owner", body = ErrorSchema),
        (status = 404, description = "Expense not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["expenses"],
    operation_id = "updateExpense",
    security(("AuthToken" = []))
)]
#[put("/expenses/{id}")]
pub async fn update_expense(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    path: web::Path<String>,
    payload: web::Json<ExpenseRequestBody>,
) -> ApiResult<web::Json<ExpenseResponseBody>> {
    let expense_id = parse_expense_id(&path)?;
    let fields = payload.into_inner().into_fields()?;
    let expense = state
        .expenses
        .update_expense(UpdateExpenseRequest {
            caller: caller.into_inner(),
            expense_id,
            fields,
        })
        .await?;
    Ok(web::Json(expense.into()))
}

/// Permanently delete an expense the caller owns.
#[utoipa::path(
    delete,
    path = "/api/expenses/{id}",
    params(("id" = String, Path, description = "Expense id")),
    responses(
        (status = 200, description = "Expense removed", body = MessageBody),
        (status = 401, description = "Unauthorized or not the owner", body = ErrorSchema),
        (status = 404, description = "Expense not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["expenses"],
    operation_id = "deleteExpense",
    security(("AuthToken" = []))
)]
#[delete("/expenses/{id}")]
pub async fn delete_expense(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<MessageBody>> {
    let expense_id = parse_expense_id(&path)?;
    state
        .expenses
        .delete_expense(DeleteExpenseRequest {
            caller: caller.into_inner(),
            expense_id,
        })
        .await?;
    Ok(web::Json(MessageBody {
        msg: "Expense removed".to_owned(),
    }))
}

/// Register every expense route on a scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(expense_summary)
        .service(list_expenses)
        .service(create_expense)
        .service(update_expense)
        .service(delete_expense);
}

#[cfg(test)]
#[path = "expenses_tests.rs"]
mod tests;
