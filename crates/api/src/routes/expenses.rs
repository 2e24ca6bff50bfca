//! Operating expense routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use crate::{AppState, middleware::AuthUser};
use vendia_db::entities::sea_orm_active_enums::ExpenseType;
use vendia_db::repositories::expense::{
    CreateExpenseInput, ExpenseError, ExpenseRepository, UpdateExpenseInput,
};

/// Creates the expense routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/expenses", get(list_expenses))
        .route("/expenses", post(create_expense))
        .route("/expenses/{expense_id}", get(get_expense))
        .route("/expenses/{expense_id}", put(update_expense))
        .route("/expenses/{expense_id}", delete(delete_expense))
}

/// Request body for recording an expense.
#[derive(Debug, Deserialize)]
pub struct CreateExpenseRequest {
    /// Expense date.
    pub expense_date: NaiveDate,
    /// Expense category.
    pub category: String,
    /// Expense type: fixed or variable.
    pub expense_type: String,
    /// Amount.
    pub amount: Decimal,
    /// Free-form description.
    pub description: Option<String>,
}

/// Request body for updating an expense.
#[derive(Debug, Deserialize)]
pub struct UpdateExpenseRequest {
    /// Expense date.
    pub expense_date: Option<NaiveDate>,
    /// Expense category.
    pub category: Option<String>,
    /// Expense type: fixed or variable.
    pub expense_type: Option<String>,
    /// Amount.
    pub amount: Option<Decimal>,
    /// Free-form description. Send null to clear.
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
}

/// Distinguishes an absent field (leave unchanged) from an explicit null
/// (clear the stored value).
fn double_option<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// Response for an expense.
#[derive(Debug, Serialize)]
pub struct ExpenseResponse {
    /// Expense ID.
    pub id: Uuid,
    /// Expense date.
    pub expense_date: NaiveDate,
    /// Expense category.
    pub category: String,
    /// Expense type.
    pub expense_type: String,
    /// Amount.
    pub amount: String,
    /// Free-form description.
    pub description: Option<String>,
}

impl From<vendia_db::entities::expenses::Model> for ExpenseResponse {
    fn from(model: vendia_db::entities::expenses::Model) -> Self {
        Self {
            id: model.id,
            expense_date: model.expense_date,
            category: model.category,
            expense_type: expense_type_to_string(model.expense_type).to_string(),
            amount: model.amount.to_string(),
            description: model.description,
        }
    }
}

/// GET /expenses - List the user's expenses.
async fn list_expenses(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    let repo = ExpenseRepository::new((*state.db).clone());

    match repo.list(auth.user_id()).await {
        Ok(expenses) => {
            let response: Vec<ExpenseResponse> =
                expenses.into_iter().map(ExpenseResponse::from).collect();
            (StatusCode::OK, Json(json!({ "expenses": response }))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list expenses");
            internal_error()
        }
    }
}

/// GET /expenses/{expense_id} - Fetch one expense.
async fn get_expense(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(expense_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = ExpenseRepository::new((*state.db).clone());

    match repo.find(auth.user_id(), expense_id).await {
        Ok(expense) => (StatusCode::OK, Json(ExpenseResponse::from(expense))).into_response(),
        Err(ExpenseError::NotFound(_)) => not_found(),
        Err(e) => {
            error!(error = %e, "Failed to fetch expense");
            internal_error()
        }
    }
}

/// POST /expenses - Record an expense.
async fn create_expense(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateExpenseRequest>,
) -> impl IntoResponse {
    if payload.amount.is_sign_negative() {
        return negative_amount();
    }

    let Some(expense_type) = string_to_expense_type(&payload.expense_type) else {
        return invalid_expense_type();
    };

    let repo = ExpenseRepository::new((*state.db).clone());
    let input = CreateExpenseInput {
        user_id: auth.user_id(),
        expense_date: payload.expense_date,
        category: payload.category,
        expense_type,
        amount: payload.amount,
        description: payload.description,
    };

    match repo.create(input).await {
        Ok(expense) => {
            info!(user_id = %auth.user_id(), expense_id = %expense.id, "Expense recorded");
            (StatusCode::CREATED, Json(ExpenseResponse::from(expense))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create expense");
            internal_error()
        }
    }
}

/// PUT /expenses/{expense_id} - Update an expense.
async fn update_expense(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(expense_id): Path<Uuid>,
    Json(payload): Json<UpdateExpenseRequest>,
) -> impl IntoResponse {
    if payload.amount.is_some_and(|d| d.is_sign_negative()) {
        return negative_amount();
    }

    let expense_type = match payload.expense_type.as_deref() {
        None => None,
        Some(raw) => match string_to_expense_type(raw) {
            Some(t) => Some(t),
            None => return invalid_expense_type(),
        },
    };

    let repo = ExpenseRepository::new((*state.db).clone());
    let input = UpdateExpenseInput {
        expense_date: payload.expense_date,
        category: payload.category,
        expense_type,
        amount: payload.amount,
        description: payload.description,
    };

    match repo.update(auth.user_id(), expense_id, input).await {
        Ok(expense) => {
            info!(user_id = %auth.user_id(), expense_id = %expense.id, "Expense updated");
            (StatusCode::OK, Json(ExpenseResponse::from(expense))).into_response()
        }
        Err(ExpenseError::NotFound(_)) => not_found(),
        Err(e) => {
            error!(error = %e, "Failed to update expense");
            internal_error()
        }
    }
}

/// DELETE /expenses/{expense_id} - Delete an expense.
async fn delete_expense(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(expense_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = ExpenseRepository::new((*state.db).clone());

    match repo.delete(auth.user_id(), expense_id).await {
        Ok(()) => {
            info!(user_id = %auth.user_id(), expense_id = %expense_id, "Expense deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(ExpenseError::NotFound(_)) => not_found(),
        Err(e) => {
            error!(error = %e, "Failed to delete expense");
            internal_error()
        }
    }
}

/// Converts an expense type string to the enum.
fn string_to_expense_type(raw: &str) -> Option<ExpenseType> {
    match raw {
        "fixed" => Some(ExpenseType::Fixed),
        "variable" => Some(ExpenseType::Variable),
        _ => None,
    }
}

/// Converts an expense type enum to its wire string.
const fn expense_type_to_string(expense_type: ExpenseType) -> &'static str {
    match expense_type {
        ExpenseType::Fixed => "fixed",
        ExpenseType::Variable => "variable",
    }
}

fn not_found() -> axum::response::Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "not_found",
            "message": "Expense not found"
        })),
    )
        .into_response()
}

fn negative_amount() -> axum::response::Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "error": "invalid_amount",
            "message": "Amount must not be negative"
        })),
    )
        .into_response()
}

fn invalid_expense_type() -> axum::response::Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "error": "invalid_expense_type",
            "message": "Expense type must be one of: fixed, variable"
        })),
    )
        .into_response()
}

fn internal_error() -> axum::response::Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": "internal_error",
            "message": "An error occurred"
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("fixed", Some(ExpenseType::Fixed))]
    #[case("variable", Some(ExpenseType::Variable))]
    #[case("Fixed", None)]
    #[case("one_off", None)]
    fn test_string_to_expense_type(#[case] raw: &str, #[case] expected: Option<ExpenseType>) {
        assert_eq!(string_to_expense_type(raw), expected);
    }
}
