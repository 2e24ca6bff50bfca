//! Purchase (vendor order) routes.

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
use vendia_db::entities::sea_orm_active_enums::PaymentStatus;
use vendia_db::repositories::purchase::{
    CreatePurchaseInput, PurchaseError, PurchaseRepository, UpdatePurchaseInput,
};

/// Creates the purchase routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/purchases", get(list_purchases))
        .route("/purchases", post(create_purchase))
        .route("/purchases/{purchase_id}", get(get_purchase))
        .route("/purchases/{purchase_id}", put(update_purchase))
        .route("/purchases/{purchase_id}", delete(delete_purchase))
}

/// Request body for creating a purchase.
#[derive(Debug, Deserialize)]
pub struct CreatePurchaseRequest {
    /// Purchased product ID.
    pub product_id: Uuid,
    /// Vendor name.
    pub vendor_name: String,
    /// Quantity purchased.
    pub quantity_purchased: i64,
    /// Unit cost price.
    pub cost_price: Decimal,
    /// Order date.
    pub order_date: NaiveDate,
    /// Vendor payment due date.
    pub payment_due: NaiveDate,
    /// Payment status: pending, completed, overdue (default: pending).
    pub payment_status: Option<String>,
}

/// Request body for updating a purchase.
#[derive(Debug, Deserialize)]
pub struct UpdatePurchaseRequest {
    /// Vendor name.
    pub vendor_name: Option<String>,
    /// Quantity purchased.
    pub quantity_purchased: Option<i64>,
    /// Unit cost price.
    pub cost_price: Option<Decimal>,
    /// Order date.
    pub order_date: Option<NaiveDate>,
    /// Vendor payment due date.
    pub payment_due: Option<NaiveDate>,
    /// Payment status: pending, completed, overdue.
    pub payment_status: Option<String>,
}

/// Response for a purchase.
#[derive(Debug, Serialize)]
pub struct PurchaseResponse {
    /// Purchase ID.
    pub id: Uuid,
    /// Purchased product ID.
    pub product_id: Uuid,
    /// Vendor name.
    pub vendor_name: String,
    /// Quantity purchased.
    pub quantity_purchased: i64,
    /// Unit cost price.
    pub cost_price: String,
    /// Order date.
    pub order_date: NaiveDate,
    /// Vendor payment due date.
    pub payment_due: NaiveDate,
    /// Payment status.
    pub payment_status: String,
}

impl From<vendia_db::entities::purchases::Model> for PurchaseResponse {
    fn from(model: vendia_db::entities::purchases::Model) -> Self {
        Self {
            id: model.id,
            product_id: model.product_id,
            vendor_name: model.vendor_name,
            quantity_purchased: model.quantity_purchased,
            cost_price: model.cost_price.to_string(),
            order_date: model.order_date,
            payment_due: model.payment_due,
            payment_status: payment_status_to_string(model.payment_status).to_string(),
        }
    }
}

/// GET /purchases - List the user's purchases.
async fn list_purchases(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    let repo = PurchaseRepository::new((*state.db).clone());

    match repo.list(auth.user_id()).await {
        Ok(purchases) => {
            let response: Vec<PurchaseResponse> =
                purchases.into_iter().map(PurchaseResponse::from).collect();
            (StatusCode::OK, Json(json!({ "purchases": response }))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list purchases");
            internal_error()
        }
    }
}

/// GET /purchases/{purchase_id} - Fetch one purchase.
async fn get_purchase(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(purchase_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = PurchaseRepository::new((*state.db).clone());

    match repo.find(auth.user_id(), purchase_id).await {
        Ok(purchase) => (StatusCode::OK, Json(PurchaseResponse::from(purchase))).into_response(),
        Err(PurchaseError::NotFound(_)) => not_found(),
        Err(e) => {
            error!(error = %e, "Failed to fetch purchase");
            internal_error()
        }
    }
}

/// POST /purchases - Record a purchase.
async fn create_purchase(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreatePurchaseRequest>,
) -> impl IntoResponse {
    if payload.quantity_purchased <= 0 {
        return invalid_quantity();
    }
    if payload.cost_price.is_sign_negative() {
        return negative_amount();
    }

    let payment_status = match payload.payment_status.as_deref() {
        None => PaymentStatus::Pending,
        Some(raw) => match string_to_payment_status(raw) {
            Some(status) => status,
            None => return invalid_payment_status(),
        },
    };

    let repo = PurchaseRepository::new((*state.db).clone());
    let input = CreatePurchaseInput {
        user_id: auth.user_id(),
        product_id: payload.product_id,
        vendor_name: payload.vendor_name,
        quantity_purchased: payload.quantity_purchased,
        cost_price: payload.cost_price,
        order_date: payload.order_date,
        payment_due: payload.payment_due,
        payment_status,
    };

    match repo.create(input).await {
        Ok(purchase) => {
            info!(user_id = %auth.user_id(), purchase_id = %purchase.id, "Purchase recorded");
            (StatusCode::CREATED, Json(PurchaseResponse::from(purchase))).into_response()
        }
        Err(PurchaseError::ProductNotFound(product_id)) => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "unknown_product",
                "message": format!("Product '{product_id}' is not in your catalog")
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to create purchase");
            internal_error()
        }
    }
}

/// PUT /purchases/{purchase_id} - Update a purchase.
async fn update_purchase(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(purchase_id): Path<Uuid>,
    Json(payload): Json<UpdatePurchaseRequest>,
) -> impl IntoResponse {
    if payload.quantity_purchased.is_some_and(|q| q <= 0) {
        return invalid_quantity();
    }
    if payload.cost_price.is_some_and(|d| d.is_sign_negative()) {
        return negative_amount();
    }

    let payment_status = match payload.payment_status.as_deref() {
        None => None,
        Some(raw) => match string_to_payment_status(raw) {
            Some(status) => Some(status),
            None => return invalid_payment_status(),
        },
    };

    let repo = PurchaseRepository::new((*state.db).clone());
    let input = UpdatePurchaseInput {
        vendor_name: payload.vendor_name,
        quantity_purchased: payload.quantity_purchased,
        cost_price: payload.cost_price,
        order_date: payload.order_date,
        payment_due: payload.payment_due,
        payment_status,
    };

    match repo.update(auth.user_id(), purchase_id, input).await {
        Ok(purchase) => {
            info!(user_id = %auth.user_id(), purchase_id = %purchase.id, "Purchase updated");
            (StatusCode::OK, Json(PurchaseResponse::from(purchase))).into_response()
        }
        Err(PurchaseError::NotFound(_)) => not_found(),
        Err(e) => {
            error!(error = %e, "Failed to update purchase");
            internal_error()
        }
    }
}

/// DELETE /purchases/{purchase_id} - Delete a purchase.
async fn delete_purchase(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(purchase_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = PurchaseRepository::new((*state.db).clone());

    match repo.delete(auth.user_id(), purchase_id).await {
        Ok(()) => {
            info!(user_id = %auth.user_id(), purchase_id = %purchase_id, "Purchase deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(PurchaseError::NotFound(_)) => not_found(),
        Err(e) => {
            error!(error = %e, "Failed to delete purchase");
            internal_error()
        }
    }
}

/// Converts a payment status string to the enum.
fn string_to_payment_status(raw: &str) -> Option<PaymentStatus> {
    match raw {
        "pending" => Some(PaymentStatus::Pending),
        "completed" => Some(PaymentStatus::Completed),
        "overdue" => Some(PaymentStatus::Overdue),
        _ => None,
    }
}

/// Converts a payment status enum to its wire string.
const fn payment_status_to_string(status: PaymentStatus) -> &'static str {
    match status {
        PaymentStatus::Pending => "pending",
        PaymentStatus::Completed => "completed",
        PaymentStatus::Overdue => "overdue",
    }
}

fn not_found() -> axum::response::Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "not_found",
            "message": "Purchase not found"
        })),
    )
        .into_response()
}

fn invalid_quantity() -> axum::response::Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "error": "invalid_quantity",
            "message": "Quantity must be positive"
        })),
    )
        .into_response()
}

fn negative_amount() -> axum::response::Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "error": "invalid_amount",
            "message": "Cost price must not be negative"
        })),
    )
        .into_response()
}

fn invalid_payment_status() -> axum::response::Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "error": "invalid_payment_status",
            "message": "Payment status must be one of: pending, completed, overdue"
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
    #[case("pending", Some(PaymentStatus::Pending))]
    #[case("completed", Some(PaymentStatus::Completed))]
    #[case("overdue", Some(PaymentStatus::Overdue))]
    #[case("Pending", None)]
    #[case("paid", None)]
    fn test_string_to_payment_status(#[case] raw: &str, #[case] expected: Option<PaymentStatus>) {
        assert_eq!(string_to_payment_status(raw), expected);
    }

    #[test]
    fn test_payment_status_round_trip() {
        for status in [
            PaymentStatus::Pending,
            PaymentStatus::Completed,
            PaymentStatus::Overdue,
        ] {
            assert_eq!(
                string_to_payment_status(payment_status_to_string(status)),
                Some(status)
            );
        }
    }
}
