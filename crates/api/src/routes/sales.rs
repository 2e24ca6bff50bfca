//! Sales order routes.

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
use vendia_db::repositories::sale::{
    CreateSaleInput, SaleError, SaleRepository, UpdateSaleInput,
};

/// Creates the sales routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/sales", get(list_sales))
        .route("/sales", post(create_sale))
        .route("/sales/{sale_id}", get(get_sale))
        .route("/sales/{sale_id}", put(update_sale))
        .route("/sales/{sale_id}", delete(delete_sale))
}

/// Request body for recording a sale.
#[derive(Debug, Deserialize)]
pub struct CreateSaleRequest {
    /// Sold product ID.
    pub product_id: Uuid,
    /// Quantity sold.
    pub quantity_sold: i64,
    /// Unit selling price.
    pub selling_price: Decimal,
    /// Sale date.
    pub sale_date: NaiveDate,
    /// Whether the order has shipped (default: false).
    pub shipped: Option<bool>,
    /// Whether payment has been received (default: false).
    pub payment_received: Option<bool>,
}

/// Request body for updating a sale.
#[derive(Debug, Deserialize)]
pub struct UpdateSaleRequest {
    /// Quantity sold.
    pub quantity_sold: Option<i64>,
    /// Unit selling price.
    pub selling_price: Option<Decimal>,
    /// Sale date.
    pub sale_date: Option<NaiveDate>,
    /// Whether the order has shipped.
    pub shipped: Option<bool>,
    /// Whether payment has been received.
    pub payment_received: Option<bool>,
}

/// Response for a sale.
#[derive(Debug, Serialize)]
pub struct SaleResponse {
    /// Sale ID.
    pub id: Uuid,
    /// Sold product ID.
    pub product_id: Uuid,
    /// Quantity sold.
    pub quantity_sold: i64,
    /// Unit selling price.
    pub selling_price: String,
    /// Sale date.
    pub sale_date: NaiveDate,
    /// Whether the order has shipped.
    pub shipped: bool,
    /// Whether payment has been received.
    pub payment_received: bool,
}

impl From<vendia_db::entities::sales::Model> for SaleResponse {
    fn from(model: vendia_db::entities::sales::Model) -> Self {
        Self {
            id: model.id,
            product_id: model.product_id,
            quantity_sold: model.quantity_sold,
            selling_price: model.selling_price.to_string(),
            sale_date: model.sale_date,
            shipped: model.shipped,
            payment_received: model.payment_received,
        }
    }
}

/// GET /sales - List the user's sales.
async fn list_sales(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    let repo = SaleRepository::new((*state.db).clone());

    match repo.list(auth.user_id()).await {
        Ok(sales) => {
            let response: Vec<SaleResponse> = sales.into_iter().map(SaleResponse::from).collect();
            (StatusCode::OK, Json(json!({ "sales": response }))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list sales");
            internal_error()
        }
    }
}

/// GET /sales/{sale_id} - Fetch one sale.
async fn get_sale(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(sale_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = SaleRepository::new((*state.db).clone());

    match repo.find(auth.user_id(), sale_id).await {
        Ok(sale) => (StatusCode::OK, Json(SaleResponse::from(sale))).into_response(),
        Err(SaleError::NotFound(_)) => not_found(),
        Err(e) => {
            error!(error = %e, "Failed to fetch sale");
            internal_error()
        }
    }
}

/// POST /sales - Record a sale.
async fn create_sale(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateSaleRequest>,
) -> impl IntoResponse {
    if payload.quantity_sold <= 0 {
        return invalid_quantity();
    }
    if payload.selling_price.is_sign_negative() {
        return negative_amount();
    }

    let repo = SaleRepository::new((*state.db).clone());
    let input = CreateSaleInput {
        user_id: auth.user_id(),
        product_id: payload.product_id,
        quantity_sold: payload.quantity_sold,
        selling_price: payload.selling_price,
        sale_date: payload.sale_date,
        shipped: payload.shipped.unwrap_or(false),
        payment_received: payload.payment_received.unwrap_or(false),
    };

    match repo.create(input).await {
        Ok(sale) => {
            info!(user_id = %auth.user_id(), sale_id = %sale.id, "Sale recorded");
            (StatusCode::CREATED, Json(SaleResponse::from(sale))).into_response()
        }
        Err(SaleError::ProductNotFound(product_id)) => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "unknown_product",
                "message": format!("Product '{product_id}' is not in your catalog")
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to create sale");
            internal_error()
        }
    }
}

/// PUT /sales/{sale_id} - Update a sale.
async fn update_sale(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(sale_id): Path<Uuid>,
    Json(payload): Json<UpdateSaleRequest>,
) -> impl IntoResponse {
    if payload.quantity_sold.is_some_and(|q| q <= 0) {
        return invalid_quantity();
    }
    if payload.selling_price.is_some_and(|d| d.is_sign_negative()) {
        return negative_amount();
    }

    let repo = SaleRepository::new((*state.db).clone());
    let input = UpdateSaleInput {
        quantity_sold: payload.quantity_sold,
        selling_price: payload.selling_price,
        sale_date: payload.sale_date,
        shipped: payload.shipped,
        payment_received: payload.payment_received,
    };

    match repo.update(auth.user_id(), sale_id, input).await {
        Ok(sale) => {
            info!(user_id = %auth.user_id(), sale_id = %sale.id, "Sale updated");
            (StatusCode::OK, Json(SaleResponse::from(sale))).into_response()
        }
        Err(SaleError::NotFound(_)) => not_found(),
        Err(e) => {
            error!(error = %e, "Failed to update sale");
            internal_error()
        }
    }
}

/// DELETE /sales/{sale_id} - Delete a sale.
async fn delete_sale(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(sale_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = SaleRepository::new((*state.db).clone());

    match repo.delete(auth.user_id(), sale_id).await {
        Ok(()) => {
            info!(user_id = %auth.user_id(), sale_id = %sale_id, "Sale deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(SaleError::NotFound(_)) => not_found(),
        Err(e) => {
            error!(error = %e, "Failed to delete sale");
            internal_error()
        }
    }
}

fn not_found() -> axum::response::Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "not_found",
            "message": "Sale not found"
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
            "message": "Selling price must not be negative"
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
