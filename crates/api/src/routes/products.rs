//! Product catalog routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use crate::{AppState, middleware::AuthUser};
use vendia_db::repositories::product::{
    CreateProductInput, ProductError, ProductRepository, UpdateProductInput,
};

/// Creates the product routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(list_products))
        .route("/products", post(create_product))
        .route("/products/{product_id}", get(get_product))
        .route("/products/{product_id}", put(update_product))
        .route("/products/{product_id}", delete(delete_product))
}

/// Request body for creating a product.
#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    /// Product name.
    pub name: String,
    /// Product category.
    pub category: String,
    /// Unit cost price.
    pub cost_price: Decimal,
    /// Unit selling price.
    pub selling_price: Decimal,
    /// Baseline on-hand count (default: 0).
    pub stock: Option<i64>,
}

/// Request body for updating a product.
#[derive(Debug, Deserialize)]
pub struct UpdateProductRequest {
    /// Product name.
    pub name: Option<String>,
    /// Product category.
    pub category: Option<String>,
    /// Unit cost price.
    pub cost_price: Option<Decimal>,
    /// Unit selling price.
    pub selling_price: Option<Decimal>,
    /// Baseline on-hand count.
    pub stock: Option<i64>,
}

/// Response for a product.
#[derive(Debug, Serialize)]
pub struct ProductResponse {
    /// Product ID.
    pub id: Uuid,
    /// Product name.
    pub name: String,
    /// Product category.
    pub category: String,
    /// Unit cost price.
    pub cost_price: String,
    /// Unit selling price.
    pub selling_price: String,
    /// Baseline on-hand count.
    pub stock: i64,
}

impl From<vendia_db::entities::products::Model> for ProductResponse {
    fn from(model: vendia_db::entities::products::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            category: model.category,
            cost_price: model.cost_price.to_string(),
            selling_price: model.selling_price.to_string(),
            stock: model.stock,
        }
    }
}

/// GET /products - List the user's catalog.
async fn list_products(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    let repo = ProductRepository::new((*state.db).clone());

    match repo.list(auth.user_id()).await {
        Ok(products) => {
            let response: Vec<ProductResponse> =
                products.into_iter().map(ProductResponse::from).collect();
            (StatusCode::OK, Json(json!({ "products": response }))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list products");
            internal_error()
        }
    }
}

/// GET /products/{product_id} - Fetch one product.
async fn get_product(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(product_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = ProductRepository::new((*state.db).clone());

    match repo.find(auth.user_id(), product_id).await {
        Ok(product) => (StatusCode::OK, Json(ProductResponse::from(product))).into_response(),
        Err(ProductError::NotFound(_)) => not_found(),
        Err(e) => {
            error!(error = %e, "Failed to fetch product");
            internal_error()
        }
    }
}

/// POST /products - Create a product.
async fn create_product(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateProductRequest>,
) -> impl IntoResponse {
    if payload.cost_price.is_sign_negative() || payload.selling_price.is_sign_negative() {
        return negative_amount();
    }

    let repo = ProductRepository::new((*state.db).clone());
    let input = CreateProductInput {
        user_id: auth.user_id(),
        name: payload.name,
        category: payload.category,
        cost_price: payload.cost_price,
        selling_price: payload.selling_price,
        stock: payload.stock.unwrap_or(0),
    };

    match repo.create(input).await {
        Ok(product) => {
            info!(user_id = %auth.user_id(), product_id = %product.id, "Product created");
            (StatusCode::CREATED, Json(ProductResponse::from(product))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create product");
            internal_error()
        }
    }
}

/// PUT /products/{product_id} - Update a product.
async fn update_product(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(product_id): Path<Uuid>,
    Json(payload): Json<UpdateProductRequest>,
) -> impl IntoResponse {
    if payload.cost_price.is_some_and(|d| d.is_sign_negative())
        || payload.selling_price.is_some_and(|d| d.is_sign_negative())
    {
        return negative_amount();
    }

    let repo = ProductRepository::new((*state.db).clone());
    let input = UpdateProductInput {
        name: payload.name,
        category: payload.category,
        cost_price: payload.cost_price,
        selling_price: payload.selling_price,
        stock: payload.stock,
    };

    match repo.update(auth.user_id(), product_id, input).await {
        Ok(product) => {
            info!(user_id = %auth.user_id(), product_id = %product.id, "Product updated");
            (StatusCode::OK, Json(ProductResponse::from(product))).into_response()
        }
        Err(ProductError::NotFound(_)) => not_found(),
        Err(e) => {
            error!(error = %e, "Failed to update product");
            internal_error()
        }
    }
}

/// DELETE /products/{product_id} - Delete a product.
async fn delete_product(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(product_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = ProductRepository::new((*state.db).clone());

    match repo.delete(auth.user_id(), product_id).await {
        Ok(()) => {
            info!(user_id = %auth.user_id(), product_id = %product_id, "Product deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(ProductError::NotFound(_)) => not_found(),
        Err(e) => {
            error!(error = %e, "Failed to delete product");
            internal_error()
        }
    }
}

fn not_found() -> axum::response::Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "not_found",
            "message": "Product not found"
        })),
    )
        .into_response()
}

fn negative_amount() -> axum::response::Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "error": "invalid_amount",
            "message": "Prices must not be negative"
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
