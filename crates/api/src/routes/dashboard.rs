//! Dashboard routes serving the aggregated metric views.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;
use uuid::Uuid;

use crate::{AppState, middleware::AuthUser};
use vendia_core::metrics::{
    CategoryProfit, CategoryTotal, ExpenseSummary, FinancialSummary, InventoryHolding,
    MetricsService, PayablesSummary, StockLevel,
};
use vendia_db::repositories::metrics::MetricsRepository;

/// Threshold below which a product is flagged as low stock.
const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 10;

/// Monthly holding cost rate, percent of inventory value.
const DEFAULT_HOLDING_RATE_PCT: Decimal = Decimal::TWO;

/// Simulated vendor payment term.
const DEFAULT_PAYMENT_TERM_DAYS: i64 = 30;

/// Creates the dashboard routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard/inventory", get(inventory_dashboard))
        .route("/dashboard/financials", get(financials_dashboard))
        .route("/dashboard/holding", get(holding_dashboard))
        .route("/dashboard/payables", get(payables_dashboard))
}

/// Query parameters for the inventory dashboard.
#[derive(Debug, Deserialize)]
pub struct InventoryQuery {
    /// Low stock threshold (default: 10).
    pub low_stock_threshold: Option<i64>,
}

/// Query parameters for the holding dashboard.
#[derive(Debug, Deserialize)]
pub struct HoldingQuery {
    /// Monthly holding rate in percent (default: 2).
    pub rate_pct: Option<Decimal>,
}

/// Query parameters for the payables dashboard.
#[derive(Debug, Deserialize)]
pub struct PayablesQuery {
    /// Simulated payment term in days (default: 30).
    pub term_days: Option<i64>,
}

/// One product's stock position on the wire.
#[derive(Debug, Serialize)]
pub struct StockLevelResponse {
    /// Product ID.
    pub product_id: Uuid,
    /// Product name.
    pub name: String,
    /// Product category.
    pub category: String,
    /// Live on-hand count.
    pub live_stock: i64,
    /// Stock valued at cost price.
    pub stock_value: String,
    /// Stock valued at selling price.
    pub potential_revenue: String,
}

impl From<StockLevel> for StockLevelResponse {
    fn from(level: StockLevel) -> Self {
        Self {
            product_id: level.product_id,
            name: level.name,
            category: level.category,
            live_stock: level.live_stock,
            stock_value: level.stock_value.to_string(),
            potential_revenue: level.potential_revenue.to_string(),
        }
    }
}

/// Inventory dashboard payload.
#[derive(Debug, Serialize)]
pub struct InventoryDashboardResponse {
    /// Stock position for every product.
    pub stock_levels: Vec<StockLevelResponse>,
    /// Products below the low stock threshold, most critical first.
    pub low_stock: Vec<StockLevelResponse>,
    /// Threshold used for the alerts.
    pub low_stock_threshold: i64,
}

/// Financial summary on the wire.
#[derive(Debug, Serialize)]
pub struct FinancialSummaryResponse {
    /// Total revenue.
    pub revenue: String,
    /// Cost of goods sold.
    pub cogs: String,
    /// Gross profit.
    pub gross_profit: String,
    /// Gross margin percentage.
    pub margin_pct: String,
}

impl From<FinancialSummary> for FinancialSummaryResponse {
    fn from(summary: FinancialSummary) -> Self {
        Self {
            revenue: summary.revenue.to_string(),
            cogs: summary.cogs.to_string(),
            gross_profit: summary.gross_profit.to_string(),
            margin_pct: summary.margin_pct.to_string(),
        }
    }
}

/// Per-category profit on the wire.
#[derive(Debug, Serialize)]
pub struct CategoryProfitResponse {
    /// Product category.
    pub category: String,
    /// Gross profit for the category.
    pub profit: String,
}

impl From<CategoryProfit> for CategoryProfitResponse {
    fn from(entry: CategoryProfit) -> Self {
        Self {
            category: entry.category,
            profit: entry.profit.to_string(),
        }
    }
}

/// Per-category expense total on the wire.
#[derive(Debug, Serialize)]
pub struct CategoryTotalResponse {
    /// Expense category.
    pub category: String,
    /// Total amount for the category.
    pub amount: String,
}

impl From<CategoryTotal> for CategoryTotalResponse {
    fn from(entry: CategoryTotal) -> Self {
        Self {
            category: entry.category,
            amount: entry.amount.to_string(),
        }
    }
}

/// Expense summary on the wire.
#[derive(Debug, Serialize)]
pub struct ExpenseSummaryResponse {
    /// Total expenses.
    pub total: String,
    /// Fixed expense total.
    pub fixed: String,
    /// Variable expense total.
    pub variable: String,
    /// Per-category totals, largest first.
    pub by_category: Vec<CategoryTotalResponse>,
}

impl From<ExpenseSummary> for ExpenseSummaryResponse {
    fn from(summary: ExpenseSummary) -> Self {
        Self {
            total: summary.total.to_string(),
            fixed: summary.fixed.to_string(),
            variable: summary.variable.to_string(),
            by_category: summary
                .by_category
                .into_iter()
                .map(CategoryTotalResponse::from)
                .collect(),
        }
    }
}

/// Financials dashboard payload.
#[derive(Debug, Serialize)]
pub struct FinancialsDashboardResponse {
    /// Revenue, COGS, gross profit, margin.
    pub summary: FinancialSummaryResponse,
    /// Gross profit by category, largest first.
    pub category_profit: Vec<CategoryProfitResponse>,
    /// Operating expense summary.
    pub expenses: ExpenseSummaryResponse,
}

/// Holding dashboard payload.
#[derive(Debug, Serialize)]
pub struct HoldingDashboardResponse {
    /// Remaining inventory valued at average purchase cost.
    pub inventory_value: String,
    /// Monthly holding cost at the given rate.
    pub monthly_holding_cost: String,
    /// Days inventory outstanding.
    pub dio_days: String,
    /// Products sold beyond their purchased quantity.
    pub oversold: Vec<Uuid>,
    /// Rate used for the holding cost, percent.
    pub rate_pct: String,
}

impl HoldingDashboardResponse {
    fn new(holding: InventoryHolding, rate_pct: Decimal) -> Self {
        Self {
            inventory_value: holding.inventory_value.to_string(),
            monthly_holding_cost: holding.monthly_holding_cost.to_string(),
            dio_days: holding.dio_days.to_string(),
            oversold: holding.oversold,
            rate_pct: rate_pct.to_string(),
        }
    }
}

/// Payables dashboard payload.
#[derive(Debug, Serialize)]
pub struct PayablesDashboardResponse {
    /// Overdue plus pending.
    pub total_outstanding: String,
    /// Overdue amount.
    pub overdue: String,
    /// Pending amount.
    pub pending: String,
    /// Completed amount.
    pub completed: String,
    /// Payment term used for classification, days.
    pub term_days: i64,
}

impl PayablesDashboardResponse {
    fn new(summary: PayablesSummary, term_days: i64) -> Self {
        Self {
            total_outstanding: summary.total_outstanding.to_string(),
            overdue: summary.overdue.to_string(),
            pending: summary.pending.to_string(),
            completed: summary.completed.to_string(),
            term_days,
        }
    }
}

/// GET /dashboard/inventory - Live stock levels plus low stock alerts.
async fn inventory_dashboard(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<InventoryQuery>,
) -> impl IntoResponse {
    let threshold = query
        .low_stock_threshold
        .unwrap_or(DEFAULT_LOW_STOCK_THRESHOLD);

    let repo = MetricsRepository::new((*state.db).clone());
    let snapshot = match repo.load_snapshot(auth.user_id()).await {
        Ok(s) => s,
        Err(e) => {
            error!(error = %e, "Failed to load inventory dashboard data");
            return internal_error();
        }
    };

    let levels = MetricsService::live_stock(&snapshot.products, &snapshot.purchases, &snapshot.sales);
    let low = MetricsService::low_stock(&levels, threshold);

    let response = InventoryDashboardResponse {
        stock_levels: levels.into_iter().map(StockLevelResponse::from).collect(),
        low_stock: low.into_iter().map(StockLevelResponse::from).collect(),
        low_stock_threshold: threshold,
    };

    (StatusCode::OK, Json(response)).into_response()
}

/// GET /dashboard/financials - Revenue, COGS, profit by category, expenses.
async fn financials_dashboard(
    State(state): State<AppState>,
    auth: AuthUser,
) -> impl IntoResponse {
    let repo = MetricsRepository::new((*state.db).clone());
    let snapshot = match repo.load_snapshot(auth.user_id()).await {
        Ok(s) => s,
        Err(e) => {
            error!(error = %e, "Failed to load financials dashboard data");
            return internal_error();
        }
    };

    let summary = MetricsService::financials(&snapshot.sales, &snapshot.products);
    let category_profit = MetricsService::category_profit(&snapshot.sales, &snapshot.products);
    let expenses = MetricsService::expense_summary(&snapshot.expenses);

    let response = FinancialsDashboardResponse {
        summary: summary.into(),
        category_profit: category_profit
            .into_iter()
            .map(CategoryProfitResponse::from)
            .collect(),
        expenses: expenses.into(),
    };

    (StatusCode::OK, Json(response)).into_response()
}

/// GET /dashboard/holding - Inventory value, holding cost, and DIO.
async fn holding_dashboard(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<HoldingQuery>,
) -> impl IntoResponse {
    let rate_pct = query.rate_pct.unwrap_or(DEFAULT_HOLDING_RATE_PCT);
    if rate_pct.is_sign_negative() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_rate",
                "message": "Holding rate must not be negative"
            })),
        )
            .into_response();
    }

    let repo = MetricsRepository::new((*state.db).clone());
    let snapshot = match repo.load_snapshot(auth.user_id()).await {
        Ok(s) => s,
        Err(e) => {
            error!(error = %e, "Failed to load holding dashboard data");
            return internal_error();
        }
    };

    let holding = MetricsService::inventory_holding(&snapshot.purchases, &snapshot.sales, rate_pct);

    (
        StatusCode::OK,
        Json(HoldingDashboardResponse::new(holding, rate_pct)),
    )
        .into_response()
}

/// GET /dashboard/payables - Vendor payables classified by payment term.
async fn payables_dashboard(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<PayablesQuery>,
) -> impl IntoResponse {
    let term_days = query.term_days.unwrap_or(DEFAULT_PAYMENT_TERM_DAYS);
    if term_days < 0 {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_term",
                "message": "Payment term must not be negative"
            })),
        )
            .into_response();
    }

    let repo = MetricsRepository::new((*state.db).clone());
    let snapshot = match repo.load_snapshot(auth.user_id()).await {
        Ok(s) => s,
        Err(e) => {
            error!(error = %e, "Failed to load payables dashboard data");
            return internal_error();
        }
    };

    let today = Utc::now().date_naive();
    let summary = MetricsService::payables(&snapshot.purchases, term_days, today);

    (
        StatusCode::OK,
        Json(PayablesDashboardResponse::new(summary, term_days)),
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
