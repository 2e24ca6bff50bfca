//! Metric input records and computed summaries.
//!
//! Input records are plain rows handed over by the data-access layer; every
//! collection is pre-filtered to one owning user. Summaries are what the
//! dashboard endpoints serialize.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Vendor payment status on a purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Not yet due or not yet paid.
    Pending,
    /// Paid in full.
    Completed,
    /// Past due and unpaid.
    Overdue,
}

/// Fixed vs variable expense classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseKind {
    /// Recurring, amount independent of sales volume.
    Fixed,
    /// Varies with activity.
    Variable,
}

/// Product row as seen by the aggregator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Product ID.
    pub product_id: Uuid,
    /// Product name.
    pub name: String,
    /// Product category.
    pub category: String,
    /// Unit cost price (authoritative cost source for COGS).
    pub cost_price: Decimal,
    /// Unit selling price.
    pub selling_price: Decimal,
    /// Baseline on-hand count.
    pub stock: i64,
}

/// Purchase row as seen by the aggregator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseRecord {
    /// Purchased product ID.
    pub product_id: Uuid,
    /// Vendor name.
    pub vendor_name: String,
    /// Quantity purchased.
    pub quantity_purchased: i64,
    /// Unit cost price on this order.
    pub cost_price: Decimal,
    /// Order date.
    pub order_date: NaiveDate,
    /// Vendor payment status.
    pub payment_status: PaymentStatus,
}

/// Sale row as seen by the aggregator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
    /// Sold product ID.
    pub product_id: Uuid,
    /// Quantity sold.
    pub quantity_sold: i64,
    /// Unit selling price on this sale.
    pub selling_price: Decimal,
    /// Sale date.
    pub sale_date: NaiveDate,
}

/// Expense row as seen by the aggregator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    /// Expense date.
    pub expense_date: NaiveDate,
    /// Expense category.
    pub category: String,
    /// Fixed or variable.
    pub kind: ExpenseKind,
    /// Amount.
    pub amount: Decimal,
}

/// Computed stock position for one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockLevel {
    /// Product ID.
    pub product_id: Uuid,
    /// Product name.
    pub name: String,
    /// Product category.
    pub category: String,
    /// Baseline stock + purchased - sold.
    pub live_stock: i64,
    /// Live stock valued at cost price.
    pub stock_value: Decimal,
    /// Live stock valued at selling price.
    pub potential_revenue: Decimal,
}

/// Revenue / COGS / profit summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialSummary {
    /// Total revenue.
    pub revenue: Decimal,
    /// Cost of goods sold.
    pub cogs: Decimal,
    /// Revenue minus COGS.
    pub gross_profit: Decimal,
    /// Gross margin percentage (0 when revenue is 0).
    pub margin_pct: Decimal,
}

/// Gross profit attributed to one product category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryProfit {
    /// Category name.
    pub category: String,
    /// Gross profit for the category.
    pub profit: Decimal,
}

/// Inventory holding cost and efficiency summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventoryHolding {
    /// Remaining purchased inventory valued at average purchase cost.
    /// May be negative when products are oversold.
    pub inventory_value: Decimal,
    /// Monthly holding cost at the configured rate.
    pub monthly_holding_cost: Decimal,
    /// Days Inventory Outstanding (0 when there is no purchase cost).
    pub dio_days: Decimal,
    /// Products whose sold quantity exceeds their purchased quantity.
    /// Surfaced as a data-quality signal, never silently clamped.
    pub oversold: Vec<Uuid>,
}

/// Supplier payables aging summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PayablesSummary {
    /// Overdue plus pending.
    pub total_outstanding: Decimal,
    /// Unpaid and past the simulated due date.
    pub overdue: Decimal,
    /// Unpaid but not yet due.
    pub pending: Decimal,
    /// Already paid (passthrough, not outstanding).
    pub completed: Decimal,
}

/// Per-category expense total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    /// Category name.
    pub category: String,
    /// Total amount.
    pub amount: Decimal,
}

/// Expense breakdown summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpenseSummary {
    /// Total of all expenses.
    pub total: Decimal,
    /// Total of fixed expenses.
    pub fixed: Decimal,
    /// Total of variable expenses.
    pub variable: Decimal,
    /// Per-category totals, largest first.
    pub by_category: Vec<CategoryTotal>,
}
