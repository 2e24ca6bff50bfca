//! Metric aggregation over user-scoped records.

use std::collections::HashMap;

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use uuid::Uuid;

use super::types::{
    CategoryProfit, CategoryTotal, ExpenseKind, ExpenseRecord, ExpenseSummary, FinancialSummary,
    InventoryHolding, PayablesSummary, PaymentStatus, ProductRecord, PurchaseRecord, SaleRecord,
    StockLevel,
};

/// Fallback sale-period length when there are no sales to derive one from.
const DEFAULT_PERIOD_DAYS: i64 = 30;

/// Service computing dashboard metrics.
///
/// Every function is a pure single pass over its inputs: empty collections
/// produce zeroed/empty summaries, and repeated calls on unchanged input
/// yield identical output.
pub struct MetricsService;

impl MetricsService {
    /// Computes the live stock position for every product.
    ///
    /// Live stock = baseline stock + quantity purchased - quantity sold.
    /// Products without purchase or sale activity keep their baseline.
    /// Purchase/sale rows referencing a product id that is not in `products`
    /// are ignored here (they still count in the holding and payables views).
    #[must_use]
    pub fn live_stock(
        products: &[ProductRecord],
        purchases: &[PurchaseRecord],
        sales: &[SaleRecord],
    ) -> Vec<StockLevel> {
        let mut purchased: HashMap<Uuid, i64> = HashMap::new();
        for purchase in purchases {
            *purchased.entry(purchase.product_id).or_default() += purchase.quantity_purchased;
        }

        let mut sold: HashMap<Uuid, i64> = HashMap::new();
        for sale in sales {
            *sold.entry(sale.product_id).or_default() += sale.quantity_sold;
        }

        products
            .iter()
            .map(|product| {
                let bought = purchased.get(&product.product_id).copied().unwrap_or(0);
                let shipped = sold.get(&product.product_id).copied().unwrap_or(0);
                let live = product.stock + bought - shipped;

                StockLevel {
                    product_id: product.product_id,
                    name: product.name.clone(),
                    category: product.category.clone(),
                    live_stock: live,
                    stock_value: Decimal::from(live) * product.cost_price,
                    potential_revenue: Decimal::from(live) * product.selling_price,
                }
            })
            .collect()
    }

    /// Filters stock levels below `threshold`, most critical first.
    #[must_use]
    pub fn low_stock(levels: &[StockLevel], threshold: i64) -> Vec<StockLevel> {
        let mut alerts: Vec<StockLevel> = levels
            .iter()
            .filter(|level| level.live_stock < threshold)
            .cloned()
            .collect();
        alerts.sort_by_key(|level| level.live_stock);
        alerts
    }

    /// Computes revenue, COGS, gross profit, and margin.
    ///
    /// COGS uses the product catalog as the authoritative cost source
    /// (Sales -> Products join). Sales referencing an unknown product still
    /// contribute revenue but carry no cost.
    #[must_use]
    pub fn financials(sales: &[SaleRecord], products: &[ProductRecord]) -> FinancialSummary {
        let cost_by_product: HashMap<Uuid, Decimal> = products
            .iter()
            .map(|product| (product.product_id, product.cost_price))
            .collect();

        let mut revenue = Decimal::ZERO;
        let mut cogs = Decimal::ZERO;

        for sale in sales {
            let quantity = Decimal::from(sale.quantity_sold);
            revenue += sale.selling_price * quantity;
            if let Some(cost) = cost_by_product.get(&sale.product_id) {
                cogs += *cost * quantity;
            }
        }

        let gross_profit = revenue - cogs;
        let margin_pct = if revenue.is_zero() {
            Decimal::ZERO
        } else {
            (gross_profit / revenue * Decimal::ONE_HUNDRED).round_dp(2)
        };

        FinancialSummary {
            revenue,
            cogs,
            gross_profit,
            margin_pct,
        }
    }

    /// Groups gross profit by product category, largest first.
    ///
    /// Sales referencing an unknown product have no category and are skipped.
    #[must_use]
    pub fn category_profit(
        sales: &[SaleRecord],
        products: &[ProductRecord],
    ) -> Vec<CategoryProfit> {
        let catalog: HashMap<Uuid, &ProductRecord> = products
            .iter()
            .map(|product| (product.product_id, product))
            .collect();

        let mut by_category: HashMap<String, Decimal> = HashMap::new();
        for sale in sales {
            let Some(product) = catalog.get(&sale.product_id) else {
                continue;
            };
            let profit =
                (sale.selling_price - product.cost_price) * Decimal::from(sale.quantity_sold);
            *by_category.entry(product.category.clone()).or_default() += profit;
        }

        let mut ranked: Vec<CategoryProfit> = by_category
            .into_iter()
            .map(|(category, profit)| CategoryProfit { category, profit })
            .collect();
        ranked.sort_by(|a, b| b.profit.cmp(&a.profit).then(a.category.cmp(&b.category)));
        ranked
    }

    /// Computes inventory value, monthly holding cost, and DIO.
    ///
    /// Remaining quantity per product is purchased minus sold, valued at the
    /// quantity-weighted average purchase cost. Oversold products (negative
    /// remaining) reduce the value and are listed in `oversold` rather than
    /// being clamped to zero.
    ///
    /// DIO = (inventory value / 2) / purchase cost total * sale period days,
    /// where the period spans the earliest to the latest sale date (fallback
    /// 30 days, minimum 1).
    #[must_use]
    pub fn inventory_holding(
        purchases: &[PurchaseRecord],
        sales: &[SaleRecord],
        holding_rate_pct: Decimal,
    ) -> InventoryHolding {
        // Per product: purchased quantity and purchase spend.
        let mut purchased: HashMap<Uuid, (i64, Decimal)> = HashMap::new();
        for purchase in purchases {
            let entry = purchased.entry(purchase.product_id).or_default();
            entry.0 += purchase.quantity_purchased;
            entry.1 += purchase.cost_price * Decimal::from(purchase.quantity_purchased);
        }

        let mut sold: HashMap<Uuid, i64> = HashMap::new();
        for sale in sales {
            *sold.entry(sale.product_id).or_default() += sale.quantity_sold;
        }

        let mut inventory_value = Decimal::ZERO;
        let mut purchase_cost_total = Decimal::ZERO;
        let mut oversold = Vec::new();

        for (product_id, (quantity, spend)) in &purchased {
            purchase_cost_total += *spend;
            let remaining = quantity - sold.get(product_id).copied().unwrap_or(0);
            if remaining < 0 {
                oversold.push(*product_id);
            }
            if *quantity != 0 {
                let average_cost = *spend / Decimal::from(*quantity);
                inventory_value += Decimal::from(remaining) * average_cost;
            }
        }
        oversold.sort_unstable();

        let monthly_holding_cost = holding_rate_pct / Decimal::ONE_HUNDRED * inventory_value;

        let period_days = Self::sale_period_days(sales);
        let dio_days = if purchase_cost_total.is_zero() {
            Decimal::ZERO
        } else {
            let average_inventory = inventory_value / Decimal::TWO;
            (average_inventory / purchase_cost_total * Decimal::from(period_days)).round_dp(1)
        };

        InventoryHolding {
            inventory_value,
            monthly_holding_cost,
            dio_days,
            oversold,
        }
    }

    /// Classifies vendor payables by a simulated payment term.
    ///
    /// Due date = order date + `payment_term_days`. Completed purchases pass
    /// through to the completed bucket; unpaid purchases past due classify as
    /// overdue, the rest as pending. Amount = quantity * cost price.
    #[must_use]
    pub fn payables(
        purchases: &[PurchaseRecord],
        payment_term_days: i64,
        today: NaiveDate,
    ) -> PayablesSummary {
        let mut summary = PayablesSummary::default();

        for purchase in purchases {
            let amount = purchase.cost_price * Decimal::from(purchase.quantity_purchased);

            match purchase.payment_status {
                PaymentStatus::Completed => summary.completed += amount,
                PaymentStatus::Overdue => summary.overdue += amount,
                PaymentStatus::Pending => {
                    let due_date = purchase.order_date + Duration::days(payment_term_days);
                    if due_date < today {
                        summary.overdue += amount;
                    } else {
                        summary.pending += amount;
                    }
                }
            }
        }

        summary.total_outstanding = summary.overdue + summary.pending;
        summary
    }

    /// Summarizes expenses: total, fixed/variable split, category ranking.
    #[must_use]
    pub fn expense_summary(expenses: &[ExpenseRecord]) -> ExpenseSummary {
        let mut summary = ExpenseSummary::default();
        let mut by_category: HashMap<String, Decimal> = HashMap::new();

        for expense in expenses {
            summary.total += expense.amount;
            match expense.kind {
                ExpenseKind::Fixed => summary.fixed += expense.amount,
                ExpenseKind::Variable => summary.variable += expense.amount,
            }
            *by_category.entry(expense.category.clone()).or_default() += expense.amount;
        }

        let mut ranked: Vec<CategoryTotal> = by_category
            .into_iter()
            .map(|(category, amount)| CategoryTotal { category, amount })
            .collect();
        ranked.sort_by(|a, b| b.amount.cmp(&a.amount).then(a.category.cmp(&b.category)));
        summary.by_category = ranked;

        summary
    }

    /// Days spanned by the sale dates, falling back to a 30-day period.
    fn sale_period_days(sales: &[SaleRecord]) -> i64 {
        let first = sales.iter().map(|sale| sale.sale_date).min();
        let last = sales.iter().map(|sale| sale.sale_date).max();

        match (first, last) {
            (Some(first), Some(last)) => (last - first).num_days().max(1),
            _ => DEFAULT_PERIOD_DAYS,
        }
    }
}
