//! Tests for the metrics aggregator.

use chrono::NaiveDate;
use proptest::prelude::*;
use rstest::rstest;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use super::service::MetricsService;
use super::types::{
    ExpenseKind, ExpenseRecord, PaymentStatus, ProductRecord, PurchaseRecord, SaleRecord,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn product(id: Uuid, stock: i64, cost: Decimal, sell: Decimal) -> ProductRecord {
    ProductRecord {
        product_id: id,
        name: format!("product-{id}"),
        category: "general".to_string(),
        cost_price: cost,
        selling_price: sell,
        stock,
    }
}

fn purchase(id: Uuid, quantity: i64, cost: Decimal, order_date: NaiveDate) -> PurchaseRecord {
    PurchaseRecord {
        product_id: id,
        vendor_name: "Acme Supplies".to_string(),
        quantity_purchased: quantity,
        cost_price: cost,
        order_date,
        payment_status: PaymentStatus::Pending,
    }
}

fn sale(id: Uuid, quantity: i64, price: Decimal, sale_date: NaiveDate) -> SaleRecord {
    SaleRecord {
        product_id: id,
        quantity_sold: quantity,
        selling_price: price,
        sale_date,
    }
}

#[test]
fn test_live_stock_without_activity_keeps_baseline() {
    let products = vec![
        product(Uuid::new_v4(), 10, dec!(5), dec!(8)),
        product(Uuid::new_v4(), 0, dec!(3), dec!(4)),
    ];

    let levels = MetricsService::live_stock(&products, &[], &[]);

    assert_eq!(levels.len(), 2);
    assert_eq!(levels[0].live_stock, 10);
    assert_eq!(levels[1].live_stock, 0);
    assert_eq!(levels[0].stock_value, dec!(50));
    assert_eq!(levels[0].potential_revenue, dec!(80));
}

#[test]
fn test_live_stock_worked_scenario() {
    // Baseline 10, +5 purchased, -3 sold.
    let id = Uuid::new_v4();
    let products = vec![product(id, 10, dec!(5), dec!(8))];
    let purchases = vec![purchase(id, 5, dec!(5), date(2026, 1, 10))];
    let sales = vec![sale(id, 3, dec!(8), date(2026, 1, 20))];

    let levels = MetricsService::live_stock(&products, &purchases, &sales);

    assert_eq!(levels[0].live_stock, 12);
    assert_eq!(levels[0].stock_value, dec!(60));
}

#[test]
fn test_live_stock_ignores_rows_for_unknown_products() {
    let id = Uuid::new_v4();
    let stray = Uuid::new_v4();
    let products = vec![product(id, 7, dec!(2), dec!(3))];
    let purchases = vec![purchase(stray, 100, dec!(1), date(2026, 1, 1))];
    let sales = vec![sale(stray, 50, dec!(2), date(2026, 1, 2))];

    let levels = MetricsService::live_stock(&products, &purchases, &sales);

    assert_eq!(levels.len(), 1);
    assert_eq!(levels[0].live_stock, 7);
}

#[test]
fn test_financials_worked_scenario() {
    let id = Uuid::new_v4();
    let products = vec![product(id, 10, dec!(5), dec!(8))];
    let sales = vec![sale(id, 3, dec!(8), date(2026, 1, 20))];

    let summary = MetricsService::financials(&sales, &products);

    assert_eq!(summary.revenue, dec!(24));
    assert_eq!(summary.cogs, dec!(15));
    assert_eq!(summary.gross_profit, dec!(9));
    assert_eq!(summary.margin_pct, dec!(37.50));
}

#[test]
fn test_financials_zero_revenue_has_zero_margin() {
    let summary = MetricsService::financials(&[], &[]);

    assert_eq!(summary.revenue, Decimal::ZERO);
    assert_eq!(summary.margin_pct, Decimal::ZERO);
}

#[test]
fn test_financials_unknown_product_contributes_revenue_only() {
    let sales = vec![sale(Uuid::new_v4(), 2, dec!(10), date(2026, 1, 5))];

    let summary = MetricsService::financials(&sales, &[]);

    assert_eq!(summary.revenue, dec!(20));
    assert_eq!(summary.cogs, Decimal::ZERO);
    assert_eq!(summary.gross_profit, dec!(20));
}

#[test]
fn test_category_profit_ranked_descending() {
    let snacks = Uuid::new_v4();
    let drinks = Uuid::new_v4();
    let mut snack = product(snacks, 0, dec!(2), dec!(5));
    snack.category = "snacks".to_string();
    let mut drink = product(drinks, 0, dec!(1), dec!(2));
    drink.category = "drinks".to_string();

    let sales = vec![
        sale(snacks, 10, dec!(5), date(2026, 2, 1)), // profit 30
        sale(drinks, 5, dec!(2), date(2026, 2, 2)),  // profit 5
    ];

    let ranked = MetricsService::category_profit(&sales, &[snack, drink]);

    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].category, "snacks");
    assert_eq!(ranked[0].profit, dec!(30));
    assert_eq!(ranked[1].category, "drinks");
    assert_eq!(ranked[1].profit, dec!(5));
}

#[test]
fn test_low_stock_sorted_most_critical_first() {
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();
    let c = Uuid::new_v4();
    let products = vec![
        product(a, 8, dec!(1), dec!(2)),
        product(b, 3, dec!(1), dec!(2)),
        product(c, 15, dec!(1), dec!(2)),
    ];

    let levels = MetricsService::live_stock(&products, &[], &[]);
    let alerts = MetricsService::low_stock(&levels, 10);

    assert_eq!(alerts.len(), 2);
    assert_eq!(alerts[0].product_id, b);
    assert_eq!(alerts[1].product_id, a);
}

#[test]
fn test_holding_cost_rate_applied_to_inventory_value() {
    // 100 units at cost 10 with no sales: inventory value 1000.
    let id = Uuid::new_v4();
    let purchases = vec![purchase(id, 100, dec!(10), date(2026, 1, 1))];

    let holding = MetricsService::inventory_holding(&purchases, &[], dec!(2));

    assert_eq!(holding.inventory_value, dec!(1000));
    assert_eq!(holding.monthly_holding_cost, dec!(20));
    // No sales: 30-day fallback period, average inventory 500 over cost 1000.
    assert_eq!(holding.dio_days, dec!(15.0));
    assert!(holding.oversold.is_empty());
}

#[test]
fn test_oversold_product_is_flagged_not_clamped() {
    let id = Uuid::new_v4();
    let purchases = vec![purchase(id, 5, dec!(4), date(2026, 1, 1))];
    let sales = vec![sale(id, 8, dec!(6), date(2026, 1, 15))];

    let holding = MetricsService::inventory_holding(&purchases, &sales, dec!(2));

    assert_eq!(holding.oversold, vec![id]);
    assert_eq!(holding.inventory_value, dec!(-12));
}

#[test]
fn test_dio_zero_when_no_purchase_cost() {
    let holding = MetricsService::inventory_holding(&[], &[], dec!(2));
    assert_eq!(holding.dio_days, Decimal::ZERO);
}

#[rstest]
#[case(30, dec!(50), dec!(0))] // 40 days old, 30-day terms: overdue
#[case(60, dec!(0), dec!(50))] // 40 days old, 60-day terms: pending
fn test_payables_aging_by_term(
    #[case] term_days: i64,
    #[case] expected_overdue: Decimal,
    #[case] expected_pending: Decimal,
) {
    let today = date(2026, 3, 15);
    let purchases = vec![purchase(
        Uuid::new_v4(),
        10,
        dec!(5),
        today - chrono::Duration::days(40),
    )];

    let summary = MetricsService::payables(&purchases, term_days, today);

    assert_eq!(summary.overdue, expected_overdue);
    assert_eq!(summary.pending, expected_pending);
    assert_eq!(summary.total_outstanding, dec!(50));
}

#[test]
fn test_payables_completed_passthrough() {
    let today = date(2026, 3, 15);
    let mut paid = purchase(Uuid::new_v4(), 10, dec!(5), today - chrono::Duration::days(90));
    paid.payment_status = PaymentStatus::Completed;
    let mut flagged = purchase(Uuid::new_v4(), 2, dec!(3), today);
    flagged.payment_status = PaymentStatus::Overdue;

    let summary = MetricsService::payables(&[paid, flagged], 30, today);

    assert_eq!(summary.completed, dec!(50));
    assert_eq!(summary.overdue, dec!(6));
    assert_eq!(summary.total_outstanding, dec!(6));
}

#[test]
fn test_expense_summary_splits_and_ranks() {
    let expenses = vec![
        ExpenseRecord {
            expense_date: date(2026, 1, 5),
            category: "rent".to_string(),
            kind: ExpenseKind::Fixed,
            amount: dec!(1200),
        },
        ExpenseRecord {
            expense_date: date(2026, 1, 9),
            category: "shipping".to_string(),
            kind: ExpenseKind::Variable,
            amount: dec!(150),
        },
        ExpenseRecord {
            expense_date: date(2026, 1, 21),
            category: "shipping".to_string(),
            kind: ExpenseKind::Variable,
            amount: dec!(90),
        },
    ];

    let summary = MetricsService::expense_summary(&expenses);

    assert_eq!(summary.total, dec!(1440));
    assert_eq!(summary.fixed, dec!(1200));
    assert_eq!(summary.variable, dec!(240));
    assert_eq!(summary.by_category[0].category, "rent");
    assert_eq!(summary.by_category[1].amount, dec!(240));
}

#[test]
fn test_empty_inputs_produce_zeroed_summaries() {
    assert!(MetricsService::live_stock(&[], &[], &[]).is_empty());
    assert_eq!(
        MetricsService::financials(&[], &[]),
        super::types::FinancialSummary::default()
    );
    assert!(MetricsService::category_profit(&[], &[]).is_empty());
    assert_eq!(
        MetricsService::payables(&[], 30, date(2026, 1, 1)),
        super::types::PayablesSummary::default()
    );
    assert_eq!(
        MetricsService::expense_summary(&[]),
        super::types::ExpenseSummary::default()
    );
}

fn arb_products(max: usize) -> impl Strategy<Value = Vec<ProductRecord>> {
    prop::collection::vec((0i64..500, 1i64..100, 1i64..200), 1..max).prop_map(|rows| {
        rows.into_iter()
            .map(|(stock, cost, sell)| {
                product(Uuid::new_v4(), stock, Decimal::from(cost), Decimal::from(sell))
            })
            .collect()
    })
}

proptest! {
    /// Live stock is exactly baseline + purchased - sold for every product,
    /// regardless of how activity rows are interleaved.
    #[test]
    fn test_live_stock_accounting_identity(
        products in arb_products(8),
        activity in prop::collection::vec((0usize..8, 1i64..50, 1i64..50), 0..30),
    ) {
        let mut purchases = Vec::new();
        let mut sales = Vec::new();
        for (index, bought, shipped) in activity {
            if index < products.len() {
                let id = products[index].product_id;
                purchases.push(purchase(id, bought, dec!(3), date(2026, 1, 1)));
                sales.push(sale(id, shipped, dec!(5), date(2026, 1, 2)));
            }
        }

        let levels = MetricsService::live_stock(&products, &purchases, &sales);

        for (record, level) in products.iter().zip(&levels) {
            let bought: i64 = purchases
                .iter()
                .filter(|p| p.product_id == record.product_id)
                .map(|p| p.quantity_purchased)
                .sum();
            let shipped: i64 = sales
                .iter()
                .filter(|s| s.product_id == record.product_id)
                .map(|s| s.quantity_sold)
                .sum();
            prop_assert_eq!(level.live_stock, record.stock + bought - shipped);
        }
    }

    /// Aggregator functions are pure: two runs on unchanged input agree.
    #[test]
    fn test_aggregation_is_idempotent(
        products in arb_products(6),
        quantities in prop::collection::vec((0usize..6, 1i64..40), 0..20),
    ) {
        let sales: Vec<SaleRecord> = quantities
            .into_iter()
            .filter(|(index, _)| *index < products.len())
            .map(|(index, quantity)| {
                sale(
                    products[index].product_id,
                    quantity,
                    products[index].selling_price,
                    date(2026, 2, 1),
                )
            })
            .collect();

        prop_assert_eq!(
            MetricsService::financials(&sales, &products),
            MetricsService::financials(&sales, &products)
        );
        prop_assert_eq!(
            MetricsService::category_profit(&sales, &products),
            MetricsService::category_profit(&sales, &products)
        );
        prop_assert_eq!(
            MetricsService::live_stock(&products, &[], &sales),
            MetricsService::live_stock(&products, &[], &sales)
        );
    }

    /// Margin stays within [-inf, 100] bounds sanity: selling at catalog
    /// price can never exceed 100% margin.
    #[test]
    fn test_margin_never_exceeds_one_hundred(
        products in arb_products(6),
        quantities in prop::collection::vec((0usize..6, 1i64..40), 1..20),
    ) {
        let sales: Vec<SaleRecord> = quantities
            .into_iter()
            .filter(|(index, _)| *index < products.len())
            .map(|(index, quantity)| {
                sale(
                    products[index].product_id,
                    quantity,
                    products[index].selling_price,
                    date(2026, 2, 1),
                )
            })
            .collect();

        let summary = MetricsService::financials(&sales, &products);
        prop_assert!(summary.margin_pct <= Decimal::ONE_HUNDRED);
    }
}
