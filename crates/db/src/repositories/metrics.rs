//! Metrics repository: loads the aggregator's input snapshot.
//!
//! Pulls the four collections the metrics service consumes, always filtered
//! to one user in a single place so no dashboard query can forget the tenant
//! scope, then converts entity rows into the core's plain records.

use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};
use uuid::Uuid;

use vendia_core::metrics::{
    ExpenseKind, ExpenseRecord, PaymentStatus, ProductRecord, PurchaseRecord, SaleRecord,
};

use crate::entities::{expenses, products, purchases, sales, sea_orm_active_enums};

/// Everything the metrics aggregator needs for one user's dashboards.
#[derive(Debug, Clone, Default)]
pub struct MetricsSnapshot {
    /// The user's product catalog.
    pub products: Vec<ProductRecord>,
    /// The user's purchases.
    pub purchases: Vec<PurchaseRecord>,
    /// The user's sales.
    pub sales: Vec<SaleRecord>,
    /// The user's expenses.
    pub expenses: Vec<ExpenseRecord>,
}

/// Metrics repository for dashboard reads.
#[derive(Debug, Clone)]
pub struct MetricsRepository {
    db: DatabaseConnection,
}

impl MetricsRepository {
    /// Creates a new metrics repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Loads the full metric input snapshot for one user.
    ///
    /// Single-shot reads, no retries: a failure surfaces to the caller and
    /// the interactive consumer refreshes manually.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the reads fail.
    pub async fn load_snapshot(&self, user_id: Uuid) -> Result<MetricsSnapshot, DbErr> {
        let products = products::Entity::find()
            .filter(products::Column::UserId.eq(user_id))
            .all(&self.db)
            .await?;

        let purchases = purchases::Entity::find()
            .filter(purchases::Column::UserId.eq(user_id))
            .all(&self.db)
            .await?;

        let sales = sales::Entity::find()
            .filter(sales::Column::UserId.eq(user_id))
            .all(&self.db)
            .await?;

        let expenses = expenses::Entity::find()
            .filter(expenses::Column::UserId.eq(user_id))
            .all(&self.db)
            .await?;

        Ok(MetricsSnapshot {
            products: products.into_iter().map(product_record).collect(),
            purchases: purchases.into_iter().map(purchase_record).collect(),
            sales: sales.into_iter().map(sale_record).collect(),
            expenses: expenses.into_iter().map(expense_record).collect(),
        })
    }
}

fn product_record(model: products::Model) -> ProductRecord {
    ProductRecord {
        product_id: model.id,
        name: model.name,
        category: model.category,
        cost_price: model.cost_price,
        selling_price: model.selling_price,
        stock: model.stock,
    }
}

fn purchase_record(model: purchases::Model) -> PurchaseRecord {
    PurchaseRecord {
        product_id: model.product_id,
        vendor_name: model.vendor_name,
        quantity_purchased: model.quantity_purchased,
        cost_price: model.cost_price,
        order_date: model.order_date,
        payment_status: payment_status(model.payment_status),
    }
}

fn sale_record(model: sales::Model) -> SaleRecord {
    SaleRecord {
        product_id: model.product_id,
        quantity_sold: model.quantity_sold,
        selling_price: model.selling_price,
        sale_date: model.sale_date,
    }
}

fn expense_record(model: expenses::Model) -> ExpenseRecord {
    ExpenseRecord {
        expense_date: model.expense_date,
        category: model.category,
        kind: expense_kind(model.expense_type),
        amount: model.amount,
    }
}

const fn payment_status(status: sea_orm_active_enums::PaymentStatus) -> PaymentStatus {
    match status {
        sea_orm_active_enums::PaymentStatus::Pending => PaymentStatus::Pending,
        sea_orm_active_enums::PaymentStatus::Completed => PaymentStatus::Completed,
        sea_orm_active_enums::PaymentStatus::Overdue => PaymentStatus::Overdue,
    }
}

const fn expense_kind(expense_type: sea_orm_active_enums::ExpenseType) -> ExpenseKind {
    match expense_type {
        sea_orm_active_enums::ExpenseType::Fixed => ExpenseKind::Fixed,
        sea_orm_active_enums::ExpenseType::Variable => ExpenseKind::Variable,
    }
}
