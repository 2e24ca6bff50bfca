//! Purchase repository for vendor order database operations.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    ModelTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::{purchases, sea_orm_active_enums::PaymentStatus};

/// Error types for purchase operations.
#[derive(Debug, thiserror::Error)]
pub enum PurchaseError {
    /// Purchase not found, or not owned by the requesting user.
    #[error("Purchase not found: {0}")]
    NotFound(Uuid),

    /// Referenced product not found in the user's catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a purchase.
#[derive(Debug, Clone)]
pub struct CreatePurchaseInput {
    /// Owning user ID.
    pub user_id: Uuid,
    /// Purchased product ID (must belong to the same user).
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
    /// Payment status.
    pub payment_status: PaymentStatus,
}

/// Input for updating a purchase. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdatePurchaseInput {
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
    /// Payment status.
    pub payment_status: Option<PaymentStatus>,
}

/// Purchase repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct PurchaseRepository {
    db: DatabaseConnection,
}

impl PurchaseRepository {
    /// Creates a new purchase repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists all purchases owned by a user, newest order first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, user_id: Uuid) -> Result<Vec<purchases::Model>, DbErr> {
        purchases::Entity::find()
            .filter(purchases::Column::UserId.eq(user_id))
            .order_by_desc(purchases::Column::OrderDate)
            .all(&self.db)
            .await
    }

    /// Finds one purchase owned by a user.
    ///
    /// # Errors
    ///
    /// Returns `PurchaseError::NotFound` if no such row exists for this user.
    pub async fn find(
        &self,
        user_id: Uuid,
        purchase_id: Uuid,
    ) -> Result<purchases::Model, PurchaseError> {
        purchases::Entity::find_by_id(purchase_id)
            .filter(purchases::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?
            .ok_or(PurchaseError::NotFound(purchase_id))
    }

    /// Creates a new purchase after validating the product reference.
    ///
    /// # Errors
    ///
    /// Returns `PurchaseError::ProductNotFound` if the product does not exist
    /// in the user's catalog.
    pub async fn create(
        &self,
        input: CreatePurchaseInput,
    ) -> Result<purchases::Model, PurchaseError> {
        self.ensure_product(input.user_id, input.product_id).await?;

        let purchase = purchases::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(input.user_id),
            product_id: Set(input.product_id),
            vendor_name: Set(input.vendor_name),
            quantity_purchased: Set(input.quantity_purchased),
            cost_price: Set(input.cost_price),
            order_date: Set(input.order_date),
            payment_due: Set(input.payment_due),
            payment_status: Set(input.payment_status),
            created_at: Set(chrono::Utc::now().into()),
        };

        Ok(purchase.insert(&self.db).await?)
    }

    /// Updates a purchase owned by a user.
    ///
    /// # Errors
    ///
    /// Returns `PurchaseError::NotFound` if no such row exists for this user.
    pub async fn update(
        &self,
        user_id: Uuid,
        purchase_id: Uuid,
        input: UpdatePurchaseInput,
    ) -> Result<purchases::Model, PurchaseError> {
        let existing = self.find(user_id, purchase_id).await?;
        let mut purchase = existing.into_active_model();

        if let Some(vendor_name) = input.vendor_name {
            purchase.vendor_name = Set(vendor_name);
        }
        if let Some(quantity) = input.quantity_purchased {
            purchase.quantity_purchased = Set(quantity);
        }
        if let Some(cost_price) = input.cost_price {
            purchase.cost_price = Set(cost_price);
        }
        if let Some(order_date) = input.order_date {
            purchase.order_date = Set(order_date);
        }
        if let Some(payment_due) = input.payment_due {
            purchase.payment_due = Set(payment_due);
        }
        if let Some(payment_status) = input.payment_status {
            purchase.payment_status = Set(payment_status);
        }

        Ok(purchase.update(&self.db).await?)
    }

    /// Deletes a purchase owned by a user.
    ///
    /// # Errors
    ///
    /// Returns `PurchaseError::NotFound` if no such row exists for this user.
    pub async fn delete(&self, user_id: Uuid, purchase_id: Uuid) -> Result<(), PurchaseError> {
        let existing = self.find(user_id, purchase_id).await?;
        existing.delete(&self.db).await?;
        Ok(())
    }

    /// Verifies that a product belongs to the user's catalog.
    async fn ensure_product(&self, user_id: Uuid, product_id: Uuid) -> Result<(), PurchaseError> {
        use crate::entities::products;

        let found = products::Entity::find_by_id(product_id)
            .filter(products::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?;

        if found.is_none() {
            return Err(PurchaseError::ProductNotFound(product_id));
        }
        Ok(())
    }
}
