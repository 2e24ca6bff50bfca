//! Sale repository for sales-order database operations.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    ModelTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::sales;

/// Error types for sale operations.
#[derive(Debug, thiserror::Error)]
pub enum SaleError {
    /// Sale not found, or not owned by the requesting user.
    #[error("Sale not found: {0}")]
    NotFound(Uuid),

    /// Referenced product not found in the user's catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a sale.
#[derive(Debug, Clone)]
pub struct CreateSaleInput {
    /// Owning user ID.
    pub user_id: Uuid,
    /// Sold product ID (must belong to the same user).
    pub product_id: Uuid,
    /// Quantity sold.
    pub quantity_sold: i64,
    /// Unit selling price.
    pub selling_price: Decimal,
    /// Sale date.
    pub sale_date: NaiveDate,
    /// Whether the order has shipped.
    pub shipped: bool,
    /// Whether payment has been received.
    pub payment_received: bool,
}

/// Input for updating a sale. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateSaleInput {
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

/// Sale repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    db: DatabaseConnection,
}

impl SaleRepository {
    /// Creates a new sale repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists all sales owned by a user, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, user_id: Uuid) -> Result<Vec<sales::Model>, DbErr> {
        sales::Entity::find()
            .filter(sales::Column::UserId.eq(user_id))
            .order_by_desc(sales::Column::SaleDate)
            .all(&self.db)
            .await
    }

    /// Finds one sale owned by a user.
    ///
    /// # Errors
    ///
    /// Returns `SaleError::NotFound` if no such row exists for this user.
    pub async fn find(&self, user_id: Uuid, sale_id: Uuid) -> Result<sales::Model, SaleError> {
        sales::Entity::find_by_id(sale_id)
            .filter(sales::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?
            .ok_or(SaleError::NotFound(sale_id))
    }

    /// Creates a new sale after validating the product reference.
    ///
    /// # Errors
    ///
    /// Returns `SaleError::ProductNotFound` if the product does not exist in
    /// the user's catalog.
    pub async fn create(&self, input: CreateSaleInput) -> Result<sales::Model, SaleError> {
        self.ensure_product(input.user_id, input.product_id).await?;

        let sale = sales::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(input.user_id),
            product_id: Set(input.product_id),
            quantity_sold: Set(input.quantity_sold),
            selling_price: Set(input.selling_price),
            sale_date: Set(input.sale_date),
            shipped: Set(input.shipped),
            payment_received: Set(input.payment_received),
            created_at: Set(chrono::Utc::now().into()),
        };

        Ok(sale.insert(&self.db).await?)
    }

    /// Updates a sale owned by a user.
    ///
    /// # Errors
    ///
    /// Returns `SaleError::NotFound` if no such row exists for this user.
    pub async fn update(
        &self,
        user_id: Uuid,
        sale_id: Uuid,
        input: UpdateSaleInput,
    ) -> Result<sales::Model, SaleError> {
        let existing = self.find(user_id, sale_id).await?;
        let mut sale = existing.into_active_model();

        if let Some(quantity) = input.quantity_sold {
            sale.quantity_sold = Set(quantity);
        }
        if let Some(selling_price) = input.selling_price {
            sale.selling_price = Set(selling_price);
        }
        if let Some(sale_date) = input.sale_date {
            sale.sale_date = Set(sale_date);
        }
        if let Some(shipped) = input.shipped {
            sale.shipped = Set(shipped);
        }
        if let Some(payment_received) = input.payment_received {
            sale.payment_received = Set(payment_received);
        }

        Ok(sale.update(&self.db).await?)
    }

    /// Deletes a sale owned by a user.
    ///
    /// # Errors
    ///
    /// Returns `SaleError::NotFound` if no such row exists for this user.
    pub async fn delete(&self, user_id: Uuid, sale_id: Uuid) -> Result<(), SaleError> {
        let existing = self.find(user_id, sale_id).await?;
        existing.delete(&self.db).await?;
        Ok(())
    }

    /// Verifies that a product belongs to the user's catalog.
    async fn ensure_product(&self, user_id: Uuid, product_id: Uuid) -> Result<(), SaleError> {
        use crate::entities::products;

        let found = products::Entity::find_by_id(product_id)
            .filter(products::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?;

        if found.is_none() {
            return Err(SaleError::ProductNotFound(product_id));
        }
        Ok(())
    }
}
