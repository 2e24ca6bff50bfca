//! Product repository for catalog database operations.

use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    ModelTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::products;

/// Error types for product operations.
#[derive(Debug, thiserror::Error)]
pub enum ProductError {
    /// Product not found, or not owned by the requesting user.
    #[error("Product not found: {0}")]
    NotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a product.
#[derive(Debug, Clone)]
pub struct CreateProductInput {
    /// Owning user ID.
    pub user_id: Uuid,
    /// Product name.
    pub name: String,
    /// Product category.
    pub category: String,
    /// Unit cost price.
    pub cost_price: Decimal,
    /// Unit selling price.
    pub selling_price: Decimal,
    /// Baseline on-hand count.
    pub stock: i64,
}

/// Input for updating a product. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateProductInput {
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

/// Product repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    db: DatabaseConnection,
}

impl ProductRepository {
    /// Creates a new product repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists all products owned by a user, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, user_id: Uuid) -> Result<Vec<products::Model>, DbErr> {
        products::Entity::find()
            .filter(products::Column::UserId.eq(user_id))
            .order_by_asc(products::Column::Name)
            .all(&self.db)
            .await
    }

    /// Finds one product owned by a user.
    ///
    /// # Errors
    ///
    /// Returns `ProductError::NotFound` if no such row exists for this user.
    pub async fn find(
        &self,
        user_id: Uuid,
        product_id: Uuid,
    ) -> Result<products::Model, ProductError> {
        products::Entity::find_by_id(product_id)
            .filter(products::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?
            .ok_or(ProductError::NotFound(product_id))
    }

    /// Creates a new product.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(&self, input: CreateProductInput) -> Result<products::Model, ProductError> {
        let now = chrono::Utc::now().into();
        let product = products::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(input.user_id),
            name: Set(input.name),
            category: Set(input.category),
            cost_price: Set(input.cost_price),
            selling_price: Set(input.selling_price),
            stock: Set(input.stock),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(product.insert(&self.db).await?)
    }

    /// Updates a product owned by a user.
    ///
    /// # Errors
    ///
    /// Returns `ProductError::NotFound` if no such row exists for this user.
    pub async fn update(
        &self,
        user_id: Uuid,
        product_id: Uuid,
        input: UpdateProductInput,
    ) -> Result<products::Model, ProductError> {
        let existing = self.find(user_id, product_id).await?;
        let mut product = existing.into_active_model();

        if let Some(name) = input.name {
            product.name = Set(name);
        }
        if let Some(category) = input.category {
            product.category = Set(category);
        }
        if let Some(cost_price) = input.cost_price {
            product.cost_price = Set(cost_price);
        }
        if let Some(selling_price) = input.selling_price {
            product.selling_price = Set(selling_price);
        }
        if let Some(stock) = input.stock {
            product.stock = Set(stock);
        }
        product.updated_at = Set(chrono::Utc::now().into());

        Ok(product.update(&self.db).await?)
    }

    /// Deletes a product owned by a user.
    ///
    /// # Errors
    ///
    /// Returns `ProductError::NotFound` if no such row exists for this user.
    pub async fn delete(&self, user_id: Uuid, product_id: Uuid) -> Result<(), ProductError> {
        let existing = self.find(user_id, product_id).await?;
        existing.delete(&self.db).await?;
        Ok(())
    }
}
