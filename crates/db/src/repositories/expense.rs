//! Expense repository for database operations.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    ModelTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::{expenses, sea_orm_active_enums::ExpenseType};

/// Error types for expense operations.
#[derive(Debug, thiserror::Error)]
pub enum ExpenseError {
    /// Expense not found, or not owned by the requesting user.
    #[error("Expense not found: {0}")]
    NotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating an expense.
#[derive(Debug, Clone)]
pub struct CreateExpenseInput {
    /// Owning user ID.
    pub user_id: Uuid,
    /// Expense date.
    pub expense_date: NaiveDate,
    /// Expense category.
    pub category: String,
    /// Fixed or variable.
    pub expense_type: ExpenseType,
    /// Amount.
    pub amount: Decimal,
    /// Free-form description.
    pub description: Option<String>,
}

/// Input for updating an expense. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateExpenseInput {
    /// Expense date.
    pub expense_date: Option<NaiveDate>,
    /// Expense category.
    pub category: Option<String>,
    /// Fixed or variable.
    pub expense_type: Option<ExpenseType>,
    /// Amount.
    pub amount: Option<Decimal>,
    /// Free-form description.
    pub description: Option<Option<String>>,
}

/// Expense repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct ExpenseRepository {
    db: DatabaseConnection,
}

impl ExpenseRepository {
    /// Creates a new expense repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists all expenses owned by a user, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, user_id: Uuid) -> Result<Vec<expenses::Model>, DbErr> {
        expenses::Entity::find()
            .filter(expenses::Column::UserId.eq(user_id))
            .order_by_desc(expenses::Column::ExpenseDate)
            .all(&self.db)
            .await
    }

    /// Finds one expense owned by a user.
    ///
    /// # Errors
    ///
    /// Returns `ExpenseError::NotFound` if no such row exists for this user.
    pub async fn find(
        &self,
        user_id: Uuid,
        expense_id: Uuid,
    ) -> Result<expenses::Model, ExpenseError> {
        expenses::Entity::find_by_id(expense_id)
            .filter(expenses::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?
            .ok_or(ExpenseError::NotFound(expense_id))
    }

    /// Creates a new expense.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(&self, input: CreateExpenseInput) -> Result<expenses::Model, ExpenseError> {
        let expense = expenses::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(input.user_id),
            expense_date: Set(input.expense_date),
            category: Set(input.category),
            expense_type: Set(input.expense_type),
            amount: Set(input.amount),
            description: Set(input.description),
            created_at: Set(chrono::Utc::now().into()),
        };

        Ok(expense.insert(&self.db).await?)
    }

    /// Updates an expense owned by a user.
    ///
    /// # Errors
    ///
    /// Returns `ExpenseError::NotFound` if no such row exists for this user.
    pub async fn update(
        &self,
        user_id: Uuid,
        expense_id: Uuid,
        input: UpdateExpenseInput,
    ) -> Result<expenses::Model, ExpenseError> {
        let existing = self.find(user_id, expense_id).await?;
        let mut expense = existing.into_active_model();

        if let Some(expense_date) = input.expense_date {
            expense.expense_date = Set(expense_date);
        }
        if let Some(category) = input.category {
            expense.category = Set(category);
        }
        if let Some(expense_type) = input.expense_type {
            expense.expense_type = Set(expense_type);
        }
        if let Some(amount) = input.amount {
            expense.amount = Set(amount);
        }
        if let Some(description) = input.description {
            expense.description = Set(description);
        }

        Ok(expense.update(&self.db).await?)
    }

    /// Deletes an expense owned by a user.
    ///
    /// # Errors
    ///
    /// Returns `ExpenseError::NotFound` if no such row exists for this user.
    pub async fn delete(&self, user_id: Uuid, expense_id: Uuid) -> Result<(), ExpenseError> {
        let existing = self.find(user_id, expense_id).await?;
        existing.delete(&self.db).await?;
        Ok(())
    }
}
