//! `SeaORM` active enums mapped to Postgres enum types.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Vendor payment status on a purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "payment_status")]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Not yet paid.
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Paid in full.
    #[sea_orm(string_value = "completed")]
    Completed,
    /// Past due and unpaid.
    #[sea_orm(string_value = "overdue")]
    Overdue,
}

/// Fixed vs variable expense classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "expense_type")]
#[serde(rename_all = "snake_case")]
pub enum ExpenseType {
    /// Recurring, amount independent of sales volume.
    #[sea_orm(string_value = "fixed")]
    Fixed,
    /// Varies with activity.
    #[sea_orm(string_value = "variable")]
    Variable,
}
