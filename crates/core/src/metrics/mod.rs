//! Stock, financial, and payables aggregation.
//!
//! This module is the computation side of the dashboards: pure functions over
//! in-memory records that the db layer has already scoped to a single user.
//!
//! - Live stock and low-stock alerts
//! - Revenue / COGS / gross profit / margin
//! - Category profitability
//! - Inventory holding cost and DIO
//! - Supplier payables aging
//! - Expense summaries

pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use service::MetricsService;
pub use types::*;
