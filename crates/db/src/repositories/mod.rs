//! Repository abstractions for data access.
//!
//! Each repository wraps a `DatabaseConnection` and exposes the queries one
//! entity needs. Tenant-scoped repositories always filter by `user_id`.

pub mod expense;
pub mod metrics;
pub mod product;
pub mod purchase;
pub mod sale;
pub mod user;

pub use expense::ExpenseRepository;
pub use metrics::MetricsRepository;
pub use product::ProductRepository;
pub use purchase::PurchaseRepository;
pub use sale::SaleRepository;
pub use user::UserRepository;
