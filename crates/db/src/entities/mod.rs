//! `SeaORM` entity definitions.

pub mod expenses;
pub mod products;
pub mod purchases;
pub mod sales;
pub mod sea_orm_active_enums;
pub mod users;
