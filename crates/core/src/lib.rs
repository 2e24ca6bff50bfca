//! Core business logic for Vendia.
//!
//! This crate contains pure business logic with ZERO web or database
//! dependencies. All domain types, credential handling, and metric
//! calculations live here.
//!
//! # Modules
//!
//! - `auth` - Password hashing and credential policy
//! - `session` - Session context and the session gate
//! - `metrics` - Stock, financial, and payables aggregation

pub mod auth;
pub mod metrics;
pub mod session;
