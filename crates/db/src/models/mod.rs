//! Row types and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` struct matching the database row
//! - Conversions into the `petstore-core` domain types
//! - Create DTOs where the insert shape differs from the row

pub mod order;
pub mod pet;
pub mod user;
