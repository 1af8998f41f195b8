//! Store order model.

use petstore_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A live row from `orders`.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: DbId,
    pub pet_id: DbId,
    pub quantity: i32,
    pub ship_date: Timestamp,
    pub status: String,
    #[serde(rename = "complete")]
    pub is_complete: bool,
}
