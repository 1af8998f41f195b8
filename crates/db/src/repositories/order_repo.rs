//! Repository for the `orders` table.

use petstore_core::order::ValidatedOrder;
use petstore_core::types::DbId;
use sqlx::PgPool;

use crate::models::order::Order;

const COLUMNS: &str = "id, pet_id, quantity, ship_date, status, is_complete";

/// Provides CRUD operations for store orders.
pub struct OrderRepo;

impl OrderRepo {
    /// Insert a validated order, returning the created row.
    pub async fn create(pool: &PgPool, input: &ValidatedOrder) -> Result<Order, sqlx::Error> {
        let query = format!(
            "INSERT INTO orders (pet_id, quantity, ship_date, status, is_complete, is_deleted)
             VALUES ($1, $2, $3, $4, $5, FALSE)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Order>(&query)
            .bind(input.pet_id)
            .bind(input.quantity)
            .bind(input.ship_date)
            .bind(&input.status)
            .bind(input.complete)
            .fetch_one(pool)
            .await
    }

    /// Find an order by ID. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Order>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM orders WHERE id = $1 AND is_deleted = FALSE");
        sqlx::query_as::<_, Order>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete an order. Returns `true` if a live row was flagged.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE orders SET is_deleted = TRUE WHERE id = $1 AND is_deleted = FALSE",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
