//! Repository for the `categories` table.

use petstore_core::types::DbId;
use sqlx::PgPool;

use crate::models::pet::CategoryRow;

const COLUMNS: &str = "id, name";

/// Provides lookups and idempotent creation for categories.
pub struct CategoryRepo;

impl CategoryRepo {
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<CategoryRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE id = $1");
        sqlx::query_as::<_, CategoryRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a category by its exact name.
    pub async fn find_by_name(
        pool: &PgPool,
        name: &str,
    ) -> Result<Option<CategoryRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE name = $1 ORDER BY id LIMIT 1");
        sqlx::query_as::<_, CategoryRow>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Create a category or return the existing one with the same name.
    ///
    /// Uses `ON CONFLICT` so two callers inserting the same new name both get
    /// the single surviving row.
    pub async fn create_or_get(pool: &PgPool, name: &str) -> Result<CategoryRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO categories (name) VALUES ($1) \
             ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CategoryRow>(&query)
            .bind(name)
            .fetch_one(pool)
            .await
    }
}
