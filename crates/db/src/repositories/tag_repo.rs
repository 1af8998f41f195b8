//! Repository for the `tags` table.

use petstore_core::types::DbId;
use sqlx::PgPool;

use crate::models::pet::TagRow;

const COLUMNS: &str = "id, name";

/// Provides lookups and idempotent creation for tags.
pub struct TagRepo;

impl TagRepo {
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<TagRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tags WHERE id = $1");
        sqlx::query_as::<_, TagRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_name(
        pool: &PgPool,
        name: &str,
    ) -> Result<Option<TagRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tags WHERE name = $1 ORDER BY id LIMIT 1");
        sqlx::query_as::<_, TagRow>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Create a tag or return the existing one if the name is already taken.
    pub async fn create_or_get(pool: &PgPool, name: &str) -> Result<TagRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO tags (name) VALUES ($1) \
             ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TagRow>(&query)
            .bind(name)
            .fetch_one(pool)
            .await
    }
}
