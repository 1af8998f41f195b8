//! Repository for the `pets` table.

use petstore_core::types::DbId;
use sqlx::PgPool;

use crate::models::pet::{PetRow, StatusCountRow};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, category_id, name, status";

/// Provides CRUD operations for pet base rows.
pub struct PetRepo;

impl PetRepo {
    /// Insert a live pet, returning its id.
    pub async fn create(
        pool: &PgPool,
        category_id: DbId,
        name: &str,
        status: &str,
    ) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO pets (category_id, name, status, is_deleted)
             VALUES ($1, $2, $3, FALSE)
             RETURNING id",
        )
        .bind(category_id)
        .bind(name)
        .bind(status)
        .fetch_one(pool)
        .await
    }

    /// Find a pet by ID. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<PetRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM pets WHERE id = $1 AND is_deleted = FALSE");
        sqlx::query_as::<_, PetRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Overwrite category, name and status of a live pet.
    ///
    /// Returns `false` if no live row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        category_id: DbId,
        name: &str,
        status: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE pets SET category_id = $2, name = $3, status = $4
             WHERE id = $1 AND is_deleted = FALSE",
        )
        .bind(id)
        .bind(category_id)
        .bind(name)
        .bind(status)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Soft-delete a pet. Returns `true` if a live row was flagged.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE pets SET is_deleted = TRUE WHERE id = $1 AND is_deleted = FALSE")
                .bind(id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Ids of live pets with the given status, ascending.
    pub async fn list_ids_by_status(pool: &PgPool, status: &str) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT id FROM pets WHERE status = $1 AND is_deleted = FALSE ORDER BY id",
        )
        .bind(status)
        .fetch_all(pool)
        .await
    }

    /// Live pet counts grouped by status.
    pub async fn count_by_status(pool: &PgPool) -> Result<Vec<StatusCountRow>, sqlx::Error> {
        sqlx::query_as::<_, StatusCountRow>(
            "SELECT status, COUNT(*) AS count FROM pets
             WHERE is_deleted = FALSE
             GROUP BY status
             ORDER BY status",
        )
        .fetch_all(pool)
        .await
    }
}
