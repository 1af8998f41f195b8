//! Repository for the `photo_urls` table.

use petstore_core::types::DbId;
use sqlx::PgPool;

use crate::models::pet::PhotoUrlRow;

const COLUMNS: &str = "id, pet_id, url";

/// Provides operations on the photo urls owned by a pet.
pub struct PhotoUrlRepo;

impl PhotoUrlRepo {
    pub async fn create(pool: &PgPool, pet_id: DbId, url: &str) -> Result<PhotoUrlRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO photo_urls (pet_id, url) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PhotoUrlRow>(&query)
            .bind(pet_id)
            .bind(url)
            .fetch_one(pool)
            .await
    }

    /// All photo urls of a pet, in insertion order.
    pub async fn list_by_pet(pool: &PgPool, pet_id: DbId) -> Result<Vec<PhotoUrlRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM photo_urls WHERE pet_id = $1 ORDER BY id");
        sqlx::query_as::<_, PhotoUrlRow>(&query)
            .bind(pet_id)
            .fetch_all(pool)
            .await
    }

    /// Physically delete every photo url of a pet. Returns the number removed.
    pub async fn delete_by_pet(pool: &PgPool, pet_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM photo_urls WHERE pet_id = $1")
            .bind(pet_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
