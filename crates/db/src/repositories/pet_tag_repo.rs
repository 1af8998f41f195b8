//! Repository for the `pet_tags` junction table.

use petstore_core::types::DbId;
use sqlx::PgPool;

use crate::models::pet::PetTagRow;

const COLUMNS: &str = "id, pet_id, tag_id";

pub struct PetTagRepo;

impl PetTagRepo {
    /// Link a pet to a tag, returning the new junction row.
    pub async fn create(pool: &PgPool, pet_id: DbId, tag_id: DbId) -> Result<PetTagRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO pet_tags (pet_id, tag_id) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PetTagRow>(&query)
            .bind(pet_id)
            .bind(tag_id)
            .fetch_one(pool)
            .await
    }

    pub async fn list_by_pet(pool: &PgPool, pet_id: DbId) -> Result<Vec<PetTagRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM pet_tags WHERE pet_id = $1 ORDER BY id");
        sqlx::query_as::<_, PetTagRow>(&query)
            .bind(pet_id)
            .fetch_all(pool)
            .await
    }

    /// Physically delete every junction row of a pet. Returns the number removed.
    pub async fn delete_by_pet(pool: &PgPool, pet_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM pet_tags WHERE pet_id = $1")
            .bind(pet_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
