//! PostgreSQL implementation of [`PetStore`].
//!
//! Each trait method delegates to one repository call wrapped in a deadline:
//!
//! | sqlx outcome                     | `StoreError`  |
//! |----------------------------------|---------------|
//! | `Ok(None)` / `RowNotFound`       | `NotFound`    |
//! | deadline elapsed                 | `Timeout`     |
//! | any other `sqlx::Error`          | `Backend`     |
//!
//! A timed-out call is dropped mid-flight; sqlx returns the connection to the
//! pool (or discards it) on drop.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use petstore_core::pet::{Category, PetRecord, PetTagPair, PhotoUrl, Tag};
use petstore_core::store::{PetStore, StatusCount, StoreError, DEFAULT_STORE_TIMEOUT};
use petstore_core::types::DbId;
use sqlx::PgPool;

use crate::repositories::{CategoryRepo, PetRepo, PetTagRepo, PhotoUrlRepo, TagRepo};

/// [`PetStore`] over a shared [`PgPool`] with a per-call deadline.
#[derive(Clone)]
pub struct PgPetStore {
    pool: PgPool,
    timeout: Duration,
}

impl PgPetStore {
    pub fn new(pool: PgPool) -> Self {
        Self::with_timeout(pool, DEFAULT_STORE_TIMEOUT)
    }

    pub fn with_timeout(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }

    /// Run one query under the store deadline and translate its error.
    async fn run<T, F>(&self, operation: &'static str, fut: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(sqlx::Error::RowNotFound)) => Err(StoreError::not_found("row", operation)),
            Ok(Err(err)) => {
                tracing::error!(operation, error = %err, "Store query failed");
                Err(StoreError::Backend(Box::new(err)))
            }
            Err(_) => {
                tracing::warn!(operation, timeout_ms = self.timeout.as_millis() as u64, "Store query timed out");
                Err(StoreError::Timeout {
                    operation,
                    after: self.timeout,
                })
            }
        }
    }
}

fn found<T, R>(row: Option<R>, entity: &'static str, key: impl ToString) -> Result<T, StoreError>
where
    R: Into<T>,
{
    row.map(Into::into)
        .ok_or_else(|| StoreError::not_found(entity, key))
}

#[async_trait]
impl PetStore for PgPetStore {
    async fn get_pet(&self, id: DbId) -> Result<PetRecord, StoreError> {
        let row = self.run("get_pet", PetRepo::find_by_id(&self.pool, id)).await?;
        found(row, "Pet", id)
    }

    async fn insert_pet(
        &self,
        category_id: DbId,
        name: &str,
        status: &str,
    ) -> Result<DbId, StoreError> {
        self.run(
            "insert_pet",
            PetRepo::create(&self.pool, category_id, name, status),
        )
        .await
    }

    async fn update_pet(&self, pet: &PetRecord) -> Result<(), StoreError> {
        let updated = self
            .run(
                "update_pet",
                PetRepo::update(&self.pool, pet.id, pet.category_id, &pet.name, &pet.status),
            )
            .await?;
        if updated {
            Ok(())
        } else {
            Err(StoreError::not_found("Pet", pet.id))
        }
    }

    async fn soft_delete_pet(&self, id: DbId) -> Result<(), StoreError> {
        let deleted = self
            .run("soft_delete_pet", PetRepo::soft_delete(&self.pool, id))
            .await?;
        if deleted {
            Ok(())
        } else {
            Err(StoreError::not_found("Pet", id))
        }
    }

    async fn list_pet_ids_by_status(&self, status: &str) -> Result<Vec<DbId>, StoreError> {
        self.run(
            "list_pet_ids_by_status",
            PetRepo::list_ids_by_status(&self.pool, status),
        )
        .await
    }

    async fn count_pets_by_status(&self) -> Result<Vec<StatusCount>, StoreError> {
        let rows = self
            .run("count_pets_by_status", PetRepo::count_by_status(&self.pool))
            .await?;
        Ok(rows
            .into_iter()
            .map(|r| StatusCount {
                status: r.status,
                count: r.count,
            })
            .collect())
    }

    async fn get_category_by_id(&self, id: DbId) -> Result<Category, StoreError> {
        let row = self
            .run("get_category_by_id", CategoryRepo::find_by_id(&self.pool, id))
            .await?;
        found(row, "Category", id)
    }

    async fn get_category_by_name(&self, name: &str) -> Result<Category, StoreError> {
        let row = self
            .run(
                "get_category_by_name",
                CategoryRepo::find_by_name(&self.pool, name),
            )
            .await?;
        found(row, "Category", name)
    }

    async fn insert_category(&self, name: &str) -> Result<Category, StoreError> {
        self.run("insert_category", CategoryRepo::create_or_get(&self.pool, name))
            .await
            .map(Into::into)
    }

    async fn get_tag_by_id(&self, id: DbId) -> Result<Tag, StoreError> {
        let row = self
            .run("get_tag_by_id", TagRepo::find_by_id(&self.pool, id))
            .await?;
        found(row, "Tag", id)
    }

    async fn get_tag_by_name(&self, name: &str) -> Result<Tag, StoreError> {
        let row = self
            .run("get_tag_by_name", TagRepo::find_by_name(&self.pool, name))
            .await?;
        found(row, "Tag", name)
    }

    async fn insert_tag(&self, name: &str) -> Result<Tag, StoreError> {
        self.run("insert_tag", TagRepo::create_or_get(&self.pool, name))
            .await
            .map(Into::into)
    }

    async fn list_photo_urls(&self, pet_id: DbId) -> Result<Vec<PhotoUrl>, StoreError> {
        let rows = self
            .run("list_photo_urls", PhotoUrlRepo::list_by_pet(&self.pool, pet_id))
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn insert_photo_url(&self, pet_id: DbId, url: &str) -> Result<PhotoUrl, StoreError> {
        self.run("insert_photo_url", PhotoUrlRepo::create(&self.pool, pet_id, url))
            .await
            .map(Into::into)
    }

    async fn delete_photo_urls(&self, pet_id: DbId) -> Result<u64, StoreError> {
        self.run(
            "delete_photo_urls",
            PhotoUrlRepo::delete_by_pet(&self.pool, pet_id),
        )
        .await
    }

    async fn list_pet_tag_pairs(&self, pet_id: DbId) -> Result<Vec<PetTagPair>, StoreError> {
        let rows = self
            .run("list_pet_tag_pairs", PetTagRepo::list_by_pet(&self.pool, pet_id))
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn insert_pet_tag_pair(
        &self,
        pet_id: DbId,
        tag_id: DbId,
    ) -> Result<PetTagPair, StoreError> {
        self.run(
            "insert_pet_tag_pair",
            PetTagRepo::create(&self.pool, pet_id, tag_id),
        )
        .await
        .map(Into::into)
    }

    async fn delete_pet_tag_pairs(&self, pet_id: DbId) -> Result<u64, StoreError> {
        self.run(
            "delete_pet_tag_pairs",
            PetTagRepo::delete_by_pet(&self.pool, pet_id),
        )
        .await
    }
}
