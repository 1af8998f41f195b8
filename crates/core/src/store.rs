//! The relational store contract consumed by the aggregate engine.
//!
//! Every method is a typed point operation on a single table; joins are done
//! by the callers issuing several calls. Implementations bound each call with
//! a deadline and report the outcome as one of three kinds:
//!
//! | Outcome            | Variant                       |
//! |--------------------|-------------------------------|
//! | no matching row    | [`StoreError::NotFound`]      |
//! | deadline exceeded  | [`StoreError::Timeout`]       |
//! | anything else      | [`StoreError::Backend`]       |
//!
//! Reads of `pets` exclude soft-deleted rows.

use std::time::Duration;

use async_trait::async_trait;

use crate::pet::{Category, PetRecord, PetTagPair, PhotoUrl, Tag};
use crate::types::DbId;

/// Default per-call deadline applied by store implementations.
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(3);

/// Boxed underlying failure carried by [`StoreError::Backend`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    #[error("{operation} timed out after {}ms", after.as_millis())]
    Timeout {
        operation: &'static str,
        after: Duration,
    },

    #[error("store failure: {0}")]
    Backend(#[source] BoxError),
}

impl StoreError {
    pub fn not_found(entity: &'static str, key: impl ToString) -> Self {
        StoreError::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

/// Number of live pets carrying a given status value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}

/// Typed operations over the pet tables.
///
/// Injected as `Arc<dyn PetStore>`; implementations share one connection pool
/// and check a connection out per call only.
#[async_trait]
pub trait PetStore: Send + Sync {
    // -- pets ---------------------------------------------------------------

    /// Fetch a live (non-deleted) pet base row.
    async fn get_pet(&self, id: DbId) -> Result<PetRecord, StoreError>;

    /// Insert a live pet base row and return its id.
    async fn insert_pet(
        &self,
        category_id: DbId,
        name: &str,
        status: &str,
    ) -> Result<DbId, StoreError>;

    /// Overwrite `category_id`, `name` and `status` of a live pet.
    async fn update_pet(&self, pet: &PetRecord) -> Result<(), StoreError>;

    /// Flip `is_deleted` on a pet. Dependent rows are left untouched.
    async fn soft_delete_pet(&self, id: DbId) -> Result<(), StoreError>;

    /// Ids of live pets whose status equals `status`, ascending.
    async fn list_pet_ids_by_status(&self, status: &str) -> Result<Vec<DbId>, StoreError>;

    /// Live pet counts grouped by status.
    async fn count_pets_by_status(&self) -> Result<Vec<StatusCount>, StoreError>;

    // -- categories ---------------------------------------------------------

    async fn get_category_by_id(&self, id: DbId) -> Result<Category, StoreError>;

    /// First category with this exact name.
    async fn get_category_by_name(&self, name: &str) -> Result<Category, StoreError>;

    async fn insert_category(&self, name: &str) -> Result<Category, StoreError>;

    // -- tags ---------------------------------------------------------------

    async fn get_tag_by_id(&self, id: DbId) -> Result<Tag, StoreError>;

    /// First tag with this exact name.
    async fn get_tag_by_name(&self, name: &str) -> Result<Tag, StoreError>;

    async fn insert_tag(&self, name: &str) -> Result<Tag, StoreError>;

    // -- photo urls ---------------------------------------------------------

    /// All photo rows of a pet. An empty vec is a valid answer.
    async fn list_photo_urls(&self, pet_id: DbId) -> Result<Vec<PhotoUrl>, StoreError>;

    async fn insert_photo_url(&self, pet_id: DbId, url: &str) -> Result<PhotoUrl, StoreError>;

    /// Physically delete every photo row of a pet, returning the count.
    async fn delete_photo_urls(&self, pet_id: DbId) -> Result<u64, StoreError>;

    // -- pet/tag junction ---------------------------------------------------

    /// All junction rows of a pet. An empty vec is a valid answer.
    async fn list_pet_tag_pairs(&self, pet_id: DbId) -> Result<Vec<PetTagPair>, StoreError>;

    async fn insert_pet_tag_pair(
        &self,
        pet_id: DbId,
        tag_id: DbId,
    ) -> Result<PetTagPair, StoreError>;

    /// Physically delete every junction row of a pet, returning the count.
    async fn delete_pet_tag_pairs(&self, pet_id: DbId) -> Result<u64, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_display_reports_milliseconds() {
        let err = StoreError::Timeout {
            operation: "get_pet",
            after: DEFAULT_STORE_TIMEOUT,
        };
        assert_eq!(err.to_string(), "get_pet timed out after 3000ms");
    }

    #[test]
    fn not_found_helper_formats_key() {
        let err = StoreError::not_found("Tag", 12);
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Tag not found: 12");
    }

    #[test]
    fn backend_error_keeps_source() {
        let err = StoreError::Backend("connection reset".into());
        assert!(std::error::Error::source(&err).is_some());
        assert!(!err.is_not_found());
    }
}
