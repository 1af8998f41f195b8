//! In-process [`PetStore`] used by tests and local tooling.
//!
//! Behaves like the PostgreSQL adapter: ids are assigned from per-table
//! counters starting at 1, reads of pets skip soft-deleted rows, and inserting
//! a category or tag whose name already exists returns the existing row.
//!
//! Failures and delays can be injected per operation with
//! [`InMemoryPetStore::inject_fault`] to exercise partial-write, timeout and
//! cancellation paths.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;

use crate::pet::{Category, PetRecord, PetTagPair, PhotoUrl, Tag};
use crate::store::{PetStore, StatusCount, StoreError, DEFAULT_STORE_TIMEOUT};
use crate::types::DbId;

/// What the next call of an operation does instead of its normal behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    Backend,
    Timeout,
    /// Sleep before running the operation normally.
    Delay(Duration),
}

impl Fault {
    fn into_error(self, operation: &'static str) -> StoreError {
        match self {
            Fault::Timeout => StoreError::Timeout {
                operation,
                after: DEFAULT_STORE_TIMEOUT,
            },
            Fault::Backend | Fault::Delay(_) => {
                StoreError::Backend(format!("injected failure in {operation}").into())
            }
        }
    }
}

#[derive(Debug, Clone)]
struct PetRow {
    record: PetRecord,
    is_deleted: bool,
}

#[derive(Debug, Default)]
struct State {
    next_id: HashMap<&'static str, DbId>,
    pets: BTreeMap<DbId, PetRow>,
    categories: BTreeMap<DbId, Category>,
    tags: BTreeMap<DbId, Tag>,
    photo_urls: BTreeMap<DbId, PhotoUrl>,
    pet_tags: BTreeMap<DbId, PetTagPair>,
    faults: HashMap<&'static str, Fault>,
    failing_tags: HashSet<DbId>,
}

impl State {
    fn next_id(&mut self, table: &'static str) -> DbId {
        let id = self.next_id.entry(table).or_insert(0);
        *id += 1;
        *id
    }

    fn live_pet_mut(&mut self, id: DbId) -> Result<&mut PetRow, StoreError> {
        self.pets
            .get_mut(&id)
            .filter(|row| !row.is_deleted)
            .ok_or_else(|| StoreError::not_found("Pet", id))
    }
}

#[derive(Debug, Default)]
pub struct InMemoryPetStore {
    state: Mutex<State>,
}

impl InMemoryPetStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn check_fault(&self, operation: &'static str) -> Result<(), StoreError> {
        let fault = self.lock().faults.remove(operation);
        match fault {
            None => Ok(()),
            Some(Fault::Delay(pause)) => {
                tokio::time::sleep(pause).await;
                Ok(())
            }
            Some(fault) => Err(fault.into_error(operation)),
        }
    }

    /// Make the next call of `operation` fail or stall with `fault`.
    ///
    /// `operation` is the [`PetStore`] method name, e.g. `"insert_photo_url"`.
    /// The fault is consumed by the first call.
    pub fn inject_fault(&self, operation: &'static str, fault: Fault) {
        self.lock().faults.insert(operation, fault);
    }

    /// Make every `get_tag_by_id(tag_id)` fail with a backend error.
    pub fn fail_tag_lookups(&self, tag_id: DbId) {
        self.lock().failing_tags.insert(tag_id);
    }

    /// Physically drop a tag row, leaving junction rows that point at it.
    pub fn remove_tag(&self, id: DbId) {
        self.lock().tags.remove(&id);
    }

    /// Physically drop a category row, leaving pets that point at it.
    pub fn remove_category(&self, id: DbId) {
        self.lock().categories.remove(&id);
    }

    pub fn category_count(&self) -> usize {
        self.lock().categories.len()
    }

    pub fn tag_count(&self) -> usize {
        self.lock().tags.len()
    }

    /// Photo rows of a pet, including rows of soft-deleted pets.
    pub fn photo_url_rows(&self, pet_id: DbId) -> Vec<PhotoUrl> {
        self.lock()
            .photo_urls
            .values()
            .filter(|p| p.pet_id == pet_id)
            .cloned()
            .collect()
    }

    /// Junction rows of a pet, including rows of soft-deleted pets.
    pub fn pet_tag_rows(&self, pet_id: DbId) -> Vec<PetTagPair> {
        self.lock()
            .pet_tags
            .values()
            .filter(|p| p.pet_id == pet_id)
            .copied()
            .collect()
    }

    /// `Some(flag)` if a base row exists for `id`, deleted or not.
    pub fn is_deleted(&self, id: DbId) -> Option<bool> {
        self.lock().pets.get(&id).map(|row| row.is_deleted)
    }
}

#[async_trait]
impl PetStore for InMemoryPetStore {
    async fn get_pet(&self, id: DbId) -> Result<PetRecord, StoreError> {
        self.check_fault("get_pet").await?;
        let mut state = self.lock();
        state.live_pet_mut(id).map(|row| row.record.clone())
    }

    async fn insert_pet(
        &self,
        category_id: DbId,
        name: &str,
        status: &str,
    ) -> Result<DbId, StoreError> {
        self.check_fault("insert_pet").await?;
        let mut state = self.lock();
        let id = state.next_id("pets");
        state.pets.insert(
            id,
            PetRow {
                record: PetRecord {
                    id,
                    category_id,
                    name: name.to_string(),
                    status: status.to_string(),
                },
                is_deleted: false,
            },
        );
        Ok(id)
    }

    async fn update_pet(&self, pet: &PetRecord) -> Result<(), StoreError> {
        self.check_fault("update_pet").await?;
        let mut state = self.lock();
        let row = state.live_pet_mut(pet.id)?;
        row.record.category_id = pet.category_id;
        row.record.name = pet.name.clone();
        row.record.status = pet.status.clone();
        Ok(())
    }

    async fn soft_delete_pet(&self, id: DbId) -> Result<(), StoreError> {
        self.check_fault("soft_delete_pet").await?;
        let mut state = self.lock();
        state.live_pet_mut(id)?.is_deleted = true;
        Ok(())
    }

    async fn list_pet_ids_by_status(&self, status: &str) -> Result<Vec<DbId>, StoreError> {
        self.check_fault("list_pet_ids_by_status").await?;
        let state = self.lock();
        Ok(state
            .pets
            .values()
            .filter(|row| !row.is_deleted && row.record.status == status)
            .map(|row| row.record.id)
            .collect())
    }

    async fn count_pets_by_status(&self) -> Result<Vec<StatusCount>, StoreError> {
        self.check_fault("count_pets_by_status").await?;
        let state = self.lock();
        let mut counts: BTreeMap<String, i64> = BTreeMap::new();
        for row in state.pets.values().filter(|row| !row.is_deleted) {
            *counts.entry(row.record.status.clone()).or_default() += 1;
        }
        Ok(counts
            .into_iter()
            .map(|(status, count)| StatusCount { status, count })
            .collect())
    }

    async fn get_category_by_id(&self, id: DbId) -> Result<Category, StoreError> {
        self.check_fault("get_category_by_id").await?;
        let state = self.lock();
        state
            .categories
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("Category", id))
    }

    async fn get_category_by_name(&self, name: &str) -> Result<Category, StoreError> {
        self.check_fault("get_category_by_name").await?;
        let state = self.lock();
        state
            .categories
            .values()
            .find(|c| c.name == name)
            .cloned()
            .ok_or_else(|| StoreError::not_found("Category", name))
    }

    async fn insert_category(&self, name: &str) -> Result<Category, StoreError> {
        self.check_fault("insert_category").await?;
        let mut state = self.lock();
        if let Some(existing) = state.categories.values().find(|c| c.name == name) {
            return Ok(existing.clone());
        }
        let category = Category {
            id: state.next_id("categories"),
            name: name.to_string(),
        };
        state.categories.insert(category.id, category.clone());
        Ok(category)
    }

    async fn get_tag_by_id(&self, id: DbId) -> Result<Tag, StoreError> {
        self.check_fault("get_tag_by_id").await?;
        let state = self.lock();
        if state.failing_tags.contains(&id) {
            return Err(Fault::Backend.into_error("get_tag_by_id"));
        }
        state
            .tags
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("Tag", id))
    }

    async fn get_tag_by_name(&self, name: &str) -> Result<Tag, StoreError> {
        self.check_fault("get_tag_by_name").await?;
        let state = self.lock();
        state
            .tags
            .values()
            .find(|t| t.name == name)
            .cloned()
            .ok_or_else(|| StoreError::not_found("Tag", name))
    }

    async fn insert_tag(&self, name: &str) -> Result<Tag, StoreError> {
        self.check_fault("insert_tag").await?;
        let mut state = self.lock();
        if let Some(existing) = state.tags.values().find(|t| t.name == name) {
            return Ok(existing.clone());
        }
        let tag = Tag {
            id: state.next_id("tags"),
            name: name.to_string(),
        };
        state.tags.insert(tag.id, tag.clone());
        Ok(tag)
    }

    async fn list_photo_urls(&self, pet_id: DbId) -> Result<Vec<PhotoUrl>, StoreError> {
        self.check_fault("list_photo_urls").await?;
        let state = self.lock();
        Ok(state
            .photo_urls
            .values()
            .filter(|p| p.pet_id == pet_id)
            .cloned()
            .collect())
    }

    async fn insert_photo_url(&self, pet_id: DbId, url: &str) -> Result<PhotoUrl, StoreError> {
        self.check_fault("insert_photo_url").await?;
        let mut state = self.lock();
        let photo = PhotoUrl {
            id: state.next_id("photo_urls"),
            pet_id,
            url: url.to_string(),
        };
        state.photo_urls.insert(photo.id, photo.clone());
        Ok(photo)
    }

    async fn delete_photo_urls(&self, pet_id: DbId) -> Result<u64, StoreError> {
        self.check_fault("delete_photo_urls").await?;
        let mut state = self.lock();
        let before = state.photo_urls.len();
        state.photo_urls.retain(|_, p| p.pet_id != pet_id);
        Ok((before - state.photo_urls.len()) as u64)
    }

    async fn list_pet_tag_pairs(&self, pet_id: DbId) -> Result<Vec<PetTagPair>, StoreError> {
        self.check_fault("list_pet_tag_pairs").await?;
        let state = self.lock();
        Ok(state
            .pet_tags
            .values()
            .filter(|p| p.pet_id == pet_id)
            .copied()
            .collect())
    }

    async fn insert_pet_tag_pair(
        &self,
        pet_id: DbId,
        tag_id: DbId,
    ) -> Result<PetTagPair, StoreError> {
        self.check_fault("insert_pet_tag_pair").await?;
        let mut state = self.lock();
        let pair = PetTagPair {
            id: state.next_id("pet_tags"),
            pet_id,
            tag_id,
        };
        state.pet_tags.insert(pair.id, pair);
        Ok(pair)
    }

    async fn delete_pet_tag_pairs(&self, pet_id: DbId) -> Result<u64, StoreError> {
        self.check_fault("delete_pet_tag_pairs").await?;
        let mut state = self.lock();
        let before = state.pet_tags.len();
        state.pet_tags.retain(|_, p| p.pet_id != pet_id);
        Ok((before - state.pet_tags.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[tokio::test]
    async fn ids_start_at_one_per_table() {
        let store = InMemoryPetStore::new();
        let category = store.insert_category("cat").await.unwrap();
        let tag = store.insert_tag("fluffy").await.unwrap();
        let pet = store.insert_pet(category.id, "Poppy", "available").await.unwrap();
        assert_eq!((category.id, tag.id, pet), (1, 1, 1));
    }

    #[tokio::test]
    async fn soft_deleted_pets_are_invisible() {
        let store = InMemoryPetStore::new();
        let id = store.insert_pet(1, "Ghost", "sold").await.unwrap();
        store.soft_delete_pet(id).await.unwrap();

        assert_matches!(store.get_pet(id).await, Err(StoreError::NotFound { .. }));
        assert_matches!(store.soft_delete_pet(id).await, Err(StoreError::NotFound { .. }));
        assert!(store.list_pet_ids_by_status("sold").await.unwrap().is_empty());
        assert_eq!(store.is_deleted(id), Some(true));
    }

    #[tokio::test]
    async fn injected_fault_fires_once() {
        let store = InMemoryPetStore::new();
        store.inject_fault("insert_tag", Fault::Timeout);

        assert_matches!(
            store.insert_tag("a").await,
            Err(StoreError::Timeout { operation: "insert_tag", .. })
        );
        assert!(store.insert_tag("a").await.is_ok());
    }

    #[tokio::test]
    async fn delayed_operation_still_writes() {
        let store = InMemoryPetStore::new();
        store.inject_fault("insert_photo_url", Fault::Delay(Duration::from_millis(20)));

        let photo = store.insert_photo_url(1, "a.png").await.unwrap();
        assert_eq!(store.photo_url_rows(1), vec![photo]);
    }

    #[tokio::test]
    async fn counts_group_live_pets_by_status() {
        let store = InMemoryPetStore::new();
        store.insert_pet(1, "a", "available").await.unwrap();
        store.insert_pet(1, "b", "available").await.unwrap();
        let sold = store.insert_pet(1, "c", "sold").await.unwrap();
        store.soft_delete_pet(sold).await.unwrap();

        let counts = store.count_pets_by_status().await.unwrap();
        assert_eq!(
            counts,
            vec![StatusCount {
                status: "available".into(),
                count: 2
            }]
        );
    }
}
