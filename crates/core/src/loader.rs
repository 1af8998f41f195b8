//! Assembles a composite [`Pet`] from its normalized rows.
//!
//! Load order: base row, category, photo urls, junction rows, then one tag
//! lookup per junction row. A missing base row is `NotFound`; a category that
//! cannot be resolved fails the whole load. Tag lookups follow the configured
//! [`TagResolution`] policy.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::CoreError;
use crate::pet::Pet;
use crate::store::{PetStore, StoreError};
use crate::types::DbId;

/// How the loader treats a junction row whose tag cannot be resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TagResolution {
    /// Skip the tag, log it, and keep loading. The returned pet is missing
    /// that tag and nothing else signals it except [`LoadedPet::skipped_tag_ids`].
    #[default]
    BestEffort,
    /// Fail the load on the first unresolvable tag.
    Strict,
}

impl fmt::Display for TagResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagResolution::BestEffort => f.write_str("best_effort"),
            TagResolution::Strict => f.write_str("strict"),
        }
    }
}

impl FromStr for TagResolution {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "best_effort" | "best-effort" => Ok(TagResolution::BestEffort),
            "strict" => Ok(TagResolution::Strict),
            other => Err(CoreError::Validation(format!(
                "Unknown tag resolution policy '{other}'. Must be one of: best_effort, strict"
            ))),
        }
    }
}

/// A loaded pet plus the junction tag ids that were dropped while loading it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedPet {
    pub pet: Pet,
    pub skipped_tag_ids: Vec<DbId>,
}

impl LoadedPet {
    pub fn is_partial(&self) -> bool {
        !self.skipped_tag_ids.is_empty()
    }
}

#[derive(Clone)]
pub struct PetLoader {
    store: Arc<dyn PetStore>,
    tag_resolution: TagResolution,
}

impl PetLoader {
    pub fn new(store: Arc<dyn PetStore>, tag_resolution: TagResolution) -> Self {
        Self {
            store,
            tag_resolution,
        }
    }

    pub fn tag_resolution(&self) -> TagResolution {
        self.tag_resolution
    }

    /// Load the live pet `id`.
    pub async fn load(&self, id: DbId) -> Result<Pet, CoreError> {
        self.load_with_report(id).await.map(|loaded| loaded.pet)
    }

    /// Load the live pet `id` and report which tags could not be resolved.
    pub async fn load_with_report(&self, id: DbId) -> Result<LoadedPet, CoreError> {
        let record = match self.store.get_pet(id).await {
            Ok(record) => record,
            Err(StoreError::NotFound { .. }) => {
                return Err(CoreError::NotFound { entity: "Pet", id });
            }
            Err(err) => return Err(CoreError::store("failed to load pet")(err)),
        };

        let category = self
            .store
            .get_category_by_id(record.category_id)
            .await
            .map_err(CoreError::store("failed to resolve category"))?;

        let photo_urls = self
            .store
            .list_photo_urls(record.id)
            .await
            .map_err(CoreError::store("failed to load photo urls"))?
            .into_iter()
            .map(|photo| photo.url)
            .collect();

        let pairs = self
            .store
            .list_pet_tag_pairs(record.id)
            .await
            .map_err(CoreError::store("failed to load pet tag pairs"))?;

        let mut tags = Vec::with_capacity(pairs.len());
        let mut skipped_tag_ids = Vec::new();
        for pair in pairs {
            match self.store.get_tag_by_id(pair.tag_id).await {
                Ok(tag) => tags.push(tag),
                Err(err) => match self.tag_resolution {
                    TagResolution::BestEffort => {
                        tracing::warn!(
                            pet_id = record.id,
                            tag_id = pair.tag_id,
                            error = %err,
                            "Skipping unresolvable tag"
                        );
                        skipped_tag_ids.push(pair.tag_id);
                    }
                    TagResolution::Strict => {
                        return Err(CoreError::store("failed to resolve tag")(err));
                    }
                },
            }
        }

        Ok(LoadedPet {
            pet: Pet {
                id: record.id,
                category,
                name: record.name,
                photo_urls,
                tags,
                status: record.status,
            },
            skipped_tag_ids,
        })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::memory::{Fault, InMemoryPetStore};

    async fn seeded() -> (Arc<InMemoryPetStore>, DbId, Vec<DbId>) {
        let store = Arc::new(InMemoryPetStore::new());
        let category = store.insert_category("dog").await.unwrap();
        let pet_id = store
            .insert_pet(category.id, "Rex", "available")
            .await
            .unwrap();
        store
            .insert_photo_url(pet_id, "https://img.example/rex.png")
            .await
            .unwrap();
        let mut tag_ids = Vec::new();
        for name in ["loyal", "large"] {
            let tag = store.insert_tag(name).await.unwrap();
            store.insert_pet_tag_pair(pet_id, tag.id).await.unwrap();
            tag_ids.push(tag.id);
        }
        (store, pet_id, tag_ids)
    }

    #[tokio::test]
    async fn load_assembles_every_part() {
        let (store, pet_id, _) = seeded().await;
        let loader = PetLoader::new(store, TagResolution::BestEffort);

        let pet = loader.load(pet_id).await.unwrap();
        assert_eq!(pet.name, "Rex");
        assert_eq!(pet.category.name, "dog");
        assert_eq!(pet.photo_urls, vec!["https://img.example/rex.png"]);
        let names: Vec<_> = pet.tag_names().collect();
        assert_eq!(names, vec!["loyal", "large"]);
    }

    #[tokio::test]
    async fn missing_pet_is_not_found() {
        let store = Arc::new(InMemoryPetStore::new());
        let loader = PetLoader::new(store, TagResolution::BestEffort);
        assert_matches!(
            loader.load(77).await,
            Err(CoreError::NotFound { entity: "Pet", id: 77 })
        );
    }

    #[tokio::test]
    async fn missing_category_fails_the_whole_load() {
        let (store, pet_id, _) = seeded().await;
        let category_id = store.get_pet(pet_id).await.unwrap().category_id;
        store.remove_category(category_id);
        let loader = PetLoader::new(store, TagResolution::BestEffort);

        assert_matches!(
            loader.load(pet_id).await,
            Err(CoreError::Store {
                context: "failed to resolve category",
                source: StoreError::NotFound { .. }
            })
        );
    }

    #[tokio::test]
    async fn best_effort_skips_failing_tag_and_reports_it() {
        let (store, pet_id, tag_ids) = seeded().await;
        store.fail_tag_lookups(tag_ids[0]);
        let loader = PetLoader::new(store, TagResolution::BestEffort);

        let loaded = loader.load_with_report(pet_id).await.unwrap();
        assert!(loaded.is_partial());
        assert_eq!(loaded.skipped_tag_ids, vec![tag_ids[0]]);
        assert_eq!(loaded.pet.tags.len(), 1);
        assert_eq!(loaded.pet.tags[0].name, "large");
    }

    #[tokio::test]
    async fn strict_policy_fails_on_unresolvable_tag() {
        let (store, pet_id, tag_ids) = seeded().await;
        store.remove_tag(tag_ids[1]);
        let loader = PetLoader::new(store, TagResolution::Strict);

        assert_matches!(
            loader.load(pet_id).await,
            Err(CoreError::Store {
                context: "failed to resolve tag",
                ..
            })
        );
    }

    #[tokio::test]
    async fn photo_listing_failure_is_fatal() {
        let (store, pet_id, _) = seeded().await;
        store.inject_fault("list_photo_urls", Fault::Backend);
        let loader = PetLoader::new(store, TagResolution::BestEffort);

        assert_matches!(
            loader.load(pet_id).await,
            Err(CoreError::Store {
                context: "failed to load photo urls",
                ..
            })
        );
    }

    #[test]
    fn policy_parses_from_config_values() {
        assert_eq!(
            "best_effort".parse::<TagResolution>().unwrap(),
            TagResolution::BestEffort
        );
        assert_eq!(
            " STRICT ".parse::<TagResolution>().unwrap(),
            TagResolution::Strict
        );
        assert!("lenient".parse::<TagResolution>().is_err());
        assert_eq!(TagResolution::default().to_string(), "best_effort");
    }
}
