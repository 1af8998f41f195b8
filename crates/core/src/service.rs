//! The pet facade consumed by HTTP handlers.

use std::collections::BTreeMap;
use std::sync::Arc;

use futures::future::join_all;

use crate::error::CoreError;
use crate::loader::{LoadedPet, PetLoader, TagResolution};
use crate::pet::Pet;
use crate::resolver::ReferenceResolver;
use crate::store::PetStore;
use crate::types::DbId;
use crate::writer::PetWriter;

/// Wires the resolver, loader and writer over one shared store handle.
#[derive(Clone)]
pub struct PetService {
    store: Arc<dyn PetStore>,
    resolver: ReferenceResolver,
    loader: PetLoader,
    writer: PetWriter,
}

impl PetService {
    pub fn new(store: Arc<dyn PetStore>, tag_resolution: TagResolution) -> Self {
        let resolver = ReferenceResolver::new(store.clone());
        let loader = PetLoader::new(store.clone(), tag_resolution);
        let writer = PetWriter::new(store.clone(), resolver.clone(), loader.clone());
        Self {
            store,
            resolver,
            loader,
            writer,
        }
    }

    pub fn resolver(&self) -> &ReferenceResolver {
        &self.resolver
    }

    pub fn tag_resolution(&self) -> TagResolution {
        self.loader.tag_resolution()
    }

    pub async fn get_by_id(&self, id: DbId) -> Result<Pet, CoreError> {
        self.loader.load(id).await
    }

    pub async fn get_by_id_with_report(&self, id: DbId) -> Result<LoadedPet, CoreError> {
        self.loader.load_with_report(id).await
    }

    pub async fn create(&self, pet: &Pet) -> Result<DbId, CoreError> {
        self.writer.create(pet).await
    }

    pub async fn update(&self, pet: &Pet) -> Result<(), CoreError> {
        self.writer.update(pet).await
    }

    pub async fn update_with_form(
        &self,
        id: DbId,
        name: &str,
        status: &str,
    ) -> Result<(), CoreError> {
        self.writer.update_with_form(id, name, status).await
    }

    pub async fn delete(&self, id: DbId) -> Result<(), CoreError> {
        self.writer.delete(id).await
    }

    /// Live pets whose status equals `status`, ordered by id.
    ///
    /// Pets deleted between the id listing and their load are left out.
    pub async fn get_by_status(&self, status: &str) -> Result<Vec<Pet>, CoreError> {
        let ids = self
            .store
            .list_pet_ids_by_status(status)
            .await
            .map_err(CoreError::store("failed to list pets by status"))?;

        let loaded = join_all(ids.into_iter().map(|id| self.loader.load(id))).await;

        let mut pets = Vec::with_capacity(loaded.len());
        for result in loaded {
            match result {
                Ok(pet) => pets.push(pet),
                Err(CoreError::NotFound { id, .. }) => {
                    tracing::debug!(pet_id = id, "Pet vanished while listing by status");
                }
                Err(err) => return Err(err),
            }
        }
        Ok(pets)
    }

    /// Count of live pets per status value.
    pub async fn inventory(&self) -> Result<BTreeMap<String, i64>, CoreError> {
        let counts = self
            .store
            .count_pets_by_status()
            .await
            .map_err(CoreError::store("failed to count pets by status"))?;
        Ok(counts.into_iter().map(|c| (c.status, c.count)).collect())
    }
}
