//! Create, update and soft-delete of the pet aggregate.
//!
//! Every operation is a sequence of independent store calls with no
//! transaction around it. When a step fails the error names that step and
//! rows written by earlier steps stay in place:
//!
//! | Operation  | Steps                                                                 |
//! |------------|-----------------------------------------------------------------------|
//! | create     | category, base row, photo urls (one per url), tags + junction rows    |
//! | update     | load, category, base row, replace photo urls, replace junction rows   |
//! | form       | load, base row                                                        |
//! | delete     | load, soft-delete flag                                                |
//!
//! Collections use replace-all semantics and are only touched when the
//! incoming collection is non-empty.
//!
//! Create and update log a warning naming the step they were on when their
//! future is dropped before the sequence completes.

use std::sync::Arc;

use crate::error::CoreError;
use crate::loader::PetLoader;
use crate::pet::{Pet, Tag};
use crate::resolver::ReferenceResolver;
use crate::store::PetStore;
use crate::types::DbId;

#[derive(Clone)]
pub struct PetWriter {
    store: Arc<dyn PetStore>,
    resolver: ReferenceResolver,
    loader: PetLoader,
}

impl PetWriter {
    pub fn new(store: Arc<dyn PetStore>, resolver: ReferenceResolver, loader: PetLoader) -> Self {
        Self {
            store,
            resolver,
            loader,
        }
    }

    /// Persist a new pet and return its id.
    ///
    /// `name`, `status` and `category.name` must be non-empty. Ids carried by
    /// the input category and tags are ignored.
    #[tracing::instrument(skip(self, pet), fields(pet_name = %pet.name, pet_id = tracing::field::Empty))]
    pub async fn create(&self, pet: &Pet) -> Result<DbId, CoreError> {
        validate_new_pet(pet)?;
        validate_tag_names(&pet.tags)?;

        let mut progress = WriteProgress::start("create", None);
        let result = self.create_steps(pet, &mut progress).await;
        progress.finish();
        result
    }

    async fn create_steps(
        &self,
        pet: &Pet,
        progress: &mut WriteProgress,
    ) -> Result<DbId, CoreError> {
        progress.step("category");
        let category = self
            .resolver
            .resolve_or_create_category(&pet.category.name)
            .await?;

        progress.step("base row");
        let pet_id = self
            .store
            .insert_pet(category.id, &pet.name, &pet.status)
            .await
            .map_err(CoreError::store("failed to create pet"))?;
        progress.pet_id = Some(pet_id);
        tracing::Span::current().record("pet_id", pet_id);

        progress.step("photo urls");
        self.insert_photo_urls(pet_id, &pet.photo_urls).await?;
        progress.step("tags");
        self.link_tags(pet_id, &pet.tags).await?;

        tracing::info!(pet_id, category_id = category.id, "Pet created");
        Ok(pet_id)
    }

    /// Overwrite `name` and/or `status` of a live pet. Empty values leave the
    /// field unchanged; when both are empty nothing is written.
    #[tracing::instrument(skip(self))]
    pub async fn update_with_form(
        &self,
        id: DbId,
        name: &str,
        status: &str,
    ) -> Result<(), CoreError> {
        let current = self.loader.load(id).await?;
        if name.is_empty() && status.is_empty() {
            return Ok(());
        }

        let mut record = current.to_record();
        if !name.is_empty() {
            record.name = name.to_string();
        }
        if !status.is_empty() {
            record.status = status.to_string();
        }

        self.store
            .update_pet(&record)
            .await
            .map_err(CoreError::store("failed to update pet"))
    }

    /// Merge `update` into the live pet `update.id`.
    ///
    /// Non-empty scalars overwrite, a non-empty category name re-points the
    /// pet at that category, and non-empty collections replace the stored
    /// ones. An empty collection means "no change".
    #[tracing::instrument(skip(self, update), fields(pet_id = update.id))]
    pub async fn update(&self, update: &Pet) -> Result<(), CoreError> {
        validate_tag_names(&update.tags)?;

        let mut progress = WriteProgress::start("update", Some(update.id));
        let result = self.update_steps(update, &mut progress).await;
        progress.finish();
        result
    }

    async fn update_steps(
        &self,
        update: &Pet,
        progress: &mut WriteProgress,
    ) -> Result<(), CoreError> {
        progress.step("load");
        let current = self.loader.load(update.id).await?;
        let mut record = current.to_record();

        if !update.name.is_empty() {
            record.name = update.name.clone();
        }
        if !update.status.is_empty() {
            record.status = update.status.clone();
        }
        if !update.category.name.is_empty() {
            progress.step("category");
            let category = self
                .resolver
                .resolve_or_create_category(&update.category.name)
                .await?;
            record.category_id = category.id;
        }

        progress.step("base row");
        self.store
            .update_pet(&record)
            .await
            .map_err(CoreError::store("failed to update pet"))?;

        if !update.photo_urls.is_empty() {
            progress.step("photo urls");
            let removed = self
                .store
                .delete_photo_urls(record.id)
                .await
                .map_err(CoreError::store("failed to delete photo urls"))?;
            tracing::debug!(pet_id = record.id, removed, "Replacing photo urls");
            self.insert_photo_urls(record.id, &update.photo_urls).await?;
        }

        if !update.tags.is_empty() {
            progress.step("tags");
            let removed = self
                .store
                .delete_pet_tag_pairs(record.id)
                .await
                .map_err(CoreError::store("failed to delete pet tags"))?;
            tracing::debug!(pet_id = record.id, removed, "Replacing tags");
            self.link_tags(record.id, &update.tags).await?;
        }

        Ok(())
    }

    /// Soft-delete a live pet. Photo and junction rows are left in place.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: DbId) -> Result<(), CoreError> {
        self.loader.load(id).await?;
        self.store
            .soft_delete_pet(id)
            .await
            .map_err(CoreError::store("failed to delete pet"))?;
        tracing::info!(pet_id = id, "Pet soft-deleted");
        Ok(())
    }

    async fn insert_photo_urls(&self, pet_id: DbId, urls: &[String]) -> Result<(), CoreError> {
        for url in urls {
            self.store
                .insert_photo_url(pet_id, url)
                .await
                .map_err(CoreError::store("failed to create pet photo url"))?;
        }
        Ok(())
    }

    async fn link_tags(&self, pet_id: DbId, tags: &[Tag]) -> Result<(), CoreError> {
        for tag in tags {
            let resolved = self.resolver.resolve_or_create_tag(&tag.name).await?;
            self.store
                .insert_pet_tag_pair(pet_id, resolved.id)
                .await
                .map_err(CoreError::store("failed to create pet tag pair"))?;
        }
        Ok(())
    }
}

/// Last step a multi-step write reached.
///
/// A sequence that returns, with or without an error, calls [`finish`].
/// Dropping the guard unfinished means the future was cancelled between two
/// store calls and earlier steps stay applied, so it is logged.
///
/// [`finish`]: WriteProgress::finish
struct WriteProgress {
    operation: &'static str,
    pet_id: Option<DbId>,
    step: &'static str,
    finished: bool,
}

impl WriteProgress {
    fn start(operation: &'static str, pet_id: Option<DbId>) -> Self {
        Self {
            operation,
            pet_id,
            step: "start",
            finished: false,
        }
    }

    fn step(&mut self, step: &'static str) {
        self.step = step;
    }

    fn finish(mut self) {
        self.finished = true;
    }
}

impl Drop for WriteProgress {
    fn drop(&mut self) {
        if !self.finished {
            tracing::warn!(
                operation = self.operation,
                pet_id = self.pet_id,
                step = self.step,
                "Pet write cancelled mid-sequence"
            );
        }
    }
}

fn validate_new_pet(pet: &Pet) -> Result<(), CoreError> {
    if pet.name.is_empty() {
        return Err(CoreError::Validation("pet name must not be empty".into()));
    }
    if pet.status.is_empty() {
        return Err(CoreError::Validation("pet status must not be empty".into()));
    }
    if pet.category.name.is_empty() {
        return Err(CoreError::Validation(
            "pet category name must not be empty".into(),
        ));
    }
    Ok(())
}

fn validate_tag_names(tags: &[Tag]) -> Result<(), CoreError> {
    if tags.iter().any(|t| t.name.is_empty()) {
        return Err(CoreError::Validation("tag name must not be empty".into()));
    }
    Ok(())
}
