//! Find-or-create for shared reference data.
//!
//! Categories and tags are looked up by their natural key (`name`). A hit
//! reuses the existing row so every pet naming the same category ends up
//! pointing at one row; a miss inserts a new row.
//!
//! The lookup and the insert are two separate store calls. Two callers racing
//! on the same new name can both miss; the PostgreSQL adapter then resolves
//! the second insert to the first row through the `UNIQUE (name)` constraint,
//! other stores may end up with duplicates.

use std::future::Future;
use std::sync::Arc;

use crate::error::CoreError;
use crate::pet::{Category, Tag};
use crate::store::{PetStore, StoreError};

/// Kinds of reference data handled by [`ReferenceResolver`].
#[derive(Debug, Clone, Copy)]
enum RefKind {
    Category,
    Tag,
}

impl RefKind {
    fn lookup_context(self) -> &'static str {
        match self {
            RefKind::Category => "failed to look up category",
            RefKind::Tag => "failed to look up tag",
        }
    }

    fn create_context(self) -> &'static str {
        match self {
            RefKind::Category => "failed to create category",
            RefKind::Tag => "failed to create tag",
        }
    }

    fn label(self) -> &'static str {
        match self {
            RefKind::Category => "category",
            RefKind::Tag => "tag",
        }
    }
}

/// Resolves reference data by name, creating it lazily on first use.
#[derive(Clone)]
pub struct ReferenceResolver {
    store: Arc<dyn PetStore>,
}

impl ReferenceResolver {
    pub fn new(store: Arc<dyn PetStore>) -> Self {
        Self { store }
    }

    /// Return the category named `name`, inserting it if it does not exist.
    pub async fn resolve_or_create_category(&self, name: &str) -> Result<Category, CoreError> {
        let found = self.store.get_category_by_name(name).await;
        find_or_create(RefKind::Category, name, found, || {
            self.store.insert_category(name)
        })
        .await
    }

    /// Return the tag named `name`, inserting it if it does not exist.
    pub async fn resolve_or_create_tag(&self, name: &str) -> Result<Tag, CoreError> {
        let found = self.store.get_tag_by_name(name).await;
        find_or_create(RefKind::Tag, name, found, || self.store.insert_tag(name)).await
    }
}

/// Shared find-or-create step: keep a hit, insert on `NotFound`, propagate
/// every other lookup failure.
async fn find_or_create<T, F, Fut>(
    kind: RefKind,
    name: &str,
    found: Result<T, StoreError>,
    create: F,
) -> Result<T, CoreError>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, StoreError>>,
{
    match found {
        Ok(existing) => Ok(existing),
        Err(StoreError::NotFound { .. }) => {
            tracing::debug!(kind = kind.label(), name, "Creating reference data on first use");
            create().await.map_err(CoreError::store(kind.create_context()))
        }
        Err(err) => Err(CoreError::store(kind.lookup_context())(err)),
    }
}
