//! Rows of the pet tables.

use petstore_core::pet::{Category, PetRecord, PetTagPair, PhotoUrl, Tag};
use petstore_core::types::DbId;
use sqlx::FromRow;

/// A live row from `pets`. `is_deleted` is filtered in SQL and not selected.
#[derive(Debug, Clone, FromRow)]
pub struct PetRow {
    pub id: DbId,
    pub category_id: DbId,
    pub name: String,
    pub status: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct CategoryRow {
    pub id: DbId,
    pub name: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct TagRow {
    pub id: DbId,
    pub name: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct PhotoUrlRow {
    pub id: DbId,
    pub pet_id: DbId,
    pub url: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct PetTagRow {
    pub id: DbId,
    pub pet_id: DbId,
    pub tag_id: DbId,
}

/// Live pet count for one status value.
#[derive(Debug, Clone, FromRow)]
pub struct StatusCountRow {
    pub status: String,
    pub count: i64,
}

impl From<PetRow> for PetRecord {
    fn from(row: PetRow) -> Self {
        PetRecord {
            id: row.id,
            category_id: row.category_id,
            name: row.name,
            status: row.status,
        }
    }
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Category {
            id: row.id,
            name: row.name,
        }
    }
}

impl From<TagRow> for Tag {
    fn from(row: TagRow) -> Self {
        Tag {
            id: row.id,
            name: row.name,
        }
    }
}

impl From<PhotoUrlRow> for PhotoUrl {
    fn from(row: PhotoUrlRow) -> Self {
        PhotoUrl {
            id: row.id,
            pet_id: row.pet_id,
            url: row.url,
        }
    }
}

impl From<PetTagRow> for PetTagPair {
    fn from(row: PetTagRow) -> Self {
        PetTagPair {
            id: row.id,
            pet_id: row.pet_id,
            tag_id: row.tag_id,
        }
    }
}
