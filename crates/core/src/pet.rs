//! Pet aggregate entities and the rows it is assembled from.
//!
//! A [`Pet`] is never stored as one row: its base record lives in `pets`,
//! its category in `categories`, its photos in `photo_urls` and its tags in
//! `tags` linked through the `pet_tags` junction.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Pet is available for sale.
pub const STATUS_AVAILABLE: &str = "available";

/// Pet has an order in progress.
pub const STATUS_PENDING: &str = "pending";

/// Pet has been sold.
pub const STATUS_SOLD: &str = "sold";

/// The documented status values.
///
/// The aggregate engine stores `status` as free text and never checks it
/// against this enum; only the HTTP boundary uses it to validate filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PetStatus {
    Available,
    Pending,
    Sold,
}

impl PetStatus {
    pub const ALL: [PetStatus; 3] = [PetStatus::Available, PetStatus::Pending, PetStatus::Sold];

    pub fn as_str(self) -> &'static str {
        match self {
            PetStatus::Available => STATUS_AVAILABLE,
            PetStatus::Pending => STATUS_PENDING,
            PetStatus::Sold => STATUS_SOLD,
        }
    }
}

impl fmt::Display for PetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PetStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            STATUS_AVAILABLE => Ok(PetStatus::Available),
            STATUS_PENDING => Ok(PetStatus::Pending),
            STATUS_SOLD => Ok(PetStatus::Sold),
            other => Err(CoreError::Validation(format!(
                "Invalid pet status '{other}'. Must be one of: available, pending, sold"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Reference data
// ---------------------------------------------------------------------------

/// A row from `categories`. `name` is the unique natural key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Category {
    pub id: DbId,
    pub name: String,
}

/// A row from `tags`. `name` is the unique natural key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tag {
    pub id: DbId,
    pub name: String,
}

// ---------------------------------------------------------------------------
// Owned rows
// ---------------------------------------------------------------------------

/// A row from `photo_urls`, owned by exactly one pet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoUrl {
    pub id: DbId,
    pub pet_id: DbId,
    pub url: String,
}

/// A row from the `pet_tags` junction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PetTagPair {
    pub id: DbId,
    pub pet_id: DbId,
    pub tag_id: DbId,
}

/// The base row of a pet from `pets`, already filtered to `is_deleted = FALSE`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PetRecord {
    pub id: DbId,
    pub category_id: DbId,
    pub name: String,
    pub status: String,
}

// ---------------------------------------------------------------------------
// Aggregate
// ---------------------------------------------------------------------------

/// The composite pet as exposed to callers.
///
/// The same shape is accepted as input for create and update: on input the
/// ids of `category` and `tags` are ignored and only names are used.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Pet {
    pub id: DbId,
    pub category: Category,
    pub name: String,
    pub photo_urls: Vec<String>,
    pub tags: Vec<Tag>,
    pub status: String,
}

impl Pet {
    /// The base row this pet would persist as, carrying the resolved category id.
    pub fn to_record(&self) -> PetRecord {
        PetRecord {
            id: self.id,
            category_id: self.category.id,
            name: self.name.clone(),
            status: self.status.clone(),
        }
    }

    pub fn tag_names(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(|t| t.name.as_str())
    }
}
