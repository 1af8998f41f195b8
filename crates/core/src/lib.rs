//! Domain core of the petstore backend.
//!
//! Holds the entity types, the relational store contract ([`store::PetStore`]),
//! and the aggregate engine that assembles and maintains pets across the
//! `pets`, `categories`, `tags`, `photo_urls` and `pet_tags` tables:
//!
//! - [`resolver`] -- find-or-create for shared reference data (categories, tags).
//! - [`loader`] -- assembles a composite [`pet::Pet`] from its normalized rows.
//! - [`writer`] -- create / update / soft-delete across the same rows.
//! - [`service`] -- the facade consumed by HTTP handlers.
//!
//! Nothing in this crate talks to a database directly; the PostgreSQL adapter
//! lives in `petstore-db` and [`memory::InMemoryPetStore`] backs the tests.

pub mod error;
pub mod loader;
pub mod memory;
pub mod order;
pub mod pet;
pub mod resolver;
pub mod service;
pub mod store;
pub mod types;
pub mod user;
pub mod writer;
