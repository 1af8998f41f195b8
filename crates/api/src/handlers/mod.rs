//! Request handlers, one module per top-level resource.
//!
//! Pet handlers delegate to the aggregate service in `AppState::pets`; order
//! and user handlers call the repositories in `petstore_db` directly. Errors
//! are mapped via [`AppError`](crate::error::AppError).

pub mod pet;
pub mod store;
pub mod user;
