use std::sync::Arc;

use petstore_core::service::PetService;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool, used directly by the order and user handlers.
    pub pool: petstore_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Pet aggregate service over the injected store.
    pub pets: Arc<PetService>,
}
