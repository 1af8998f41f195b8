//! `GET /health`: reachability of the user/order database and the pet store.

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    /// `"ok"` when every backend answered, `"degraded"` otherwise.
    pub status: &'static str,
    pub version: &'static str,
    /// The pool used by the `/store/order` and `/user` handlers.
    pub db_healthy: bool,
    /// The store behind the pet aggregate, checked with an inventory count.
    pub pet_store_healthy: bool,
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let (db, pets) = tokio::join!(
        petstore_db::health_check(&state.pool),
        state.pets.inventory()
    );
    let db_healthy = db.is_ok();
    let pet_store_healthy = match pets {
        Ok(_) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Pet store health check failed");
            false
        }
    };

    let status = if db_healthy && pet_store_healthy {
        "ok"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        pet_store_healthy,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
