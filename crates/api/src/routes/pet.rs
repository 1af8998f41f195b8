//! Route definitions for the pet aggregate.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::pet;
use crate::state::AppState;

/// Pet routes mounted at `/pet`. Every handler requires authentication.
///
/// ```text
/// POST   /                        -> create
/// PUT    /                        -> update
/// GET    /findByStatus            -> find_by_status
/// GET    /{petId}                 -> get_by_id
/// POST   /{petId}                 -> update_with_form
/// DELETE /{petId}                 -> delete
/// POST   /{petId}/uploadImage     -> upload_image
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(pet::create).put(pet::update))
        .route("/findByStatus", get(pet::find_by_status))
        .route(
            "/{petId}",
            get(pet::get_by_id)
                .post(pet::update_with_form)
                .delete(pet::delete),
        )
        .route("/{petId}/uploadImage", post(pet::upload_image))
}
