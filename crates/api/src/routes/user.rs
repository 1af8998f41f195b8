use axum::routing::{get, post};
use axum::Router;

use crate::handlers::user;
use crate::state::AppState;

/// User routes mounted at `/user`.
///
/// ```text
/// POST   /                        -> create
/// POST   /createWithArray         -> create_with_array
/// GET    /login                   -> login
/// GET    /logout                  -> logout
/// GET    /{username}              -> get
/// PUT    /{username}              -> update
/// DELETE /{username}              -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(user::create))
        .route("/createWithArray", post(user::create_with_array))
        .route("/login", get(user::login))
        .route("/logout", get(user::logout))
        .route(
            "/{username}",
            get(user::get).put(user::update).delete(user::delete),
        )
}
