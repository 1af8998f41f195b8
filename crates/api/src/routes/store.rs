//! Route definitions for the store: inventory and orders.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::store;
use crate::state::AppState;

/// Store routes mounted at `/store`.
///
/// ```text
/// GET    /inventory               -> inventory (auth)
/// POST   /order                   -> create_order
/// GET    /order/{orderId}         -> get_order
/// DELETE /order/{orderId}         -> delete_order
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/inventory", get(store::inventory))
        .route("/order", post(store::create_order))
        .route(
            "/order/{orderId}",
            get(store::get_order).delete(store::delete_order),
        )
}
