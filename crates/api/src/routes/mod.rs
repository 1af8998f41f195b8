pub mod health;
pub mod pet;
pub mod store;
pub mod user;

use axum::Router;

use crate::state::AppState;

/// Build the resource route tree.
///
/// Route hierarchy:
///
/// ```text
/// /pet                                   create, update (auth)
/// /pet/findByStatus                      list by status (auth)
/// /pet/{petId}                           get, form update, delete (auth)
/// /pet/{petId}/uploadImage               image upload (auth)
///
/// /store/inventory                       counts per status (auth)
/// /store/order                           place order
/// /store/order/{orderId}                 get, delete
///
/// /user                                  create
/// /user/createWithArray                  bulk create
/// /user/login                            login (sets auth cookie)
/// /user/logout                           logout (expires auth cookie)
/// /user/{username}                       get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/pet", pet::router())
        .nest("/store", store::router())
        .nest("/user", user::router())
}
