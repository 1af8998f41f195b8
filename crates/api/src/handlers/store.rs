//! Handlers for the `/store` resource: inventory and orders.

use std::collections::BTreeMap;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use petstore_core::error::CoreError;
use petstore_core::order::{prepare_new_order, NewOrder};
use petstore_core::types::DbId;
use petstore_db::models::order::Order;
use petstore_db::repositories::OrderRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::{CreatedResponse, MessageResponse};
use crate::state::AppState;

/// GET /store/inventory
///
/// Number of live pets per status value.
pub async fn inventory(
    _user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<BTreeMap<String, i64>>> {
    let counts = state.pets.inventory().await?;
    Ok(Json(counts))
}

/// POST /store/order
pub async fn create_order(
    State(state): State<AppState>,
    Json(input): Json<NewOrder>,
) -> AppResult<(StatusCode, Json<CreatedResponse>)> {
    let order = prepare_new_order(input, chrono::Utc::now())?;
    let created = OrderRepo::create(&state.pool, &order).await?;
    tracing::info!(order_id = created.id, pet_id = created.pet_id, "Order placed");
    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            id: created.id,
            message: None,
        }),
    ))
}

/// GET /store/order/{orderId}
pub async fn get_order(
    State(state): State<AppState>,
    Path(order_id): Path<DbId>,
) -> AppResult<Json<Order>> {
    OrderRepo::find_by_id(&state.pool, order_id)
        .await?
        .map(Json)
        .ok_or_else(|| order_not_found(order_id))
}

/// DELETE /store/order/{orderId}
pub async fn delete_order(
    State(state): State<AppState>,
    Path(order_id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    if !OrderRepo::soft_delete(&state.pool, order_id).await? {
        return Err(order_not_found(order_id));
    }
    Ok(Json(MessageResponse::new("order deleted")))
}

fn order_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Order",
        id,
    })
}
