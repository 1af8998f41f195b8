//! Store orders: input shape, defaults and validation.

use serde::Deserialize;

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

pub const ORDER_STATUS_PLACED: &str = "placed";
pub const ORDER_STATUS_APPROVED: &str = "approved";
pub const ORDER_STATUS_DELIVERED: &str = "delivered";

/// Accepted order status values.
pub const VALID_ORDER_STATUSES: &[&str] = &[
    ORDER_STATUS_PLACED,
    ORDER_STATUS_APPROVED,
    ORDER_STATUS_DELIVERED,
];

/// Order as submitted by a client. Missing fields take their defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NewOrder {
    pub pet_id: DbId,
    pub quantity: i32,
    pub ship_date: Option<Timestamp>,
    pub status: Option<String>,
    pub complete: bool,
}

/// An order that passed [`prepare_new_order`] and is ready to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedOrder {
    pub pet_id: DbId,
    pub quantity: i32,
    pub ship_date: Timestamp,
    pub status: String,
    pub complete: bool,
}

/// Apply defaults (`status = placed`, `ship_date = now`) and validate.
pub fn prepare_new_order(order: NewOrder, now: Timestamp) -> Result<ValidatedOrder, CoreError> {
    if order.pet_id <= 0 || order.quantity <= 0 {
        return Err(CoreError::Validation(
            "pet id and quantity must be greater than zero".into(),
        ));
    }

    let status = match order.status {
        Some(s) if !s.is_empty() => s,
        _ => ORDER_STATUS_PLACED.to_string(),
    };
    if !VALID_ORDER_STATUSES.contains(&status.as_str()) {
        return Err(CoreError::Validation(format!(
            "Invalid order status '{status}'. Must be one of: {}",
            VALID_ORDER_STATUSES.join(", ")
        )));
    }

    Ok(ValidatedOrder {
        pet_id: order.pet_id,
        quantity: order.quantity,
        ship_date: order.ship_date.unwrap_or(now),
        status,
        complete: order.complete,
    })
}
