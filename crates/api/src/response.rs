//! Shared response bodies for API handlers.
//!
//! Entities are returned as bare JSON; these types cover the acknowledgement
//! shapes so handlers do not build ad-hoc `serde_json::json!` values.

use petstore_core::types::DbId;
use serde::Serialize;

/// `{ "message": "..." }` acknowledgement.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// `{ "id": N }` returned after an insert, with an optional message.
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: DbId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

/// `{ "token": "..." }` returned by login.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}
