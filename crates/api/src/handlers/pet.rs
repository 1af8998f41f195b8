//! Handlers for the `/pet` resource.
//!
//! All handlers require an authenticated caller and delegate to
//! [`PetService`](petstore_core::service::PetService).
//!
//! Writes run on their own task: a request dropped by the timeout layer or a
//! disconnecting client does not stop a write sequence halfway.

use std::future::Future;

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::{Form, Json};
use petstore_core::error::CoreError;
use petstore_core::pet::{Pet, PetStatus};
use petstore_core::types::DbId;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::{CreatedResponse, MessageResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Form body for `POST /pet/{petId}`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PetForm {
    pub name: String,
    pub status: String,
}

/// Query string for `GET /pet/findByStatus`.
#[derive(Debug, Deserialize)]
pub struct FindByStatusParams {
    /// Comma-separated status values.
    pub status: Option<String>,
}

/// Drive `write` to completion on a separate task and hand back its result.
async fn run_detached<T, F>(write: F) -> AppResult<T>
where
    T: Send + 'static,
    F: Future<Output = Result<T, CoreError>> + Send + 'static,
{
    let outcome = tokio::spawn(write)
        .await
        .map_err(|e| AppError::InternalError(format!("Pet write task failed: {e}")))?;
    Ok(outcome?)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /pet/{petId}
pub async fn get_by_id(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(pet_id): Path<DbId>,
) -> AppResult<Json<Pet>> {
    let pet = state.pets.get_by_id(pet_id).await?;
    Ok(Json(pet))
}

/// POST /pet/{petId}
///
/// Form update of `name` and/or `status`; empty fields are left unchanged.
pub async fn update_with_form(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(pet_id): Path<DbId>,
    Form(form): Form<PetForm>,
) -> AppResult<Json<MessageResponse>> {
    if form.name.is_empty() && form.status.is_empty() {
        return Err(AppError::BadRequest(
            "at least one field must be not empty".into(),
        ));
    }
    let pets = state.pets.clone();
    run_detached(async move {
        pets.update_with_form(pet_id, &form.name, &form.status).await
    })
    .await?;
    Ok(Json(MessageResponse::new("pet updated")))
}

/// DELETE /pet/{petId}
pub async fn delete(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(pet_id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    let pets = state.pets.clone();
    run_detached(async move { pets.delete(pet_id).await }).await?;
    Ok(Json(MessageResponse::new("pet deleted")))
}

/// POST /pet/{petId}/uploadImage
///
/// Requires a multipart `file` part. The upload is acknowledged but not stored.
pub async fn upload_image(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(pet_id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<Json<MessageResponse>> {
    state.pets.get_by_id(pet_id).await?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("invalid file supplied: {e}")))?;
        tracing::info!(pet_id, size = bytes.len(), "Pet image received");
        return Ok(Json(MessageResponse::new("pet image uploaded")));
    }

    Err(AppError::BadRequest("invalid file supplied".into()))
}

/// POST /pet
pub async fn create(
    _user: AuthUser,
    State(state): State<AppState>,
    Json(pet): Json<Pet>,
) -> AppResult<(StatusCode, Json<CreatedResponse>)> {
    let pets = state.pets.clone();
    let id = run_detached(async move { pets.create(&pet).await }).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            id,
            message: Some("pet created"),
        }),
    ))
}

/// PUT /pet
pub async fn update(
    _user: AuthUser,
    State(state): State<AppState>,
    Json(pet): Json<Pet>,
) -> AppResult<Json<MessageResponse>> {
    let pets = state.pets.clone();
    run_detached(async move { pets.update(&pet).await }).await?;
    Ok(Json(MessageResponse::new("pet updated")))
}

/// GET /pet/findByStatus?status=available,sold
///
/// Each listed status is validated, then the matching pets are concatenated
/// in the order the statuses were given. Repeated statuses are listed once.
pub async fn find_by_status(
    _user: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<FindByStatusParams>,
) -> AppResult<Json<Vec<Pet>>> {
    let raw = params.status.unwrap_or_default();
    let mut statuses: Vec<PetStatus> = Vec::new();
    for part in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let status: PetStatus = part.parse()?;
        if !statuses.contains(&status) {
            statuses.push(status);
        }
    }
    if statuses.is_empty() {
        return Err(AppError::BadRequest(
            "at least one status must be supplied".into(),
        ));
    }

    let mut result = Vec::new();
    for status in statuses {
        result.extend(state.pets.get_by_status(status.as_str()).await?);
    }
    Ok(Json(result))
}
