//! Handlers for the `/user` resource: accounts, login and logout.

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::Json;
use petstore_core::error::CoreError;
use petstore_core::user::{merge_user_update, validate_new_user, UserPayload, UserProfile};
use petstore_db::models::user::{CreateUser, User, UserResponse};
use petstore_db::repositories::UserRepo;
use serde::Deserialize;

use crate::auth::cookie::{auth_cookie, expired_cookie};
use crate::auth::jwt::generate_token;
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::response::{CreatedResponse, MessageResponse, TokenResponse};
use crate::state::AppState;

/// Query string for `GET /user/login`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginParams {
    pub username: String,
    pub password: String,
}

/// POST /user
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<UserPayload>,
) -> AppResult<(StatusCode, Json<CreatedResponse>)> {
    let user = create_one(&state, &payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            id: user.id,
            message: Some("user created"),
        }),
    ))
}

/// POST /user/createWithArray
///
/// Users are created in order; the first failure aborts the rest; earlier
/// users stay created.
pub async fn create_with_array(
    State(state): State<AppState>,
    Json(payloads): Json<Vec<UserPayload>>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    for payload in &payloads {
        create_one(&state, payload).await?;
    }
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new(format!(
            "{} users created",
            payloads.len()
        ))),
    ))
}

/// GET /user/{username}
pub async fn get(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> AppResult<Json<UserResponse>> {
    let user = find_user(&state, &username).await?;
    Ok(Json(user.into()))
}

/// PUT /user/{username}
///
/// Partial update: empty strings keep the stored value, a non-empty password
/// is re-hashed. The username itself cannot change.
pub async fn update(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Json(patch): Json<UserPayload>,
) -> AppResult<Json<UserResponse>> {
    if !patch.username.is_empty() && patch.username != username {
        return Err(AppError::BadRequest("username does not match".into()));
    }

    let existing: UserProfile = find_user(&state, &username).await?.into();

    let new_hash = if patch.password.is_empty() {
        None
    } else {
        Some(hash_password(&patch.password).map_err(|e| {
            AppError::InternalError(format!("Failed to hash password: {e}"))
        })?)
    };

    let merged = merge_user_update(existing, &patch, new_hash);
    let updated = UserRepo::update(&state.pool, &merged)
        .await?
        .ok_or_else(|| user_not_found(&username))?;

    tracing::info!(username = %updated.username, "User updated");
    Ok(Json(updated.into()))
}

/// DELETE /user/{username}
pub async fn delete(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    if !UserRepo::soft_delete(&state.pool, &username).await? {
        return Err(user_not_found(&username));
    }
    tracing::info!(username = %username, "User deleted");
    Ok(Json(MessageResponse::new("user deleted")))
}

/// GET /user/login?username=&password=
///
/// Returns the token in the body and sets it as the auth cookie.
pub async fn login(
    State(state): State<AppState>,
    Query(params): Query<LoginParams>,
) -> AppResult<([(header::HeaderName, header::HeaderValue); 1], Json<TokenResponse>)> {
    let invalid = || AppError::Core(CoreError::Unauthorized("invalid credentials".into()));

    let user = UserRepo::find_by_username(&state.pool, &params.username)
        .await?
        .ok_or_else(invalid)?;

    let valid = verify_password(&params.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Stored password hash is invalid: {e}")))?;
    if !valid {
        tracing::warn!(username = %params.username, "Login rejected");
        return Err(invalid());
    }

    let jwt = &state.config.jwt;
    let token = generate_token(&user.username, jwt)
        .map_err(|e| AppError::InternalError(format!("Failed to sign token: {e}")))?;
    let cookie = auth_cookie(&token, jwt.expiry_secs(), state.config.cookie_domain.as_deref())
        .map_err(|e| AppError::InternalError(format!("Invalid cookie value: {e}")))?;

    tracing::info!(username = %user.username, "User logged in");
    Ok(([(header::SET_COOKIE, cookie)], Json(TokenResponse { token })))
}

/// GET /user/logout
pub async fn logout(
    State(state): State<AppState>,
) -> AppResult<([(header::HeaderName, header::HeaderValue); 1], Json<MessageResponse>)> {
    let cookie = expired_cookie(state.config.cookie_domain.as_deref())
        .map_err(|e| AppError::InternalError(format!("Invalid cookie value: {e}")))?;
    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(MessageResponse::new("logged out")),
    ))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn create_one(state: &AppState, payload: &UserPayload) -> AppResult<User> {
    validate_new_user(payload)?;

    if UserRepo::find_by_username(&state.pool, &payload.username)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "user '{}' already exists",
            payload.username
        ))));
    }

    let password_hash = hash_password(&payload.password)
        .map_err(|e| AppError::InternalError(format!("Failed to hash password: {e}")))?;

    let input = CreateUser {
        username: payload.username.clone(),
        first_name: payload.first_name.clone(),
        last_name: payload.last_name.clone(),
        email: payload.email.clone(),
        password_hash,
        phone: payload.phone.clone(),
        user_status: payload.user_status.unwrap_or_default(),
    };

    // A concurrent insert of the same name still surfaces as 409 via the
    // partial unique index.
    let user = UserRepo::create(&state.pool, &input).await?;
    tracing::info!(user_id = user.id, username = %user.username, "User created");
    Ok(user)
}

async fn find_user(state: &AppState, username: &str) -> AppResult<User> {
    UserRepo::find_by_username(&state.pool, username)
        .await?
        .ok_or_else(|| user_not_found(username))
}

fn user_not_found(username: &str) -> AppError {
    AppError::Core(CoreError::NotFoundByName {
        entity: "User",
        name: username.to_string(),
    })
}
