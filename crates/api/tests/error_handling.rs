//! Tests for `AppError` → HTTP response mapping.
//!
//! These tests verify that each `AppError` variant produces the correct HTTP
//! status code, error code, and message. They do NOT need an HTTP server --
//! they call `IntoResponse` directly on `AppError` values.

use std::time::Duration;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use petstore_api::error::AppError;
use petstore_core::error::CoreError;
use petstore_core::store::StoreError;
use petstore_db::models::user::CreateUser;
use petstore_db::repositories::UserRepo;
use sqlx::PgPool;

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

// ---------------------------------------------------------------------------
// Test: CoreError::NotFound maps to 404 with NOT_FOUND code
// ---------------------------------------------------------------------------

#[tokio::test]
async fn not_found_error_returns_404() {
    let err = AppError::Core(CoreError::NotFound {
        entity: "Pet",
        id: 42,
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Pet with id 42 not found");
}

#[tokio::test]
async fn not_found_by_name_returns_404() {
    let err = AppError::Core(CoreError::NotFoundByName {
        entity: "User",
        name: "johndoe".into(),
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "User 'johndoe' not found");
}

// ---------------------------------------------------------------------------
// Test: AppError::BadRequest maps to 400 with BAD_REQUEST code
// ---------------------------------------------------------------------------

#[tokio::test]
async fn bad_request_error_returns_400() {
    let err = AppError::BadRequest("invalid file supplied".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
    assert_eq!(json["error"], "invalid file supplied");
}

// ---------------------------------------------------------------------------
// Test: CoreError::Validation maps to 400 with VALIDATION_ERROR code
// ---------------------------------------------------------------------------

#[tokio::test]
async fn validation_error_returns_400() {
    let err = AppError::Core(CoreError::Validation("name is required".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "name is required");
}

// ---------------------------------------------------------------------------
// Test: CoreError::Conflict maps to 409 with CONFLICT code
// ---------------------------------------------------------------------------

#[tokio::test]
async fn conflict_error_returns_409() {
    let err = AppError::Core(CoreError::Conflict("user 'john' already exists".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "CONFLICT");
    assert_eq!(json["error"], "user 'john' already exists");
}

// ---------------------------------------------------------------------------
// Test: CoreError::Unauthorized
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unauthorized_error_returns_401() {
    let err = AppError::Core(CoreError::Unauthorized("invalid credentials".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["code"], "UNAUTHORIZED");
    assert_eq!(json["error"], "invalid credentials");
}

// ---------------------------------------------------------------------------
// Test: store failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn store_timeout_returns_504_naming_the_step() {
    let err = AppError::Core(CoreError::Store {
        context: "failed to update pet",
        source: StoreError::Timeout {
            operation: "update_pet",
            after: Duration::from_secs(3),
        },
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(json["code"], "STORE_TIMEOUT");
    assert_eq!(json["error"], "failed to update pet: store did not respond in time");
}

#[tokio::test]
async fn store_backend_error_returns_500_and_sanitizes() {
    let err = AppError::Core(CoreError::Store {
        context: "failed to resolve category",
        source: StoreError::Backend("connection reset by 10.0.0.7".into()),
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert!(!json.to_string().contains("10.0.0.7"));
    assert_eq!(json["error"], "An internal error occurred");
}

#[tokio::test]
async fn missing_reference_row_is_a_server_error() {
    let err = AppError::Core(CoreError::Store {
        context: "failed to resolve category",
        source: StoreError::NotFound {
            entity: "Category",
            key: "7".into(),
        },
    });

    let (status, _json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

// ---------------------------------------------------------------------------
// Test: internal errors are sanitized
// ---------------------------------------------------------------------------

#[tokio::test]
async fn internal_error_returns_500_and_sanitizes_message() {
    let err = AppError::InternalError("secret database credentials leaked".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");

    let body_text = json.to_string();
    assert!(
        !body_text.contains("secret"),
        "Internal error response must not leak sensitive details"
    );
    assert_eq!(json["error"], "An internal error occurred");
}

// ---------------------------------------------------------------------------
// Test: sqlx errors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn sqlx_row_not_found_returns_404() {
    let (status, json) = error_to_response(AppError::Database(sqlx::Error::RowNotFound)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
}

#[tokio::test]
async fn other_sqlx_error_returns_500() {
    let err = AppError::Database(sqlx::Error::PoolTimedOut);

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "An internal error occurred");
}

// ---------------------------------------------------------------------------
// Test: unique violations from the schema map to 409 naming the field
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_live_username_returns_409(pool: PgPool) {
    let user = CreateUser {
        username: "johndoe".to_string(),
        first_name: String::new(),
        last_name: String::new(),
        email: String::new(),
        password_hash: "$argon2id$placeholder".to_string(),
        phone: String::new(),
        user_status: 0,
    };
    UserRepo::create(&pool, &user).await.unwrap();
    let err = UserRepo::create(&pool, &user).await.unwrap_err();

    let (status, json) = error_to_response(AppError::Database(err)).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "CONFLICT");
    assert_eq!(json["error"], "username already exists");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_category_and_tag_names_return_409(pool: PgPool) {
    for (table, message) in [
        ("categories", "category name already exists"),
        ("tags", "tag name already exists"),
    ] {
        let insert = format!("INSERT INTO {table} (name) VALUES ('dog')");
        sqlx::query(&insert).execute(&pool).await.unwrap();
        let err = sqlx::query(&insert).execute(&pool).await.unwrap_err();

        let (status, json) = error_to_response(AppError::Database(err)).await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json["error"], message);
    }
}
