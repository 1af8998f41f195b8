//! Repository for the `users` table.

use petstore_core::user::UserProfile;
use sqlx::PgPool;

use crate::models::user::{CreateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, first_name, last_name, email, password_hash, phone, user_status";

/// Provides CRUD operations for users. Every lookup is by username.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    ///
    /// A live user with the same username violates `uq_users_username`.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users
                (username, first_name, last_name, email, password_hash, phone, user_status, is_deleted)
             VALUES ($1, $2, $3, $4, $5, $6, $7, FALSE)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.phone)
            .bind(input.user_status)
            .fetch_one(pool)
            .await
    }

    /// Find a live user by username (case-sensitive).
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM users WHERE username = $1 AND is_deleted = FALSE");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// Write every mutable column of `profile` back to its live row.
    ///
    /// Returns `None` if no live row with the given username exists.
    pub async fn update(pool: &PgPool, profile: &UserProfile) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                first_name = $2,
                last_name = $3,
                email = $4,
                password_hash = $5,
                phone = $6,
                user_status = $7
             WHERE username = $1 AND is_deleted = FALSE
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&profile.username)
            .bind(&profile.first_name)
            .bind(&profile.last_name)
            .bind(&profile.email)
            .bind(&profile.password_hash)
            .bind(&profile.phone)
            .bind(profile.user_status)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a user. Returns `true` if a live row was flagged.
    pub async fn soft_delete(pool: &PgPool, username: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE users SET is_deleted = TRUE WHERE username = $1 AND is_deleted = FALSE",
        )
        .bind(username)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
