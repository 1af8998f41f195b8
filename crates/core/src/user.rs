//! User account rules. Password hashing is supplied by the caller.

use serde::Deserialize;

use crate::error::CoreError;
use crate::types::DbId;

/// User JSON accepted by create and update. Every field is optional on the wire.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserPayload {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub user_status: Option<i32>,
}

/// A stored user as the domain sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub id: DbId,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub user_status: i32,
    pub password_hash: String,
}

/// Username and password are mandatory for a new account.
pub fn validate_new_user(payload: &UserPayload) -> Result<(), CoreError> {
    if payload.username.trim().is_empty() || payload.password.is_empty() {
        return Err(CoreError::Validation(
            "username and password are mandatory".into(),
        ));
    }
    Ok(())
}

/// Merge a partial update into `existing`.
///
/// Non-empty strings overwrite, `user_status` overwrites when present, and
/// `new_hash` replaces the stored hash when the caller re-hashed a new
/// password. The username never changes.
pub fn merge_user_update(
    mut existing: UserProfile,
    patch: &UserPayload,
    new_hash: Option<String>,
) -> UserProfile {
    fn overwrite(field: &mut String, value: &str) {
        if !value.is_empty() {
            *field = value.to_string();
        }
    }

    overwrite(&mut existing.first_name, &patch.first_name);
    overwrite(&mut existing.last_name, &patch.last_name);
    overwrite(&mut existing.email, &patch.email);
    overwrite(&mut existing.phone, &patch.phone);

    if let Some(status) = patch.user_status {
        existing.user_status = status;
    }
    if let Some(hash) = new_hash {
        existing.password_hash = hash;
    }
    existing
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> UserProfile {
        UserProfile {
            id: 1,
            username: "johndoe001".into(),
            first_name: "John".into(),
            last_name: "Doe".into(),
            email: "john@example.com".into(),
            phone: "7-999".into(),
            user_status: 0,
            password_hash: "$argon2id$old".into(),
        }
    }

    #[test]
    fn username_and_password_are_required() {
        let mut payload = UserPayload {
            username: "john".into(),
            ..UserPayload::default()
        };
        assert!(validate_new_user(&payload).is_err());
        payload.password = "secret".into();
        assert!(validate_new_user(&payload).is_ok());
        payload.username = "  ".into();
        assert!(validate_new_user(&payload).is_err());
    }

    #[test]
    fn merge_overwrites_only_supplied_fields() {
        let patch: UserPayload =
            serde_json::from_str(r#"{"username":"ignored","lastName":"Smith","userStatus":2}"#)
                .unwrap();
        let merged = merge_user_update(profile(), &patch, None);

        assert_eq!(merged.username, "johndoe001");
        assert_eq!(merged.first_name, "John");
        assert_eq!(merged.last_name, "Smith");
        assert_eq!(merged.user_status, 2);
        assert_eq!(merged.password_hash, "$argon2id$old");
    }

    #[test]
    fn merge_keeps_status_when_absent_and_takes_new_hash() {
        let mut existing = profile();
        existing.user_status = 3;
        let merged = merge_user_update(
            existing,
            &UserPayload::default(),
            Some("$argon2id$new".into()),
        );
        assert_eq!(merged.user_status, 3);
        assert_eq!(merged.password_hash, "$argon2id$new");
    }
}
