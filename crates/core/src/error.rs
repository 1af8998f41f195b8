use crate::store::StoreError;
use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Entity not found: {entity} named '{name}'")]
    NotFoundByName { entity: &'static str, name: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// A store call failed; `context` names the step that was being attempted.
    #[error("{context}: {source}")]
    Store {
        context: &'static str,
        #[source]
        source: StoreError,
    },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}

impl CoreError {
    /// Build a `map_err` adapter that wraps a [`StoreError`] with `context`.
    ///
    /// ```ignore
    /// store.insert_pet(..).await.map_err(CoreError::store("failed to create pet"))?;
    /// ```
    pub fn store(context: &'static str) -> impl FnOnce(StoreError) -> CoreError {
        move |source| CoreError::Store { context, source }
    }

    /// True when the failure was a store deadline overrun.
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            CoreError::Store {
                source: StoreError::Timeout { .. },
                ..
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn store_error_display_includes_context_and_cause() {
        let err = CoreError::store("failed to resolve category")(StoreError::NotFound {
            entity: "Category",
            key: "7".into(),
        });
        assert_eq!(
            err.to_string(),
            "failed to resolve category: Category not found: 7"
        );
    }

    #[test]
    fn timeout_is_detected_through_wrapping() {
        let err = CoreError::store("failed to create pet")(StoreError::Timeout {
            operation: "insert_pet",
            after: Duration::from_millis(3000),
        });
        assert!(err.is_timeout());
        assert!(!CoreError::Validation("x".into()).is_timeout());
    }
}
