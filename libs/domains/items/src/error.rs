use database::DatabaseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ItemError {
    #[error("Item not found: {0}")]
    NotFound(i32),

    #[error("Item with name '{0}' already exists")]
    DuplicateName(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Conflicting write: {0}")]
    Conflict(String),

    #[error("Blocked by dependent records: {0}")]
    Integrity(String),

    #[error("Database unavailable: {0}")]
    Unavailable(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type ItemResult<T> = Result<T, ItemError>;

impl ItemError {
    /// Whether retrying the same call unchanged can succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, ItemError::Unavailable(_))
    }
}

/// Carry the database taxonomy through unchanged; the `DuplicateName`
/// refinement happens in the repository where the item name is in scope.
impl From<DatabaseError> for ItemError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::Validation(msg) => ItemError::Validation(msg),
            DatabaseError::Conflict(constraint) => ItemError::Conflict(constraint),
            DatabaseError::Integrity(constraint) => ItemError::Integrity(constraint),
            DatabaseError::Unavailable(e) => ItemError::Unavailable(e.to_string()),
            other => ItemError::Database(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_through() {
        let err: ItemError =
            DatabaseError::Validation("unknown sort field 'nope'".to_string()).into();
        assert!(matches!(err, ItemError::Validation(_)));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_conflict_maps_through() {
        let err: ItemError = DatabaseError::Conflict("items_name_key".to_string()).into();
        assert!(matches!(err, ItemError::Conflict(_)));
    }

    #[test]
    fn test_unavailable_is_retryable() {
        let db_err: DatabaseError =
            sea_orm::DbErr::Conn(sea_orm::RuntimeErr::Internal("refused".to_string())).into();
        let err: ItemError = db_err.into();
        assert!(matches!(err, ItemError::Unavailable(_)));
        assert!(err.is_retryable());
    }
}
