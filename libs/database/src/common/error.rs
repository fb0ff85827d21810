/// Unified error type for all database operations.
///
/// The variants separate what a caller can do about a failure: `Validation`
/// never reached the store, `Conflict` and `Integrity` will fail identically
/// on retry, `Unavailable` is transient and may be retried with backoff,
/// everything else is fatal. "Not found" is never an error at this layer;
/// reads return `Option`/empty collections instead.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// Malformed input (unknown sort field, zero page size). Raised before
    /// any statement is issued.
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Unique or check constraint violation on write.
    #[error("Constraint violation: {0}")]
    Conflict(String),

    /// Delete or update blocked by dependent rows (foreign key violation).
    #[error("Blocked by dependent records: {0}")]
    Integrity(String),

    /// Connectivity or timeout failure. Retryable by the caller; this layer
    /// does not retry per-operation calls itself.
    #[cfg(feature = "postgres")]
    #[error("Database unavailable: {0}")]
    Unavailable(#[source] sea_orm::DbErr),

    /// Any other backend failure (schema mismatch, malformed statement).
    #[cfg(feature = "postgres")]
    #[error("Storage error: {0}")]
    Storage(#[source] sea_orm::DbErr),

    /// Operation the repository cannot express for this entity.
    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    /// Health check failed
    #[error("Health check failed: {0}")]
    HealthCheckFailed(String),

    /// Migration error
    #[error("Migration error: {0}")]
    MigrationError(String),
}

impl DatabaseError {
    /// Whether retrying the same call, unchanged, can succeed.
    pub fn is_retryable(&self) -> bool {
        #[cfg(feature = "postgres")]
        {
            matches!(self, DatabaseError::Unavailable(_))
        }
        #[cfg(not(feature = "postgres"))]
        {
            false
        }
    }
}

/// Result type alias for database operations
pub type DatabaseResult<T> = Result<T, DatabaseError>;

#[cfg(feature = "postgres")]
impl From<sea_orm::DbErr> for DatabaseError {
    fn from(err: sea_orm::DbErr) -> Self {
        use sea_orm::{DbErr, SqlErr};

        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(constraint)) => {
                DatabaseError::Conflict(constraint)
            }
            Some(SqlErr::ForeignKeyConstraintViolation(constraint)) => {
                DatabaseError::Integrity(constraint)
            }
            _ => match err {
                DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => DatabaseError::Unavailable(err),
                _ => DatabaseError::Storage(err),
            },
        }
    }
}
