//! Database-specific error types and conversions.

use tenantry_core::error::TenantryError;

/// Unique index guarding admin emails.
pub(crate) const ADMIN_EMAIL_INDEX: &str = "idx_admin_email";
/// Unique index on the reservation log.
pub(crate) const RESERVATION_NAME_INDEX: &str = "idx_namespace_reservation_name";
/// Unique index on organization collection names.
pub(crate) const ORGANIZATION_COLLECTION_INDEX: &str = "idx_organization_collection";

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// The driver could not deliver the query (connection, transport).
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    /// A statement was delivered but failed to execute.
    #[error("Query failed: {0}")]
    Query(String),

    /// A result row could not be decoded into the expected shape.
    #[error("Decode failed: {0}")]
    Decode(String),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Unique index {index} violated: {message}")]
    UniqueViolation { index: String, message: String },

    #[error("Record not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },
}

impl DbError {
    /// Classify a statement failure reported by `Response::check`.
    ///
    /// Unique-index violations name the offending index in the message;
    /// inside a failed transaction every statement repeats the original
    /// cause, so a substring match is enough.
    pub(crate) fn from_statement(err: surrealdb::Error) -> Self {
        let message = err.to_string();
        for index in [
            ADMIN_EMAIL_INDEX,
            RESERVATION_NAME_INDEX,
            ORGANIZATION_COLLECTION_INDEX,
        ] {
            if message.contains(index) {
                return Self::UniqueViolation {
                    index: index.to_string(),
                    message,
                };
            }
        }
        Self::Query(message)
    }

    pub(crate) fn decode(err: surrealdb::Error) -> Self {
        Self::Decode(err.to_string())
    }

    /// Optimistic-concurrency abort: another transaction touched the same
    /// keys first. Re-running the statement may succeed.
    pub(crate) fn is_transaction_conflict(&self) -> bool {
        match self {
            Self::Query(message) => message.to_ascii_lowercase().contains("conflict"),
            Self::Surreal(e) => e.to_string().to_ascii_lowercase().contains("conflict"),
            _ => false,
        }
    }
}

/// Attempts for statements that may abort on a write conflict.
pub(crate) const CONFLICT_ATTEMPTS: u32 = 3;

/// Conversion that carries the name under contention so the registry can
/// report which candidate lost the race.
pub(crate) fn into_create_error(err: DbError, collection_name: &str) -> TenantryError {
    match err {
        DbError::UniqueViolation { index, .. } if index == ADMIN_EMAIL_INDEX => {
            TenantryError::DuplicateEmail
        }
        DbError::UniqueViolation { .. } => TenantryError::NamespaceConflict {
            name: collection_name.to_string(),
        },
        other => other.into(),
    }
}

impl From<DbError> for TenantryError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => TenantryError::NotFound { entity, id },
            DbError::Surreal(e) => TenantryError::StorageUnavailable(e.to_string()),
            DbError::UniqueViolation { index, .. } if index == ADMIN_EMAIL_INDEX => {
                TenantryError::DuplicateEmail
            }
            other => TenantryError::Database(other.to_string()),
        }
    }
}
