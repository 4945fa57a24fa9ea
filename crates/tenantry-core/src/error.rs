//! Error types for the Tenantry system.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TenantryError {
    #[error("Invalid organization name: {reason}")]
    InvalidName { reason: String },

    #[error("Invalid email address: {email}")]
    InvalidEmail { email: String },

    #[error("Invalid password: {reason}")]
    InvalidPassword { reason: String },

    #[error("An admin with this email already exists")]
    DuplicateEmail,

    /// A storage-level uniqueness violation on a collection name.
    ///
    /// Raised when another creation claimed the same name between the
    /// resolver's pre-check and the insert. The registry retries with the
    /// next candidate, so this rarely reaches a caller.
    #[error("Collection name already reserved: {name}")]
    NamespaceConflict { name: String },

    #[error("No free collection name for slug '{slug}' after {attempts} attempts")]
    NamespaceExhausted { slug: String, attempts: u32 },

    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("token has expired")]
    TokenExpired,

    #[error("invalid token: {0}")]
    TokenInvalid(String),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Cryptography error: {0}")]
    Crypto(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl TenantryError {
    pub fn not_found(entity: &str, id: impl ToString) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    pub fn invalid_name(reason: impl Into<String>) -> Self {
        Self::InvalidName {
            reason: reason.into(),
        }
    }
}

pub type TenantryResult<T> = Result<T, TenantryError>;
