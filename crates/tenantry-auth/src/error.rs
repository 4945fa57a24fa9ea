//! Authentication error types.

use tenantry_core::error::TenantryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("token has expired")]
    TokenExpired,

    #[error("invalid token: {0}")]
    TokenInvalid(String),

    #[error("cryptography error: {0}")]
    Crypto(String),
}

impl From<AuthError> for TenantryError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => TenantryError::InvalidCredentials,
            AuthError::TokenExpired => TenantryError::TokenExpired,
            AuthError::TokenInvalid(msg) => TenantryError::TokenInvalid(msg),
            AuthError::Crypto(msg) => TenantryError::Crypto(msg),
        }
    }
}
