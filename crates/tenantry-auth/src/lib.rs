//! Tenantry Auth — Argon2id password hashing, EdDSA JWT issuance and
//! validation, and the admin login gateway.

pub mod config;
pub mod error;
pub mod password;
pub mod service;
pub mod token;

pub use config::AuthConfig;
pub use error::AuthError;
pub use password::Argon2PasswordHasher;
pub use service::{AuthService, LoginInput, LoginOutput};
pub use token::AccessTokenClaims;
