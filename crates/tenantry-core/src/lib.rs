//! Tenantry Core — domain models, the error taxonomy, and the traits
//! that decouple the registry and auth services from storage and
//! cryptography.

pub mod credentials;
pub mod error;
pub mod models;
pub mod repository;
pub mod validation;

pub use error::{TenantryError, TenantryResult};
