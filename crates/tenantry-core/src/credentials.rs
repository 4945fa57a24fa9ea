//! Password hashing contract.

use crate::error::TenantryResult;

/// An adaptive password-hashing primitive.
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password into an opaque, self-describing string.
    fn hash(&self, plaintext: &str) -> TenantryResult<String>;

    /// Check a plaintext password against a stored hash.
    ///
    /// Returns `Ok(false)` on mismatch and an error only if the stored
    /// hash is unusable.
    fn verify(&self, plaintext: &str, hash: &str) -> TenantryResult<bool>;
}
