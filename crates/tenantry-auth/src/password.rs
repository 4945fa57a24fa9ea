//! Password hashing and verification using Argon2id.
//!
//! Hashes use OWASP-recommended parameters (memory: 19 MiB,
//! iterations: 2, parallelism: 1) with a random salt per hash. An
//! optional pepper (server-side secret) is prepended to the password
//! before hashing and must match at verification time.

use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHasher as _, PasswordVerifier};
use tenantry_core::credentials::PasswordHasher;
use tenantry_core::error::TenantryResult;

use crate::config::AuthConfig;
use crate::error::AuthError;

fn with_pepper(password: &str, pepper: Option<&str>) -> Vec<u8> {
    match pepper {
        Some(p) => format!("{p}{password}").into_bytes(),
        None => password.as_bytes().to_vec(),
    }
}

fn argon2id() -> Result<Argon2<'static>, AuthError> {
    // OWASP ASVS recommended: m=19456 (19 MiB), t=2, p=1
    let params = argon2::Params::new(19456, 2, 1, None)
        .map_err(|e| AuthError::Crypto(format!("argon2 params: {e}")))?;
    Ok(Argon2::new(
        argon2::Algorithm::Argon2id,
        argon2::Version::V0x13,
        params,
    ))
}

/// Hash a password into an Argon2id PHC string.
pub fn hash_password(password: &str, pepper: Option<&str>) -> Result<String, AuthError> {
    let input = with_pepper(password, pepper);
    let salt = SaltString::generate(&mut argon2::password_hash::rand_core::OsRng);

    argon2id()?
        .hash_password(&input, &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Crypto(format!("password hash: {e}")))
}

/// Verify a plaintext password against an Argon2id PHC-format hash.
///
/// Returns `Ok(true)` on match, `Ok(false)` on mismatch, or
/// `Err(AuthError::Crypto)` if the stored hash is malformed. The
/// parameters are read from the hash itself.
pub fn verify_password(
    password: &str,
    hash: &str,
    pepper: Option<&str>,
) -> Result<bool, AuthError> {
    let input = with_pepper(password, pepper);

    let parsed_hash = argon2::PasswordHash::new(hash)
        .map_err(|e| AuthError::Crypto(format!("invalid hash format: {e}")))?;

    match Argon2::default().verify_password(&input, &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AuthError::Crypto(format!("verify error: {e}"))),
    }
}

/// [`PasswordHasher`] backed by Argon2id.
#[derive(Debug, Clone, Default)]
pub struct Argon2PasswordHasher {
    pepper: Option<String>,
}

impl Argon2PasswordHasher {
    pub fn new(pepper: Option<String>) -> Self {
        Self { pepper }
    }

    /// Build a hasher that agrees with the auth service on the pepper.
    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(config.pepper.clone())
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, plaintext: &str) -> TenantryResult<String> {
        Ok(hash_password(plaintext, self.pepper.as_deref())?)
    }

    fn verify(&self, plaintext: &str, hash: &str) -> TenantryResult<bool> {
        Ok(verify_password(plaintext, hash, self.pepper.as_deref())?)
    }
}
