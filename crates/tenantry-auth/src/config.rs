//! Authentication configuration.

/// Configuration for the authentication service.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// PEM-encoded Ed25519 private key for JWT signing.
    pub jwt_private_key_pem: String,
    /// PEM-encoded Ed25519 public key for JWT verification.
    pub jwt_public_key_pem: String,
    /// Access token lifetime in seconds (default: 3600 = 1 hour).
    pub access_token_lifetime_secs: u64,
    /// JWT issuer (`iss` claim).
    pub jwt_issuer: String,
    /// Optional pepper prepended to passwords before Argon2id hashing
    /// and verification.
    pub pepper: Option<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_private_key_pem: String::new(),
            jwt_public_key_pem: String::new(),
            access_token_lifetime_secs: 3600,
            jwt_issuer: "tenantry".into(),
            pepper: None,
        }
    }
}
