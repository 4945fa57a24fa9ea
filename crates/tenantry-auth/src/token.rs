//! JWT access token issuance and verification.
//!
//! Tokens are stateless: nothing is persisted at issuance and there is no
//! revocation list.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::error::AuthError;

/// JWT claims embedded in every access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    /// Subject — admin account ID (UUID string).
    pub sub: String,
    /// Organization ID (UUID string).
    pub org_id: String,
    /// Admin email.
    pub email: String,
    /// Issuer.
    pub iss: String,
    /// Issued-at (Unix timestamp).
    pub iat: i64,
    /// Expiration (Unix timestamp).
    pub exp: i64,
    /// Unique token ID (UUID string).
    pub jti: String,
}

impl AccessTokenClaims {
    /// Parse the organization ID claim.
    pub fn organization_id(&self) -> Result<Uuid, AuthError> {
        Uuid::parse_str(&self.org_id).map_err(|e| AuthError::TokenInvalid(format!("org_id: {e}")))
    }
}

/// Issue a signed EdDSA (Ed25519) JWT access token for an admin.
pub fn issue_access_token(
    admin_id: Uuid,
    org_id: Uuid,
    email: &str,
    config: &AuthConfig,
) -> Result<String, AuthError> {
    let now = Utc::now().timestamp();
    let claims = AccessTokenClaims {
        sub: admin_id.to_string(),
        org_id: org_id.to_string(),
        email: email.to_string(),
        iss: config.jwt_issuer.clone(),
        iat: now,
        exp: now + config.access_token_lifetime_secs as i64,
        jti: Uuid::new_v4().to_string(),
    };

    encode_claims(&claims, config)
}

/// Sign an arbitrary claim set with the configured private key.
pub fn encode_claims(claims: &AccessTokenClaims, config: &AuthConfig) -> Result<String, AuthError> {
    let key = EncodingKey::from_ed_pem(config.jwt_private_key_pem.as_bytes())
        .map_err(|e| AuthError::Crypto(format!("bad private key: {e}")))?;

    let header = Header::new(Algorithm::EdDSA);
    jsonwebtoken::encode(&header, claims, &key)
        .map_err(|e| AuthError::Crypto(format!("JWT encode: {e}")))
}

/// Decode and verify an EdDSA JWT access token (signature, expiry,
/// issuer).
pub fn decode_access_token(
    token: &str,
    config: &AuthConfig,
) -> Result<AccessTokenClaims, AuthError> {
    let key = DecodingKey::from_ed_pem(config.jwt_public_key_pem.as_bytes())
        .map_err(|e| AuthError::Crypto(format!("bad public key: {e}")))?;

    let mut validation = Validation::new(Algorithm::EdDSA);
    validation.set_issuer(&[&config.jwt_issuer]);
    validation.set_required_spec_claims(&["sub", "exp", "iat", "iss"]);

    jsonwebtoken::decode::<AccessTokenClaims>(token, &key, &validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::TokenInvalid(e.to_string()),
        })
}
