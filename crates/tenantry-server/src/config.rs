//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `JWT_PRIVATE_KEY_PEM` - Ed25519 private key (PEM) for signing tokens
//! - `JWT_PUBLIC_KEY_PEM` - Ed25519 public key (PEM) for verifying tokens
//!
//! ## Optional
//! - `TENANTRY_HOST` - Bind address (default: 127.0.0.1)
//! - `TENANTRY_PORT` - Listen port (default: 8080)
//! - `TENANTRY_LOG_JSON` - Emit JSON logs when `true`/`1`
//! - `SURREAL_URL` - SurrealDB endpoint (default: ws://127.0.0.1:8000)
//! - `SURREAL_NAMESPACE` - SurrealDB namespace (default: tenantry)
//! - `SURREAL_DATABASE` - SurrealDB database (default: master)
//! - `SURREAL_USERNAME` / `SURREAL_PASSWORD` - Root credentials
//! - `JWT_ISSUER` - `iss` claim (default: tenantry)
//! - `ACCESS_TOKEN_TTL_SECS` - Token lifetime (default: 3600)
//! - `PASSWORD_PEPPER` - Server-side secret mixed into password hashes
//! - `MAX_NAMESPACE_ATTEMPTS` - Collection-name candidates per create
//!   (default: 1000)
//!
//! PEM values may use literal `\n` sequences in place of line breaks.

use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use secrecy::{ExposeSecret, SecretString};
use tenantry_auth::AuthConfig;
use tenantry_db::{DbConfig, DbCredentials};
use tenantry_registry::RegistryConfig;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Tenantry server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// JSON log output instead of human-readable text
    pub log_json: bool,
    pub surreal_url: String,
    pub surreal_namespace: String,
    pub surreal_database: String,
    pub surreal_username: Option<String>,
    pub surreal_password: Option<SecretString>,
    pub jwt_private_key: SecretString,
    pub jwt_public_key: String,
    pub jwt_issuer: String,
    pub access_token_ttl_secs: u64,
    pub password_pepper: Option<SecretString>,
    pub max_namespace_attempts: u32,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Env(lookup);

        let surreal_username = env.optional("SURREAL_USERNAME");
        let surreal_password = match &surreal_username {
            Some(_) => Some(SecretString::from(env.required("SURREAL_PASSWORD")?)),
            None => env.optional("SURREAL_PASSWORD").map(SecretString::from),
        };

        Ok(Self {
            host: env.parse_or("TENANTRY_HOST", "127.0.0.1")?,
            port: env.parse_or("TENANTRY_PORT", "8080")?,
            log_json: env.flag("TENANTRY_LOG_JSON"),
            surreal_url: env.or_default("SURREAL_URL", "ws://127.0.0.1:8000"),
            surreal_namespace: env.or_default("SURREAL_NAMESPACE", "tenantry"),
            surreal_database: env.or_default("SURREAL_DATABASE", "master"),
            surreal_username,
            surreal_password,
            jwt_private_key: SecretString::from(pem(env.required("JWT_PRIVATE_KEY_PEM")?)),
            jwt_public_key: pem(env.required("JWT_PUBLIC_KEY_PEM")?),
            jwt_issuer: env.or_default("JWT_ISSUER", "tenantry"),
            access_token_ttl_secs: env.parse_or("ACCESS_TOKEN_TTL_SECS", "3600")?,
            password_pepper: env
                .optional("PASSWORD_PEPPER")
                .filter(|p| !p.is_empty())
                .map(SecretString::from),
            max_namespace_attempts: env.parse_or("MAX_NAMESPACE_ATTEMPTS", "1000")?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn db_config(&self) -> DbConfig {
        let credentials = self
            .surreal_username
            .as_ref()
            .zip(self.surreal_password.as_ref())
            .map(|(username, password)| DbCredentials {
                username: username.clone(),
                password: password.expose_secret().to_string(),
            });

        DbConfig {
            url: self.surreal_url.clone(),
            namespace: self.surreal_namespace.clone(),
            database: self.surreal_database.clone(),
            credentials,
        }
    }

    pub fn auth_config(&self) -> AuthConfig {
        AuthConfig {
            jwt_private_key_pem: self.jwt_private_key.expose_secret().to_string(),
            jwt_public_key_pem: self.jwt_public_key.clone(),
            access_token_lifetime_secs: self.access_token_ttl_secs,
            jwt_issuer: self.jwt_issuer.clone(),
            pepper: self
                .password_pepper
                .as_ref()
                .map(|p| p.expose_secret().to_string()),
        }
    }

    pub fn registry_config(&self) -> RegistryConfig {
        RegistryConfig {
            max_namespace_attempts: self.max_namespace_attempts,
            ..RegistryConfig::default()
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

struct Env<F>(F);

impl<F: Fn(&str) -> Option<String>> Env<F> {
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key)
    }

    fn required(&self, key: &str) -> Result<String, ConfigError> {
        self.optional(key)
            .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
    }

    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }

    fn parse_or<T>(&self, key: &str, default: &str) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.or_default(key, default)
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    }

    fn flag(&self, key: &str) -> bool {
        self.optional(key)
            .is_some_and(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
    }
}

/// Restore line breaks in PEM values passed through single-line env vars.
fn pem(value: String) -> String {
    if value.contains("\\n") {
        value.replace("\\n", "\n")
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| map.get(key).cloned())
    }

    const KEYS: [(&str, &str); 2] = [
        ("JWT_PRIVATE_KEY_PEM", "signing-key-material"),
        ("JWT_PUBLIC_KEY_PEM", "public"),
    ];

    #[test]
    fn defaults() {
        let config = load(&KEYS).unwrap();

        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:8080");
        assert_eq!(config.access_token_ttl_secs, 3600);
        assert_eq!(config.max_namespace_attempts, 1000);
        assert_eq!(config.jwt_issuer, "tenantry");
        assert!(!config.log_json);
        assert!(config.db_config().credentials.is_none());
        assert!(config.auth_config().pepper.is_none());
    }

    #[test]
    fn missing_signing_key_is_an_error() {
        let err = load(&[("JWT_PUBLIC_KEY_PEM", "public")]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(ref k) if k == "JWT_PRIVATE_KEY_PEM"));
    }

    #[test]
    fn invalid_port_is_an_error() {
        let mut vars = KEYS.to_vec();
        vars.push(("TENANTRY_PORT", "eighty"));
        let err = load(&vars).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref k, _) if k == "TENANTRY_PORT"));
    }

    #[test]
    fn username_requires_password() {
        let mut vars = KEYS.to_vec();
        vars.push(("SURREAL_USERNAME", "root"));
        assert!(load(&vars).is_err());

        vars.push(("SURREAL_PASSWORD", "hunter2"));
        let creds = load(&vars).unwrap().db_config().credentials.unwrap();
        assert_eq!(creds.username, "root");
        assert_eq!(creds.password, "hunter2");
    }

    #[test]
    fn escaped_pem_newlines_are_restored() {
        let config = load(&[
            ("JWT_PRIVATE_KEY_PEM", "-----BEGIN-----\\nabc\\n-----END-----"),
            ("JWT_PUBLIC_KEY_PEM", "pub"),
        ])
        .unwrap();
        assert_eq!(
            config.auth_config().jwt_private_key_pem,
            "-----BEGIN-----\nabc\n-----END-----"
        );
    }

    #[test]
    fn secrets_are_redacted_in_debug_output() {
        let mut vars = KEYS.to_vec();
        vars.push(("PASSWORD_PEPPER", "very-secret-pepper"));
        let config = load(&vars).unwrap();

        let debug = format!("{config:?}");
        assert!(!debug.contains("very-secret-pepper"));
        assert!(!debug.contains("signing-key-material"));
    }
}
