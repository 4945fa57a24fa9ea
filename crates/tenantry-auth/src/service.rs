//! Admin login gateway.

use std::fmt;

use tenantry_core::error::{TenantryError, TenantryResult};
use tenantry_core::repository::OrganizationRepository;
use tenantry_core::validation::normalize_email;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::password;
use crate::token::{self, AccessTokenClaims};

/// Input for the login flow.
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for LoginInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginInput")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Successful login result.
#[derive(Debug)]
pub struct LoginOutput {
    /// Signed JWT access token.
    pub access_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: u64,
    pub admin_id: Uuid,
    pub organization_id: Uuid,
}

/// Authentication service.
///
/// Generic over the repository implementation so that the auth layer
/// has no dependency on the database crate.
pub struct AuthService<R: OrganizationRepository> {
    repo: R,
    config: AuthConfig,
    /// Hash verified against when the email is unknown, so that both
    /// failure paths pay for one Argon2id verification.
    dummy_hash: Option<String>,
}

impl<R: OrganizationRepository> AuthService<R> {
    pub fn new(repo: R, config: AuthConfig) -> Self {
        let dummy_hash = match password::hash_password(
            "tenantry-dummy-password",
            config.pepper.as_deref(),
        ) {
            Ok(hash) => Some(hash),
            Err(e) => {
                warn!(error = %e, "Could not prepare dummy hash for unknown-email logins");
                None
            }
        };

        Self {
            repo,
            config,
            dummy_hash,
        }
    }

    /// Authenticate an organization admin by email + password and issue
    /// an access token.
    ///
    /// Unknown email, wrong password and a deleted organization all
    /// yield the same `InvalidCredentials` error.
    #[instrument(skip(self, input))]
    pub async fn login(&self, input: LoginInput) -> TenantryResult<LoginOutput> {
        let email = normalize_email(&input.email);

        // 1. Look up the admin account.
        let Some(admin) = self.repo.find_admin_by_email(&email).await? else {
            if let Some(dummy) = &self.dummy_hash {
                let _ = password::verify_password(
                    &input.password,
                    dummy,
                    self.config.pepper.as_deref(),
                );
            }
            debug!("Login rejected: unknown email");
            return Err(AuthError::InvalidCredentials.into());
        };

        // 2. Verify password.
        let valid = password::verify_password(
            &input.password,
            &admin.password_hash,
            self.config.pepper.as_deref(),
        )?;

        if !valid {
            debug!(admin_id = %admin.id, "Login rejected: password mismatch");
            return Err(AuthError::InvalidCredentials.into());
        }

        // 3. Admins of deleted organizations are deactivated with them;
        // the organization's own status is checked as well.
        if !admin.active || !self.organization_is_active(admin.organization_id).await? {
            debug!(admin_id = %admin.id, "Login rejected: organization inactive");
            return Err(AuthError::InvalidCredentials.into());
        }

        // 4. Issue JWT access token.
        let access_token =
            token::issue_access_token(admin.id, admin.organization_id, &admin.email, &self.config)?;

        info!(
            admin_id = %admin.id,
            organization_id = %admin.organization_id,
            "Admin logged in"
        );

        Ok(LoginOutput {
            access_token,
            expires_in: self.config.access_token_lifetime_secs,
            admin_id: admin.id,
            organization_id: admin.organization_id,
        })
    }

    async fn organization_is_active(&self, org_id: Uuid) -> TenantryResult<bool> {
        match self.repo.get_by_id(org_id).await {
            Ok(org) => Ok(org.is_active()),
            Err(TenantryError::NotFound { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Validate a bearer token's signature, issuer and expiry and return
    /// its claims.
    pub fn authenticate(&self, access_token: &str) -> TenantryResult<AccessTokenClaims> {
        Ok(token::decode_access_token(access_token, &self.config)?)
    }
}
