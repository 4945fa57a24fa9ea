//! Bearer-token authentication for organization admins.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Extractor that requires a valid admin access token.
///
/// ```rust,ignore
/// async fn handler(admin: RequireAdmin, Path(id): Path<Uuid>) -> Result<()> {
///     admin.ensure_organization(id)?;
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct RequireAdmin {
    /// Organization the token was issued for.
    pub organization_id: Uuid,
}

impl RequireAdmin {
    /// Reject with 403 unless the token was issued for `org_id`.
    pub fn ensure_organization(&self, org_id: Uuid) -> Result<(), ApiError> {
        if self.organization_id == org_id {
            Ok(())
        } else {
            tracing::debug!(
                token_org = %self.organization_id,
                requested_org = %org_id,
                "Cross-organization request rejected"
            );
            Err(ApiError::Forbidden)
        }
    }
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    let value = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or(ApiError::Unauthorized)?;
        let organization_id = state
            .auth()
            .authenticate(token)?
            .organization_id()
            .map_err(|_| ApiError::Unauthorized)?;

        Ok(Self { organization_id })
    }
}
