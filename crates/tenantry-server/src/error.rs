//! Unified HTTP error handling.
//!
//! Every handler returns `Result<T, ApiError>`. Domain errors map to one
//! status each; server-side failures are logged and answered without
//! internal detail.

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tenantry_core::TenantryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] TenantryError),

    /// No usable bearer token on a protected route.
    #[error("Missing or malformed bearer token")]
    Unauthorized,

    /// Valid token for a different organization.
    #[error("Token does not grant access to this organization")]
    Forbidden,

    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized"),
            Self::Forbidden => (StatusCode::FORBIDDEN, "forbidden"),
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            Self::Domain(err) => match err {
                TenantryError::InvalidName { .. } => (StatusCode::BAD_REQUEST, "invalid_name"),
                TenantryError::InvalidEmail { .. } => (StatusCode::BAD_REQUEST, "invalid_email"),
                TenantryError::InvalidPassword { .. } => {
                    (StatusCode::BAD_REQUEST, "invalid_password")
                }
                TenantryError::DuplicateEmail => (StatusCode::CONFLICT, "duplicate_email"),
                TenantryError::NamespaceConflict { .. } => {
                    (StatusCode::CONFLICT, "namespace_conflict")
                }
                TenantryError::NamespaceExhausted { .. } => {
                    (StatusCode::CONFLICT, "namespace_exhausted")
                }
                TenantryError::NotFound { .. } => (StatusCode::NOT_FOUND, "not_found"),
                TenantryError::InvalidCredentials => {
                    (StatusCode::UNAUTHORIZED, "invalid_credentials")
                }
                TenantryError::TokenExpired => (StatusCode::UNAUTHORIZED, "token_expired"),
                TenantryError::TokenInvalid(_) => (StatusCode::UNAUTHORIZED, "token_invalid"),
                TenantryError::StorageUnavailable(_) => {
                    (StatusCode::SERVICE_UNAVAILABLE, "storage_unavailable")
                }
                TenantryError::Database(_)
                | TenantryError::Crypto(_)
                | TenantryError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
            },
        }
    }

    fn public_message(&self) -> String {
        match self {
            Self::Domain(TenantryError::StorageUnavailable(_)) => {
                "Storage temporarily unavailable".to_string()
            }
            Self::Domain(
                TenantryError::Database(_) | TenantryError::Crypto(_) | TenantryError::Internal(_),
            ) => "Internal server error".to_string(),
            Self::Domain(TenantryError::TokenInvalid(_)) => "invalid token".to_string(),
            Self::Domain(TenantryError::NotFound { .. }) => "Organization not found".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = ErrorBody {
            error: code,
            message: self.public_message(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

/// Result type alias for `ApiError`.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn status(err: TenantryError) -> StatusCode {
        ApiError::from(err).into_response().status()
    }

    #[test]
    fn domain_errors_map_to_one_status_each() {
        assert_eq!(status(TenantryError::invalid_name("empty")), StatusCode::BAD_REQUEST);
        assert_eq!(
            status(TenantryError::InvalidEmail { email: "x".into() }),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(status(TenantryError::DuplicateEmail), StatusCode::CONFLICT);
        assert_eq!(
            status(TenantryError::NamespaceExhausted {
                slug: "acme".into(),
                attempts: 1000
            }),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status(TenantryError::not_found("organization", "x")),
            StatusCode::NOT_FOUND
        );
        assert_eq!(status(TenantryError::InvalidCredentials), StatusCode::UNAUTHORIZED);
        assert_eq!(
            status(TenantryError::StorageUnavailable("down".into())),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            status(TenantryError::Database("boom".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn internal_detail_is_not_exposed() {
        let err = ApiError::from(TenantryError::Database("table admin: secret detail".into()));
        assert_eq!(err.public_message(), "Internal server error");
    }

    #[test]
    fn auth_rejections() {
        assert_eq!(ApiError::Unauthorized.into_response().status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::Forbidden.into_response().status(), StatusCode::FORBIDDEN);
    }
}
