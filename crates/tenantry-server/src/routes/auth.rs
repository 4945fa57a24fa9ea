//! Admin login.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde::{Deserialize, Serialize};
use tenantry_auth::LoginInput;

use crate::error::Result;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub admin_email: String,
    pub admin_password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: &'static str,
    pub expires_in: u64,
}

pub async fn login(
    State(state): State<AppState>,
    payload: std::result::Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>> {
    let Json(body) = payload?;

    let output = state
        .auth()
        .login(LoginInput {
            email: body.admin_email,
            password: body.admin_password,
        })
        .await?;

    Ok(Json(LoginResponse {
        token: output.access_token,
        token_type: "Bearer",
        expires_in: output.expires_in,
    }))
}
