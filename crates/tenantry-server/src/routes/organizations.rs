//! Organization lifecycle endpoints.

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tenantry_core::models::organization::Organization;
use tenantry_registry::CreateOrganizationRequest;
use uuid::Uuid;

use crate::error::Result;
use crate::middleware::RequireAdmin;
use crate::state::AppState;

type JsonBody<T> = std::result::Result<Json<T>, JsonRejection>;
type OrgPath = std::result::Result<Path<Uuid>, PathRejection>;

#[derive(Debug, Deserialize)]
pub struct CreateOrganizationBody {
    pub display_name: String,
    pub admin_email: String,
    pub admin_password: String,
}

#[derive(Debug, Serialize)]
pub struct CreatedOrganization {
    pub id: Uuid,
    pub slug: String,
    pub collection_name: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateOrganizationBody {
    pub display_name: String,
}

#[derive(Debug, Serialize)]
pub struct UpdatedOrganization {
    pub id: Uuid,
    pub display_name: String,
}

#[derive(Debug, Serialize)]
pub struct OrganizationDetails {
    pub id: Uuid,
    pub display_name: String,
    pub slug: String,
    pub collection_name: String,
    pub admin_email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Organization> for OrganizationDetails {
    fn from(org: Organization) -> Self {
        Self {
            id: org.id,
            display_name: org.display_name,
            slug: org.slug,
            collection_name: org.collection_name,
            admin_email: org.admin_email,
            created_at: org.created_at,
            updated_at: org.updated_at,
        }
    }
}

pub async fn create(
    State(state): State<AppState>,
    payload: JsonBody<CreateOrganizationBody>,
) -> Result<(StatusCode, Json<CreatedOrganization>)> {
    let Json(body) = payload?;

    let org = state
        .registry()
        .create(CreateOrganizationRequest {
            display_name: body.display_name,
            admin_email: body.admin_email,
            admin_password: body.admin_password,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedOrganization {
            id: org.id,
            slug: org.slug,
            collection_name: org.collection_name,
        }),
    ))
}

pub async fn show(State(state): State<AppState>, path: OrgPath) -> Result<Json<OrganizationDetails>> {
    let Path(id) = path?;
    let org = state.registry().get(id).await?;
    Ok(Json(org.into()))
}

pub async fn update(
    admin: RequireAdmin,
    State(state): State<AppState>,
    path: OrgPath,
    payload: JsonBody<UpdateOrganizationBody>,
) -> Result<Json<UpdatedOrganization>> {
    let Path(id) = path?;
    admin.ensure_organization(id)?;
    let Json(body) = payload?;

    let org = state.registry().update(id, &body.display_name).await?;

    Ok(Json(UpdatedOrganization {
        id: org.id,
        display_name: org.display_name,
    }))
}

pub async fn delete(
    admin: RequireAdmin,
    State(state): State<AppState>,
    path: OrgPath,
) -> Result<StatusCode> {
    let Path(id) = path?;
    admin.ensure_organization(id)?;

    state.registry().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
