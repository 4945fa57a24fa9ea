//! Organization domain model.
//!
//! Organizations are the tenants of the system. Each one owns exactly one
//! storage namespace, named once at creation and never renamed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle state. `Active -> Inactive` is the only transition.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum OrganizationStatus {
    Active,
    Inactive,
}

/// A tenant organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    pub id: Uuid,
    /// Human-provided name. The only mutable identity field.
    pub display_name: String,
    /// URL-safe identifier derived from the display name at creation.
    pub slug: String,
    /// Storage namespace holding this organization's documents.
    pub collection_name: String,
    pub status: OrganizationStatus,
    /// Email of the bound admin account.
    pub admin_email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Organization {
    pub fn is_active(&self) -> bool {
        self.status == OrganizationStatus::Active
    }
}

/// Fields required to persist a new organization together with its admin.
///
/// Everything here is already resolved: the slug is derived, the
/// collection name is a proposed candidate, and the password is hashed.
#[derive(Debug, Clone)]
pub struct CreateOrganization {
    pub display_name: String,
    pub slug: String,
    pub collection_name: String,
    pub admin_email: String,
    pub admin_password_hash: String,
}

/// Fields that can be updated on an existing organization.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateOrganization {
    pub display_name: Option<String>,
}
