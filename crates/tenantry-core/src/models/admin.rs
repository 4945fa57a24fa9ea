//! Admin account domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The single administrator bound to an organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminAccount {
    pub id: Uuid,
    pub organization_id: Uuid,
    /// Normalized (trimmed, lower-cased) email, unique system-wide.
    pub email: String,
    /// Argon2id PHC string.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Cleared when the owning organization is deleted.
    pub active: bool,
    pub created_at: DateTime<Utc>,
}
