//! Repository trait definitions for data access abstraction.
//!
//! All repository operations are async. Implementations are handed an
//! explicit storage handle at construction; there is no global
//! connection.

use uuid::Uuid;

use crate::error::TenantryResult;
use crate::models::{
    admin::AdminAccount,
    namespace::NamespaceHandle,
    organization::{CreateOrganization, Organization, UpdateOrganization},
};

// ---------------------------------------------------------------------------
// Organization registry storage
// ---------------------------------------------------------------------------

pub trait OrganizationRepository: Send + Sync {
    /// Persist an organization, its admin account and the collection-name
    /// reservation as a single atomic write.
    ///
    /// Fails with `DuplicateEmail` if the admin email is taken and with
    /// `NamespaceConflict` if the collection name is already reserved. On
    /// failure nothing is written.
    fn create_with_admin(
        &self,
        input: CreateOrganization,
    ) -> impl Future<Output = TenantryResult<Organization>> + Send;

    /// Fetch an organization regardless of status.
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = TenantryResult<Organization>> + Send;

    /// Fetch the active organization whose admin has this email.
    fn find_active_by_admin_email(
        &self,
        email: &str,
    ) -> impl Future<Output = TenantryResult<Option<Organization>>> + Send;

    /// Fetch an admin account by email regardless of status.
    fn find_admin_by_email(
        &self,
        email: &str,
    ) -> impl Future<Output = TenantryResult<Option<AdminAccount>>> + Send;

    /// Update mutable fields of an active organization.
    fn update(
        &self,
        id: Uuid,
        input: UpdateOrganization,
    ) -> impl Future<Output = TenantryResult<Organization>> + Send;

    /// Soft-delete: marks the organization and its admin inactive. The
    /// collection-name reservation is left in place.
    fn deactivate(&self, id: Uuid) -> impl Future<Output = TenantryResult<()>> + Send;

    /// Whether a collection name has ever been reserved.
    fn is_namespace_reserved(
        &self,
        name: &str,
    ) -> impl Future<Output = TenantryResult<bool>> + Send;

    /// Total number of organization records, active or not.
    fn count(&self) -> impl Future<Output = TenantryResult<u64>> + Send;
}

// ---------------------------------------------------------------------------
// Physical namespace allocation
// ---------------------------------------------------------------------------

pub trait NamespaceAllocator: Send + Sync {
    /// Create the physical namespace for a collection name.
    ///
    /// Must be idempotent: allocating a name that already exists returns
    /// its handle without touching its contents.
    fn create_namespace(
        &self,
        name: &str,
    ) -> impl Future<Output = TenantryResult<NamespaceHandle>> + Send;
}
