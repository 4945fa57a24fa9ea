//! Organization registry service — create, rename, soft delete, lookup.

use std::fmt;

use tenantry_core::credentials::PasswordHasher;
use tenantry_core::error::{TenantryError, TenantryResult};
use tenantry_core::models::organization::{CreateOrganization, Organization, UpdateOrganization};
use tenantry_core::repository::{NamespaceAllocator, OrganizationRepository};
use tenantry_core::validation::{is_valid_email, normalize_email};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::config::RegistryConfig;
use crate::naming::CollectionNameResolver;
use crate::slug::{slugify, validate_display_name};

/// Input for organization creation.
#[derive(Clone)]
pub struct CreateOrganizationRequest {
    pub display_name: String,
    pub admin_email: String,
    pub admin_password: String,
}

impl fmt::Debug for CreateOrganizationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateOrganizationRequest")
            .field("display_name", &self.display_name)
            .field("admin_email", &self.admin_email)
            .field("admin_password", &"[REDACTED]")
            .finish()
    }
}

/// Organization registry.
///
/// Generic over storage, namespace allocation and password hashing so it
/// has no dependency on the database or crypto crates.
pub struct OrganizationRegistry<R, N, H>
where
    R: OrganizationRepository,
    N: NamespaceAllocator,
    H: PasswordHasher,
{
    repo: R,
    allocator: N,
    hasher: H,
    resolver: CollectionNameResolver,
    config: RegistryConfig,
}

impl<R, N, H> OrganizationRegistry<R, N, H>
where
    R: OrganizationRepository,
    N: NamespaceAllocator,
    H: PasswordHasher,
{
    pub fn new(repo: R, allocator: N, hasher: H, config: RegistryConfig) -> Self {
        Self {
            repo,
            allocator,
            hasher,
            resolver: CollectionNameResolver::new(config.max_namespace_attempts),
            config,
        }
    }

    /// Register a new organization together with its admin account.
    ///
    /// The collection name is the first free candidate for the slug. A
    /// candidate lost to a concurrent create surfaces as a storage
    /// conflict and the next one is tried, up to the configured cap.
    #[instrument(skip(self, request), fields(display_name = %request.display_name))]
    pub async fn create(&self, request: CreateOrganizationRequest) -> TenantryResult<Organization> {
        let display_name = validate_display_name(&request.display_name)?;

        let email = normalize_email(&request.admin_email);
        if !is_valid_email(&email) {
            return Err(TenantryError::InvalidEmail {
                email: request.admin_email,
            });
        }

        if request.admin_password.chars().count() < self.config.min_password_length {
            return Err(TenantryError::InvalidPassword {
                reason: format!(
                    "must be at least {} characters",
                    self.config.min_password_length
                ),
            });
        }

        let slug = slugify(&display_name)?;

        if self.repo.find_admin_by_email(&email).await?.is_some() {
            debug!("Create rejected: admin email already registered");
            return Err(TenantryError::DuplicateEmail);
        }

        let password_hash = self.hasher.hash(&request.admin_password)?;

        for candidate in self.resolver.candidates(&slug) {
            if self.repo.is_namespace_reserved(&candidate).await? {
                continue;
            }

            let handle = self.allocator.create_namespace(&candidate).await?;

            let input = CreateOrganization {
                display_name: display_name.clone(),
                slug: slug.clone(),
                collection_name: handle.name,
                admin_email: email.clone(),
                admin_password_hash: password_hash.clone(),
            };

            match self.repo.create_with_admin(input).await {
                Ok(org) => {
                    info!(
                        organization_id = %org.id,
                        slug = %org.slug,
                        collection = %org.collection_name,
                        "Organization created"
                    );
                    return Ok(org);
                }
                Err(TenantryError::NamespaceConflict { name }) => {
                    warn!(collection = %name, "Collection name claimed concurrently, trying next");
                }
                Err(e) => return Err(e),
            }
        }

        warn!(%slug, attempts = self.resolver.max_attempts(), "No free collection name");
        Err(self.resolver.exhausted(&slug))
    }

    /// Rename an active organization. Slug and collection name stay fixed,
    /// but the new name must still be one a slug can be derived from.
    #[instrument(skip(self))]
    pub async fn update(&self, org_id: Uuid, new_display_name: &str) -> TenantryResult<Organization> {
        let display_name = validate_display_name(new_display_name)?;
        slugify(&display_name)?;

        let org = self
            .repo
            .update(
                org_id,
                UpdateOrganization {
                    display_name: Some(display_name),
                },
            )
            .await?;

        info!(organization_id = %org.id, "Organization renamed");
        Ok(org)
    }

    /// Soft-delete an active organization. Its collection name stays
    /// reserved.
    #[instrument(skip(self))]
    pub async fn delete(&self, org_id: Uuid) -> TenantryResult<()> {
        self.repo.deactivate(org_id).await?;
        info!(organization_id = %org_id, "Organization deactivated");
        Ok(())
    }

    /// Fetch an active organization.
    pub async fn get(&self, org_id: Uuid) -> TenantryResult<Organization> {
        let org = self.repo.get_by_id(org_id).await?;
        if !org.is_active() {
            return Err(TenantryError::not_found("organization", org_id));
        }
        Ok(org)
    }

    pub async fn get_by_admin_email(&self, email: &str) -> TenantryResult<Option<Organization>> {
        self.repo
            .find_active_by_admin_email(&normalize_email(email))
            .await
    }

    /// Number of organization records, including inactive ones.
    pub async fn count(&self) -> TenantryResult<u64> {
        self.repo.count().await
    }
}
