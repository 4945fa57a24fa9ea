//! SurrealDB implementation of [`OrganizationRepository`].
//!
//! Organizations, their admin accounts and the namespace reservation log
//! live in three registry tables. Uniqueness of admin emails and
//! collection names is enforced by unique indexes, not by the callers'
//! pre-checks.

use chrono::{DateTime, Utc};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tenantry_core::error::{TenantryError, TenantryResult};
use tenantry_core::models::admin::AdminAccount;
use tenantry_core::models::organization::{
    CreateOrganization, Organization, OrganizationStatus, UpdateOrganization,
};
use tenantry_core::repository::OrganizationRepository;
use tracing::debug;
use uuid::Uuid;

use crate::error::{CONFLICT_ATTEMPTS, DbError, into_create_error};

const SELECT_ORGANIZATION: &str = "SELECT meta::id(id) AS record_id, * \
     FROM type::record('organization', $id)";

/// Organization row including the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct OrganizationRow {
    record_id: String,
    display_name: String,
    slug: String,
    collection_name: String,
    admin_email: String,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Admin row including the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct AdminRow {
    record_id: String,
    organization_id: String,
    email: String,
    password_hash: String,
    active: bool,
    created_at: DateTime<Utc>,
}

/// Minimal projection of rows touched by a status change.
#[derive(Debug, SurrealValue)]
struct StatusRow {
    status: String,
}

/// Row struct for count queries.
#[derive(Debug, SurrealValue)]
struct CountRow {
    total: u64,
}

fn parse_uuid(field: &str, value: &str) -> Result<Uuid, DbError> {
    Uuid::parse_str(value).map_err(|e| DbError::Decode(format!("invalid {field} UUID: {e}")))
}

fn parse_status(s: &str) -> Result<OrganizationStatus, DbError> {
    match s {
        "Active" => Ok(OrganizationStatus::Active),
        "Inactive" => Ok(OrganizationStatus::Inactive),
        other => Err(DbError::Decode(format!(
            "unknown organization status: {other}"
        ))),
    }
}

impl OrganizationRow {
    fn try_into_organization(self) -> Result<Organization, DbError> {
        Ok(Organization {
            id: parse_uuid("organization", &self.record_id)?,
            display_name: self.display_name,
            slug: self.slug,
            collection_name: self.collection_name,
            status: parse_status(&self.status)?,
            admin_email: self.admin_email,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl AdminRow {
    fn try_into_admin(self) -> Result<AdminAccount, DbError> {
        Ok(AdminAccount {
            id: parse_uuid("admin", &self.record_id)?,
            organization_id: parse_uuid("organization", &self.organization_id)?,
            email: self.email,
            password_hash: self.password_hash,
            active: self.active,
            created_at: self.created_at,
        })
    }
}

/// SurrealDB implementation of the Organization repository.
#[derive(Clone)]
pub struct SurrealOrganizationRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealOrganizationRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }

    async fn fetch(&self, id: Uuid) -> Result<Option<Organization>, DbError> {
        let mut result = self
            .db
            .query(SELECT_ORGANIZATION)
            .bind(("id", id.to_string()))
            .await?;

        let rows: Vec<OrganizationRow> = result.take(0).map_err(DbError::decode)?;
        rows.into_iter()
            .next()
            .map(OrganizationRow::try_into_organization)
            .transpose()
    }

    /// Insert the reservation, admin and organization rows in one
    /// transaction.
    async fn insert_with_admin(
        &self,
        org_id: Uuid,
        admin_id: Uuid,
        input: CreateOrganization,
    ) -> Result<(), DbError> {
        self.db
            .query(
                "BEGIN TRANSACTION;
                 CREATE type::record('namespace_reservation', $reservation_id) SET \
                    name = $collection_name, organization_id = $org_id;
                 CREATE type::record('admin', $admin_id) SET \
                    organization_id = $org_id, email = $email, \
                    password_hash = $password_hash, active = true;
                 CREATE type::record('organization', $org_id) SET \
                    display_name = $display_name, slug = $slug, \
                    collection_name = $collection_name, admin_id = $admin_id, \
                    admin_email = $email, status = 'Active';
                 COMMIT TRANSACTION;",
            )
            .bind(("reservation_id", Uuid::new_v4().to_string()))
            .bind(("admin_id", admin_id.to_string()))
            .bind(("org_id", org_id.to_string()))
            .bind(("collection_name", input.collection_name))
            .bind(("email", input.admin_email))
            .bind(("password_hash", input.admin_password_hash))
            .bind(("display_name", input.display_name))
            .bind(("slug", input.slug))
            .await?
            .check()
            .map_err(DbError::from_statement)?;
        Ok(())
    }

    /// Name the uniqueness conflict behind a failed create, if any.
    ///
    /// Inside a failed transaction only the offending statement carries
    /// the index violation; the others report a generic "not executed"
    /// error, and a write conflict with a concurrent create names no index
    /// at all. Admin rows and reservations are never removed, so looking
    /// them up after the fact identifies the conflict reliably.
    async fn diagnose_create_failure(
        &self,
        email: &str,
        collection_name: &str,
    ) -> TenantryResult<Option<TenantryError>> {
        if self.find_admin_by_email(email).await?.is_some() {
            return Ok(Some(TenantryError::DuplicateEmail));
        }
        if self.is_namespace_reserved(collection_name).await? {
            return Ok(Some(TenantryError::NamespaceConflict {
                name: collection_name.to_string(),
            }));
        }
        Ok(None)
    }

    async fn fetch_active(&self, id: Uuid) -> Result<Organization, DbError> {
        match self.fetch(id).await? {
            Some(org) if org.is_active() => Ok(org),
            _ => Err(DbError::NotFound {
                entity: "organization".into(),
                id: id.to_string(),
            }),
        }
    }
}

impl<C: Connection> OrganizationRepository for SurrealOrganizationRepository<C> {
    async fn create_with_admin(&self, input: CreateOrganization) -> TenantryResult<Organization> {
        let org_id = Uuid::new_v4();
        let admin_id = Uuid::new_v4();
        let collection_name = input.collection_name.clone();
        let email = input.admin_email.clone();

        let mut attempt = 1;
        loop {
            let err = match self.insert_with_admin(org_id, admin_id, input.clone()).await {
                Ok(()) => break,
                Err(e) => e,
            };

            if matches!(err, DbError::UniqueViolation { .. }) {
                return Err(into_create_error(err, &collection_name));
            }
            if let Some(conflict) = self
                .diagnose_create_failure(&email, &collection_name)
                .await?
            {
                return Err(conflict);
            }
            if err.is_transaction_conflict() && attempt < CONFLICT_ATTEMPTS {
                debug!(collection = %collection_name, attempt, "Create conflicted, retrying");
                attempt += 1;
                continue;
            }
            return Err(err.into());
        }

        debug!(%org_id, %admin_id, collection = %collection_name, "Organization persisted");

        self.fetch(org_id).await?.ok_or_else(|| {
            TenantryError::Internal(format!("organization {org_id} missing after commit"))
        })
    }

    async fn get_by_id(&self, id: Uuid) -> TenantryResult<Organization> {
        self.fetch(id)
            .await?
            .ok_or_else(|| TenantryError::not_found("organization", id))
    }

    async fn find_active_by_admin_email(&self, email: &str) -> TenantryResult<Option<Organization>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM organization \
                 WHERE admin_email = $email AND status = 'Active' LIMIT 1",
            )
            .bind(("email", email.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<OrganizationRow> = result.take(0).map_err(DbError::decode)?;
        let org = rows
            .into_iter()
            .next()
            .map(OrganizationRow::try_into_organization)
            .transpose()?;
        Ok(org)
    }

    async fn find_admin_by_email(&self, email: &str) -> TenantryResult<Option<AdminAccount>> {
        let mut result = self
            .db
            .query("SELECT meta::id(id) AS record_id, * FROM admin WHERE email = $email LIMIT 1")
            .bind(("email", email.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<AdminRow> = result.take(0).map_err(DbError::decode)?;
        let admin = rows
            .into_iter()
            .next()
            .map(AdminRow::try_into_admin)
            .transpose()?;
        Ok(admin)
    }

    async fn update(&self, id: Uuid, input: UpdateOrganization) -> TenantryResult<Organization> {
        let current = self.fetch_active(id).await?;

        let Some(display_name) = input.display_name else {
            return Ok(current);
        };

        // Only the display name moves; slug and collection name are fixed
        // for the organization's lifetime.
        let mut result = self
            .db
            .query(
                "UPDATE type::record('organization', $id) SET \
                 display_name = $display_name, updated_at = time::now() \
                 WHERE status = 'Active';",
            )
            .query(SELECT_ORGANIZATION)
            .bind(("id", id.to_string()))
            .bind(("display_name", display_name))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(DbError::from_statement)?;

        let rows: Vec<OrganizationRow> = result.take(1).map_err(DbError::decode)?;
        match rows.into_iter().next() {
            Some(row) => {
                let org = row.try_into_organization()?;
                if org.is_active() {
                    Ok(org)
                } else {
                    Err(TenantryError::not_found("organization", id))
                }
            }
            None => Err(TenantryError::not_found("organization", id)),
        }
    }

    async fn deactivate(&self, id: Uuid) -> TenantryResult<()> {
        let id_str = id.to_string();

        // The organization and its admin change together or not at all.
        // Unknown or already-inactive organizations match no rows in the
        // first statement; the admin update is then a no-op.
        let mut result = self
            .db
            .query(
                "BEGIN TRANSACTION;
                 UPDATE type::record('organization', $id) SET \
                    status = 'Inactive', updated_at = time::now() \
                    WHERE status = 'Active';
                 UPDATE admin SET active = false WHERE organization_id = $id;
                 COMMIT TRANSACTION;",
            )
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(DbError::from_statement)?;

        let rows: Vec<StatusRow> = result.take(0).map_err(DbError::decode)?;
        if rows.iter().any(|row| row.status == "Inactive") {
            Ok(())
        } else {
            Err(TenantryError::not_found("organization", id_str))
        }
    }

    async fn is_namespace_reserved(&self, name: &str) -> TenantryResult<bool> {
        let mut result = self
            .db
            .query(
                "SELECT count() AS total FROM namespace_reservation \
                 WHERE name = $name GROUP ALL",
            )
            .bind(("name", name.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<CountRow> = result.take(0).map_err(DbError::decode)?;
        Ok(rows.first().is_some_and(|r| r.total > 0))
    }

    async fn count(&self) -> TenantryResult<u64> {
        let mut result = self
            .db
            .query("SELECT count() AS total FROM organization GROUP ALL")
            .await
            .map_err(DbError::from)?;

        let rows: Vec<CountRow> = result.take(0).map_err(DbError::decode)?;
        Ok(rows.first().map(|r| r.total).unwrap_or(0))
    }
}
