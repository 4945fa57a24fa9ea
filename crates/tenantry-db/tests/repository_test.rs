//! Integration tests for the organization repository and namespace
//! allocator using in-memory SurrealDB.

use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use tenantry_core::error::TenantryError;
use tenantry_core::models::organization::{
    CreateOrganization, OrganizationStatus, UpdateOrganization,
};
use tenantry_core::repository::{NamespaceAllocator, OrganizationRepository};
use tenantry_db::repository::{SurrealNamespaceAllocator, SurrealOrganizationRepository};
use uuid::Uuid;

/// Helper: spin up in-memory DB and run migrations.
async fn setup() -> Surreal<surrealdb::engine::local::Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    tenantry_db::run_migrations(&db).await.unwrap();
    db
}

fn new_org(name: &str, collection: &str, email: &str) -> CreateOrganization {
    CreateOrganization {
        display_name: name.into(),
        slug: collection.into(),
        collection_name: collection.into(),
        admin_email: email.into(),
        admin_password_hash: "$argon2id$placeholder".into(),
    }
}

// -----------------------------------------------------------------------
// Organization tests
// -----------------------------------------------------------------------

#[tokio::test]
async fn create_and_get_organization() {
    let repo = SurrealOrganizationRepository::new(setup().await);

    let org = repo
        .create_with_admin(new_org("Acme Inc.", "acme-inc", "admin@acme.com"))
        .await
        .unwrap();

    assert_eq!(org.display_name, "Acme Inc.");
    assert_eq!(org.slug, "acme-inc");
    assert_eq!(org.collection_name, "acme-inc");
    assert_eq!(org.admin_email, "admin@acme.com");
    assert_eq!(org.status, OrganizationStatus::Active);

    let fetched = repo.get_by_id(org.id).await.unwrap();
    assert_eq!(fetched.id, org.id);
    assert_eq!(fetched.collection_name, org.collection_name);
}

#[tokio::test]
async fn create_binds_admin_to_organization() {
    let repo = SurrealOrganizationRepository::new(setup().await);

    let org = repo
        .create_with_admin(new_org("Acme", "acme", "admin@acme.com"))
        .await
        .unwrap();

    let admin = repo
        .find_admin_by_email("admin@acme.com")
        .await
        .unwrap()
        .expect("admin should exist");
    assert_eq!(admin.organization_id, org.id);
    assert_eq!(admin.password_hash, "$argon2id$placeholder");
    assert!(admin.active);

    assert!(repo.is_namespace_reserved("acme").await.unwrap());
}

#[tokio::test]
async fn duplicate_email_is_rejected_without_partial_writes() {
    let repo = SurrealOrganizationRepository::new(setup().await);

    repo.create_with_admin(new_org("Acme", "acme", "admin@acme.com"))
        .await
        .unwrap();

    let err = repo
        .create_with_admin(new_org("Globex", "globex", "admin@acme.com"))
        .await
        .unwrap_err();

    assert!(
        matches!(err, TenantryError::DuplicateEmail),
        "expected DuplicateEmail, got: {err:?}"
    );
    assert_eq!(repo.count().await.unwrap(), 1);
    assert!(
        !repo.is_namespace_reserved("globex").await.unwrap(),
        "reservation must roll back with the failed transaction"
    );
}

#[tokio::test]
async fn reserved_collection_name_is_a_namespace_conflict() {
    let repo = SurrealOrganizationRepository::new(setup().await);

    repo.create_with_admin(new_org("Acme", "acme", "one@acme.com"))
        .await
        .unwrap();

    let err = repo
        .create_with_admin(new_org("Acme", "acme", "two@acme.com"))
        .await
        .unwrap_err();

    match err {
        TenantryError::NamespaceConflict { name } => assert_eq!(name, "acme"),
        other => panic!("expected NamespaceConflict, got: {other:?}"),
    }
    assert_eq!(repo.count().await.unwrap(), 1);
    assert!(repo.find_admin_by_email("two@acme.com").await.unwrap().is_none());
}

#[tokio::test]
async fn update_changes_display_name_only() {
    let repo = SurrealOrganizationRepository::new(setup().await);

    let org = repo
        .create_with_admin(new_org("Before", "before", "admin@before.com"))
        .await
        .unwrap();

    let updated = repo
        .update(
            org.id,
            UpdateOrganization {
                display_name: Some("After".into()),
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.id, org.id);
    assert_eq!(updated.display_name, "After");
    assert_eq!(updated.slug, "before");
    assert_eq!(updated.collection_name, "before");
    assert!(updated.updated_at >= org.updated_at);
}

#[tokio::test]
async fn update_unknown_organization_is_not_found() {
    let repo = SurrealOrganizationRepository::new(setup().await);

    let err = repo
        .update(
            Uuid::new_v4(),
            UpdateOrganization {
                display_name: Some("Nobody".into()),
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, TenantryError::NotFound { .. }));
}

#[tokio::test]
async fn deactivate_is_terminal_and_keeps_reservation() {
    let repo = SurrealOrganizationRepository::new(setup().await);

    let org = repo
        .create_with_admin(new_org("Acme", "acme", "admin@acme.com"))
        .await
        .unwrap();

    repo.deactivate(org.id).await.unwrap();

    let fetched = repo.get_by_id(org.id).await.unwrap();
    assert_eq!(fetched.status, OrganizationStatus::Inactive);

    let admin = repo
        .find_admin_by_email("admin@acme.com")
        .await
        .unwrap()
        .unwrap();
    assert!(!admin.active);

    assert!(repo.is_namespace_reserved("acme").await.unwrap());
    assert!(
        repo.find_active_by_admin_email("admin@acme.com")
            .await
            .unwrap()
            .is_none()
    );

    // Second delete: already inactive.
    let err = repo.deactivate(org.id).await.unwrap_err();
    assert!(matches!(err, TenantryError::NotFound { .. }));

    // Inactive organizations cannot be renamed.
    let err = repo
        .update(
            org.id,
            UpdateOrganization {
                display_name: Some("Zombie".into()),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, TenantryError::NotFound { .. }));
}

#[tokio::test]
async fn deactivate_rolls_back_when_admin_update_fails() {
    let db = setup().await;
    let repo = SurrealOrganizationRepository::new(db.clone());

    let org = repo
        .create_with_admin(new_org("Acme", "acme", "admin@acme.com"))
        .await
        .unwrap();

    // Make the second statement of the soft delete fail.
    db.query("DEFINE FIELD OVERWRITE active ON TABLE admin TYPE bool ASSERT $value = true")
        .await
        .unwrap()
        .check()
        .unwrap();

    assert!(repo.deactivate(org.id).await.is_err());

    let fetched = repo.get_by_id(org.id).await.unwrap();
    assert_eq!(fetched.status, OrganizationStatus::Active);
    let admin = repo
        .find_admin_by_email("admin@acme.com")
        .await
        .unwrap()
        .unwrap();
    assert!(admin.active);
}

#[tokio::test]
async fn deactivate_unknown_organization_is_not_found() {
    let repo = SurrealOrganizationRepository::new(setup().await);

    let err = repo.deactivate(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, TenantryError::NotFound { .. }));
}

#[tokio::test]
async fn find_active_by_admin_email() {
    let repo = SurrealOrganizationRepository::new(setup().await);

    let org = repo
        .create_with_admin(new_org("Acme", "acme", "admin@acme.com"))
        .await
        .unwrap();

    let found = repo
        .find_active_by_admin_email("admin@acme.com")
        .await
        .unwrap()
        .expect("organization should be found");
    assert_eq!(found.id, org.id);

    assert!(
        repo.find_active_by_admin_email("nobody@acme.com")
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn count_includes_inactive_organizations() {
    let repo = SurrealOrganizationRepository::new(setup().await);
    assert_eq!(repo.count().await.unwrap(), 0);

    let a = repo
        .create_with_admin(new_org("A Org", "a-org", "a@example.com"))
        .await
        .unwrap();
    repo.create_with_admin(new_org("B Org", "b-org", "b@example.com"))
        .await
        .unwrap();
    repo.deactivate(a.id).await.unwrap();

    assert_eq!(repo.count().await.unwrap(), 2);
}

// -----------------------------------------------------------------------
// Namespace allocator tests
// -----------------------------------------------------------------------

#[tokio::test]
async fn allocator_defines_prefixed_table() {
    let db = setup().await;
    let allocator = SurrealNamespaceAllocator::new(db.clone());

    let handle = allocator.create_namespace("acme-inc").await.unwrap();
    assert_eq!(handle.name, "acme-inc");
    assert_eq!(handle.table, "org_acme-inc");

    let mut result = db.query("INFO FOR DB").await.unwrap();
    let info: Option<surrealdb_types::Value> = result.take(0).unwrap();
    let info_str = format!("{:?}", info.unwrap());
    assert!(info_str.contains("org_acme-inc"), "missing tenant table");
}

#[tokio::test]
async fn allocator_is_idempotent_and_preserves_data() {
    let db = setup().await;
    let allocator = SurrealNamespaceAllocator::new(db.clone());

    allocator.create_namespace("acme").await.unwrap();
    db.query("CREATE `org_acme` SET sku = 'A-1'")
        .await
        .unwrap()
        .check()
        .unwrap();

    allocator.create_namespace("acme").await.unwrap();

    let mut result = db.query("SELECT * FROM `org_acme`").await.unwrap();
    let rows: Vec<surrealdb_types::Value> = result.take(0).unwrap();
    assert_eq!(rows.len(), 1, "re-allocation must not drop documents");
}

#[tokio::test]
async fn allocator_rejects_unsafe_names() {
    let allocator = SurrealNamespaceAllocator::new(setup().await);

    let err = allocator.create_namespace("Acme Inc").await.unwrap_err();
    assert!(matches!(err, TenantryError::Internal(_)));
}
