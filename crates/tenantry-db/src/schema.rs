//! Schema definitions and migration runner for SurrealDB.
//!
//! Registry tables use SCHEMAFULL mode; tenant namespaces are created
//! on demand as SCHEMALESS tables by the namespace allocator. UUIDs are
//! stored as strings. Enums are stored as strings with ASSERT
//! constraints for validation.

use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::info;

use crate::error::DbError;

// -----------------------------------------------------------------------
// Migration tracking
// -----------------------------------------------------------------------

const MIGRATION_TABLE_DDL: &str = "\
DEFINE TABLE IF NOT EXISTS _migration SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS version ON TABLE _migration TYPE int;
DEFINE FIELD IF NOT EXISTS name ON TABLE _migration TYPE string;
DEFINE FIELD IF NOT EXISTS applied_at ON TABLE _migration TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX IF NOT EXISTS idx_migration_version ON TABLE _migration \
    COLUMNS version UNIQUE;
";

#[derive(Debug, SurrealValue)]
struct MigrationRecord {
    version: u32,
    #[allow(dead_code)]
    name: String,
}

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

static MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "registry_tables",
        sql: SCHEMA_V1,
    },
    Migration {
        version: 2,
        name: "append_only_reservations",
        sql: SCHEMA_V2,
    },
];

// -----------------------------------------------------------------------
// Schema v1 — registry tables
// -----------------------------------------------------------------------

const SCHEMA_V1: &str = "\
-- =======================================================================
-- Organizations (registry scope)
-- =======================================================================
DEFINE TABLE organization SCHEMAFULL;
DEFINE FIELD display_name ON TABLE organization TYPE string;
DEFINE FIELD slug ON TABLE organization TYPE string;
DEFINE FIELD collection_name ON TABLE organization TYPE string;
DEFINE FIELD admin_id ON TABLE organization TYPE string;
DEFINE FIELD admin_email ON TABLE organization TYPE string;
DEFINE FIELD status ON TABLE organization TYPE string \
    ASSERT $value IN ['Active', 'Inactive'];
DEFINE FIELD created_at ON TABLE organization TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE organization TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_organization_collection ON TABLE organization \
    COLUMNS collection_name UNIQUE;
DEFINE INDEX idx_organization_slug ON TABLE organization \
    COLUMNS slug;
DEFINE INDEX idx_organization_owner ON TABLE organization \
    COLUMNS admin_email;

-- =======================================================================
-- Admin accounts (one per organization)
-- =======================================================================
DEFINE TABLE admin SCHEMAFULL;
DEFINE FIELD organization_id ON TABLE admin TYPE string;
DEFINE FIELD email ON TABLE admin TYPE string;
DEFINE FIELD password_hash ON TABLE admin TYPE string;
DEFINE FIELD active ON TABLE admin TYPE bool DEFAULT true;
DEFINE FIELD created_at ON TABLE admin TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_admin_email ON TABLE admin \
    COLUMNS email UNIQUE;

-- =======================================================================
-- Namespace reservations (append-only)
-- =======================================================================
DEFINE TABLE namespace_reservation SCHEMAFULL
    PERMISSIONS
        FOR create FULL
        FOR select FULL
        FOR update NONE
        FOR delete NONE;
DEFINE FIELD name ON TABLE namespace_reservation TYPE string;
DEFINE FIELD organization_id ON TABLE namespace_reservation TYPE string;
DEFINE FIELD reserved_at ON TABLE namespace_reservation TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_namespace_reservation_name ON TABLE namespace_reservation \
    COLUMNS name UNIQUE;
";

// -----------------------------------------------------------------------
// Schema v2 — reservation log guard
// -----------------------------------------------------------------------

/// Table PERMISSIONS bind record users only; root and the embedded
/// session skip them. Events fire for every session.
const SCHEMA_V2: &str = "\
DEFINE EVENT reservation_append_only ON TABLE namespace_reservation \
    WHEN $event = 'UPDATE' OR $event = 'DELETE' \
    THEN { THROW 'namespace reservations are append-only' };
";

// -----------------------------------------------------------------------
// Public API
// -----------------------------------------------------------------------

/// Run all pending migrations against the given SurrealDB client.
///
/// Creates the `_migration` tracking table on first run, then applies,
/// in order, every migration newer than the highest recorded version.
pub async fn run_migrations<C: Connection>(db: &Surreal<C>) -> Result<(), DbError> {
    db.query(MIGRATION_TABLE_DDL)
        .await?
        .check()
        .map_err(|e| DbError::Migration(e.to_string()))?;

    let current = current_version(db).await?;
    let pending = MIGRATIONS.iter().filter(|m| m.version > current);

    for migration in pending {
        apply(db, migration).await?;
    }

    Ok(())
}

async fn current_version<C: Connection>(db: &Surreal<C>) -> Result<u32, DbError> {
    let mut result = db
        .query("SELECT * FROM _migration ORDER BY version DESC LIMIT 1")
        .await?;
    let records: Vec<MigrationRecord> = result.take(0).map_err(DbError::decode)?;
    Ok(records.first().map(|m| m.version).unwrap_or(0))
}

/// Apply one migration and record it in the same transaction, so a
/// failed migration never leaves a tracking row behind.
async fn apply<C: Connection>(db: &Surreal<C>, migration: &Migration) -> Result<(), DbError> {
    info!(
        version = migration.version,
        name = migration.name,
        "Applying migration"
    );

    let sql = format!(
        "BEGIN TRANSACTION;\n{}\n\
         CREATE _migration SET version = $version, name = $name;\n\
         COMMIT TRANSACTION;",
        migration.sql
    );

    db.query(sql)
        .bind(("version", migration.version))
        .bind(("name", migration.name))
        .await?
        .check()
        .map_err(|e| {
            DbError::Migration(format!(
                "v{} '{}': {e}",
                migration.version, migration.name
            ))
        })?;

    info!(version = migration.version, "Migration applied");
    Ok(())
}
