//! SurrealDB implementation of [`NamespaceAllocator`].
//!
//! Each tenant collection becomes a SCHEMALESS table named
//! `org_<collection_name>`.

use surrealdb::{Connection, Surreal};
use tenantry_core::error::{TenantryError, TenantryResult};
use tenantry_core::models::namespace::NamespaceHandle;
use tenantry_core::repository::NamespaceAllocator;
use tracing::debug;

use crate::error::{CONFLICT_ATTEMPTS, DbError};

/// Collection names are slugs with an optional numeric suffix; anything
/// else never reaches DDL.
fn is_safe_collection_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}

#[derive(Clone)]
pub struct SurrealNamespaceAllocator<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealNamespaceAllocator<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }

    async fn define(&self, ddl: String) -> Result<(), DbError> {
        self.db
            .query(ddl)
            .await?
            .check()
            .map_err(DbError::from_statement)?;
        Ok(())
    }
}

impl<C: Connection> NamespaceAllocator for SurrealNamespaceAllocator<C> {
    async fn create_namespace(&self, name: &str) -> TenantryResult<NamespaceHandle> {
        if !is_safe_collection_name(name) {
            return Err(TenantryError::Internal(format!(
                "refusing to allocate namespace with unsafe name '{name}'"
            )));
        }

        let handle = NamespaceHandle::for_collection(name);

        // Table names cannot be bound as parameters.
        let ddl = format!("DEFINE TABLE IF NOT EXISTS `{}` SCHEMALESS;", handle.table);

        // Concurrent creates of the same candidate race on the catalog entry.
        let mut attempt = 1;
        loop {
            match self.define(ddl.clone()).await {
                Ok(()) => break,
                Err(e) if e.is_transaction_conflict() && attempt < CONFLICT_ATTEMPTS => {
                    debug!(table = %handle.table, attempt, "Namespace definition conflicted, retrying");
                    attempt += 1;
                }
                Err(e) => return Err(e.into()),
            }
        }

        debug!(collection = %handle.name, table = %handle.table, "Namespace allocated");
        Ok(handle)
    }
}
