//! Application state shared across handlers.

use std::sync::Arc;

use surrealdb::engine::any::Any;
use tenantry_auth::{Argon2PasswordHasher, AuthConfig, AuthService};
use tenantry_db::DbManager;
use tenantry_db::repository::{SurrealNamespaceAllocator, SurrealOrganizationRepository};
use tenantry_registry::{OrganizationRegistry, RegistryConfig};

/// The registry as wired to SurrealDB and Argon2id.
pub type Registry = OrganizationRegistry<
    SurrealOrganizationRepository<Any>,
    SurrealNamespaceAllocator<Any>,
    Argon2PasswordHasher,
>;

/// The login gateway as wired to SurrealDB.
pub type Auth = AuthService<SurrealOrganizationRepository<Any>>;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    db: DbManager,
    registry: Registry,
    auth: Auth,
}

impl AppState {
    /// Wire the services to one database connection.
    ///
    /// The registry hashes with the same pepper the login gateway
    /// verifies with.
    pub fn new(db: DbManager, auth_config: AuthConfig, registry_config: RegistryConfig) -> Self {
        let client = db.client().clone();

        let registry = OrganizationRegistry::new(
            SurrealOrganizationRepository::new(client.clone()),
            SurrealNamespaceAllocator::new(client.clone()),
            Argon2PasswordHasher::from_config(&auth_config),
            registry_config,
        );
        let auth = AuthService::new(SurrealOrganizationRepository::new(client), auth_config);

        Self {
            inner: Arc::new(AppStateInner { db, registry, auth }),
        }
    }

    pub fn db(&self) -> &DbManager {
        &self.inner.db
    }

    pub fn registry(&self) -> &Registry {
        &self.inner.registry
    }

    pub fn auth(&self) -> &Auth {
        &self.inner.auth
    }
}
