//! SurrealDB connection management.

use surrealdb::Surreal;
use surrealdb::engine::any::{self, Any};
use surrealdb::opt::auth::Root;
use tracing::info;

/// Root credentials for a remote SurrealDB server.
#[derive(Debug, Clone)]
pub struct DbCredentials {
    pub username: String,
    pub password: String,
}

/// Configuration for connecting to SurrealDB.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Endpoint URL; the scheme selects the engine
    /// (`ws://127.0.0.1:8000`, `mem://`).
    pub url: String,
    /// SurrealDB namespace.
    pub namespace: String,
    /// SurrealDB database name.
    pub database: String,
    /// Root credentials. Embedded engines run without them.
    pub credentials: Option<DbCredentials>,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            url: "ws://127.0.0.1:8000".into(),
            namespace: "tenantry".into(),
            database: "master".into(),
            credentials: Some(DbCredentials {
                username: "root".into(),
                password: "root".into(),
            }),
        }
    }
}

impl DbConfig {
    /// An embedded in-memory database, used by tests and local runs.
    pub fn in_memory() -> Self {
        Self {
            url: "mem://".into(),
            credentials: None,
            ..Self::default()
        }
    }
}

/// Manages a connection to SurrealDB.
#[derive(Clone)]
pub struct DbManager {
    db: Surreal<Any>,
}

impl DbManager {
    /// Connect to SurrealDB using the provided configuration.
    ///
    /// Authenticates as root when credentials are configured, selects the
    /// namespace and database, and returns a ready-to-use manager.
    pub async fn connect(config: &DbConfig) -> Result<Self, surrealdb::Error> {
        info!(
            url = %config.url,
            namespace = %config.namespace,
            database = %config.database,
            "Connecting to SurrealDB"
        );

        let db = any::connect(config.url.as_str()).await?;

        if let Some(credentials) = &config.credentials {
            db.signin(Root {
                username: credentials.username.clone(),
                password: credentials.password.clone(),
            })
            .await?;
        }

        db.use_ns(&config.namespace)
            .use_db(&config.database)
            .await?;

        info!("Successfully connected to SurrealDB");

        Ok(Self { db })
    }

    /// Returns a reference to the underlying SurrealDB client.
    pub fn client(&self) -> &Surreal<Any> {
        &self.db
    }

    /// Liveness probe against the database.
    pub async fn ping(&self) -> bool {
        self.db.health().await.is_ok()
    }
}
