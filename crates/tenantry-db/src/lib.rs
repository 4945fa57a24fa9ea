//! Tenantry Database — SurrealDB connection management, schema
//! migrations, and storage implementations of the `tenantry-core`
//! traits.
//!
//! This crate provides:
//! - Connection management ([`DbManager`], [`DbConfig`])
//! - Schema initialization and migrations ([`run_migrations`])
//! - The organization registry store ([`repository::SurrealOrganizationRepository`])
//! - Per-tenant namespace allocation ([`repository::SurrealNamespaceAllocator`])
//! - Error types ([`DbError`])

mod connection;
mod error;
pub mod repository;
mod schema;

pub use connection::{DbConfig, DbCredentials, DbManager};
pub use error::DbError;
pub use schema::run_migrations;
