//! Tenantry Registry — slug generation, collection naming and the
//! organization lifecycle.

pub mod config;
pub mod naming;
pub mod service;
pub mod slug;

pub use config::RegistryConfig;
pub use naming::CollectionNameResolver;
pub use service::{CreateOrganizationRequest, OrganizationRegistry};
pub use slug::{slugify, validate_display_name};
