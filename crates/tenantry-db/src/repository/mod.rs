//! SurrealDB repository implementations.

mod namespace;
mod organization;

pub use namespace::SurrealNamespaceAllocator;
pub use organization::SurrealOrganizationRepository;
