//! Storage namespace types.

use serde::{Deserialize, Serialize};

/// Prefix applied to every physical tenant table so that tenant
/// namespaces can never shadow the registry's own tables.
pub const NAMESPACE_TABLE_PREFIX: &str = "org_";

/// A physical storage namespace returned by a
/// [`NamespaceAllocator`](crate::repository::NamespaceAllocator).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceHandle {
    /// Logical collection name as stored on the organization.
    pub name: String,
    /// Physical table name in the backing store.
    pub table: String,
}

impl NamespaceHandle {
    pub fn for_collection(name: &str) -> Self {
        Self {
            name: name.to_string(),
            table: format!("{NAMESPACE_TABLE_PREFIX}{name}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn physical_table_is_prefixed() {
        let handle = NamespaceHandle::for_collection("acme-inc-2");
        assert_eq!(handle.name, "acme-inc-2");
        assert_eq!(handle.table, "org_acme-inc-2");
    }

    #[test]
    fn prefixed_table_cannot_collide_with_registry_tables() {
        for reserved in ["organization", "admin", "namespace_reservation", "_migration"] {
            let handle = NamespaceHandle::for_collection(reserved);
            assert_ne!(handle.table, reserved);
        }
    }
}
