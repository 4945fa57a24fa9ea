//! Collection-name candidates and resolution.
//!
//! A slug maps to the candidate sequence `slug`, `slug-2`, `slug-3`, …
//! The first candidate not yet reserved becomes the collection name.
//! Resolution only proposes; the storage transaction has the final say.

use tenantry_core::error::{TenantryError, TenantryResult};

/// The `n`-th candidate for a slug (1-based).
pub fn candidate_name(slug: &str, n: u32) -> String {
    if n <= 1 {
        slug.to_string()
    } else {
        format!("{slug}-{n}")
    }
}

/// Proposes collection names for a slug, up to a fixed number of tries.
#[derive(Debug, Clone, Copy)]
pub struct CollectionNameResolver {
    max_attempts: u32,
}

impl Default for CollectionNameResolver {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_ATTEMPTS)
    }
}

impl CollectionNameResolver {
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 1000;

    /// A cap of zero is raised to one so the bare slug is always tried.
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Candidate names in the order they are tried.
    pub fn candidates<'a>(&self, slug: &'a str) -> impl Iterator<Item = String> + Send + 'a {
        (1..=self.max_attempts).map(move |n| candidate_name(slug, n))
    }

    /// Return the first candidate for which `is_taken` is false.
    pub fn resolve_collection_name(
        &self,
        slug: &str,
        is_taken: impl Fn(&str) -> bool,
    ) -> TenantryResult<String> {
        self.candidates(slug)
            .find(|candidate| !is_taken(candidate))
            .ok_or_else(|| self.exhausted(slug))
    }

    pub fn exhausted(&self, slug: &str) -> TenantryError {
        TenantryError::NamespaceExhausted {
            slug: slug.to_string(),
            attempts: self.max_attempts,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn free_slug_is_used_as_is() {
        let resolver = CollectionNameResolver::default();
        let name = resolver.resolve_collection_name("acme", |_| false).unwrap();
        assert_eq!(name, "acme");
    }

    #[test]
    fn taken_names_get_numeric_suffix() {
        let resolver = CollectionNameResolver::default();
        let taken: HashSet<&str> = ["acme", "acme-2", "acme-3"].into();

        let name = resolver
            .resolve_collection_name("acme", |c| taken.contains(c))
            .unwrap();
        assert_eq!(name, "acme-4");
    }

    #[test]
    fn candidate_sequence() {
        let resolver = CollectionNameResolver::new(4);
        let names: Vec<String> = resolver.candidates("acme-inc").collect();
        assert_eq!(names, ["acme-inc", "acme-inc-2", "acme-inc-3", "acme-inc-4"]);
    }

    #[test]
    fn cap_bounds_the_search() {
        let resolver = CollectionNameResolver::new(3);
        let err = resolver
            .resolve_collection_name("acme", |_| true)
            .unwrap_err();

        match err {
            TenantryError::NamespaceExhausted { slug, attempts } => {
                assert_eq!(slug, "acme");
                assert_eq!(attempts, 3);
            }
            other => panic!("expected NamespaceExhausted, got: {other:?}"),
        }
    }

    #[test]
    fn zero_cap_still_tries_bare_slug() {
        let resolver = CollectionNameResolver::new(0);
        assert_eq!(resolver.max_attempts(), 1);
        assert_eq!(resolver.resolve_collection_name("acme", |_| false).unwrap(), "acme");
    }
}
