//! Registry configuration.

/// Configuration for the organization registry.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Maximum number of collection-name candidates tried per create
    /// (default: 1000).
    pub max_namespace_attempts: u32,
    /// Minimum admin password length in characters (default: 8).
    pub min_password_length: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            max_namespace_attempts: 1000,
            min_password_length: 8,
        }
    }
}
