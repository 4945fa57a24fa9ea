//! Input validation shared by the registry and the auth gateway.

/// Trim and lower-case an email so lookups and the uniqueness index see a
/// single canonical form.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Syntactic email check.
pub fn is_valid_email(email: &str) -> bool {
    validator::validate_email(email)
}
