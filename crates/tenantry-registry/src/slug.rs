//! Display-name normalization.

use tenantry_core::error::{TenantryError, TenantryResult};

/// Shortest accepted display name, in characters, after trimming.
pub const MIN_DISPLAY_NAME_LEN: usize = 3;
/// Longest accepted display name, in characters, after trimming.
pub const MAX_DISPLAY_NAME_LEN: usize = 50;

const SEPARATOR: char = '-';

/// Derive a URL-safe slug from a display name.
///
/// Non-ASCII characters are transliterated to their closest ASCII form,
/// letters are lower-cased and every run of other characters collapses to
/// a single `-`. Leading and trailing separators are dropped.
pub fn slugify(display_name: &str) -> TenantryResult<String> {
    let ascii = deunicode::deunicode(display_name);

    let mut slug = String::with_capacity(ascii.len());
    let mut pending_separator = false;
    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push(SEPARATOR);
            }
            pending_separator = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_separator = true;
        }
    }

    if slug.is_empty() {
        return Err(TenantryError::invalid_name(format!(
            "'{display_name}' contains no letters or digits"
        )));
    }
    Ok(slug)
}

/// Check a display name's length and return it trimmed.
pub fn validate_display_name(display_name: &str) -> TenantryResult<String> {
    let trimmed = display_name.trim();
    let len = trimmed.chars().count();
    if !(MIN_DISPLAY_NAME_LEN..=MAX_DISPLAY_NAME_LEN).contains(&len) {
        return Err(TenantryError::invalid_name(format!(
            "must be between {MIN_DISPLAY_NAME_LEN} and {MAX_DISPLAY_NAME_LEN} characters"
        )));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn punctuation_and_case() {
        assert_eq!(slugify("Acme Inc.").unwrap(), "acme-inc");
        assert_eq!(slugify("Acme Inc").unwrap(), "acme-inc");
        assert_eq!(slugify("  --Hello,   World!!  ").unwrap(), "hello-world");
        assert_eq!(slugify("R&D_Team 42").unwrap(), "r-d-team-42");
    }

    #[test]
    fn transliterates_non_ascii() {
        assert_eq!(slugify("Café Müller").unwrap(), "cafe-muller");
        assert_eq!(slugify("Łódź Ltd").unwrap(), "lodz-ltd");
    }

    #[test]
    fn idempotent() {
        for name in ["Acme Inc.", "Café Müller", "a--b", "  X  Y  Z ", "Org #7"] {
            let once = slugify(name).unwrap();
            assert_eq!(slugify(&once).unwrap(), once, "input: {name}");
        }
    }

    #[test]
    fn deterministic() {
        assert_eq!(slugify("Globex Corp").unwrap(), slugify("Globex Corp").unwrap());
    }

    #[test]
    fn symbol_only_input_is_invalid() {
        for name in ["!!!", "   ", "", "-_-"] {
            let err = slugify(name).unwrap_err();
            assert!(matches!(err, TenantryError::InvalidName { .. }), "input: {name:?}");
        }
    }

    #[test]
    fn display_name_length_bounds() {
        assert_eq!(validate_display_name("  Acme  ").unwrap(), "Acme");
        assert!(validate_display_name("ab").is_err());
        assert!(validate_display_name(&"x".repeat(50)).is_ok());
        assert!(validate_display_name(&"x".repeat(51)).is_err());
        // Counted in characters, not bytes.
        assert!(validate_display_name("äöü").is_ok());
    }
}
