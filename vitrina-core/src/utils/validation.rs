//! Input validation helpers
//!
//! Text length constants and the field checks used by the product form.

use shared::CatalogError;

// ── Text length limits ──────────────────────────────────────────────

/// Product and category names
pub const MAX_NAME_LEN: usize = 200;

/// Product descriptions
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// Image URLs
pub const MAX_URL_LEN: usize = 2048;

// ── Validation helpers ──────────────────────────────────────────────

/// Required string: non-empty after trim and within the length limit.
/// Returns the trimmed value.
pub fn validate_required_text<'a>(
    value: &'a str,
    field: &str,
    max_len: usize,
) -> Result<&'a str, CatalogError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CatalogError::missing(field));
    }
    validate_max_chars(trimmed, field, max_len)
}

/// Optional string: only the length limit applies.
pub fn validate_optional_text<'a>(
    value: &'a str,
    field: &str,
    max_len: usize,
) -> Result<&'a str, CatalogError> {
    validate_max_chars(value.trim(), field, max_len)
}

/// Length limit in characters, not bytes
pub fn validate_max_chars<'a>(
    value: &'a str,
    field: &str,
    max_len: usize,
) -> Result<&'a str, CatalogError> {
    let len = value.chars().count();
    if len > max_len {
        return Err(CatalogError::invalid(
            field,
            format!("{field} is too long ({len} chars, max {max_len})"),
        ));
    }
    Ok(value)
}
