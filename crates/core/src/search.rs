//! Free-text search helpers shared by every list view.
//!
//! Matching is a trimmed, case-insensitive substring test over one or more
//! designated fields of a record. A blank query matches everything.

/// Normalize a raw search box value.
///
/// Returns `None` when the input is empty or whitespace-only, which callers
/// treat as "no search constraint".
pub fn normalize_query(query: &str) -> Option<String> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Check whether any of `fields` contains `query` (case-insensitive).
///
/// # Examples
///
/// ```
/// use medclinic_core::search::matches_any;
/// assert!(matches_any("ana", &["Ana Souza", "Cardiologia"]));
/// assert!(matches_any("  ", &["anything"]));
/// assert!(!matches_any("pedro", &["Ana Souza"]));
/// ```
pub fn matches_any(query: &str, fields: &[&str]) -> bool {
    match normalize_query(query) {
        None => true,
        Some(needle) => matches_normalized(&needle, fields),
    }
}

/// Like [`matches_any`] but for a query already passed through
/// [`normalize_query`]. Avoids re-lowercasing the needle per record.
pub fn matches_normalized(needle: &str, fields: &[&str]) -> bool {
    fields
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- normalize_query -----------------------------------------------------

    #[test]
    fn normalize_trims_and_lowercases() {
        assert_eq!(normalize_query("  Maria "), Some("maria".to_string()));
    }

    #[test]
    fn normalize_blank_returns_none() {
        assert_eq!(normalize_query(""), None);
        assert_eq!(normalize_query(" \t "), None);
    }

    // -- matches_any ---------------------------------------------------------

    #[test]
    fn matches_case_insensitively() {
        assert!(matches_any("SOUZA", &["Ana Souza"]));
        assert!(matches_any("souza", &["ANA SOUZA"]));
    }

    #[test]
    fn matches_substring_in_second_field() {
        assert!(matches_any("cardio", &["Ana Souza", "Cardiologia"]));
    }

    #[test]
    fn no_match_in_any_field() {
        assert!(!matches_any("derma", &["Ana Souza", "Cardiologia"]));
    }

    #[test]
    fn blank_query_matches_everything() {
        assert!(matches_any("", &["Ana Souza"]));
        assert!(matches_any("   ", &[]));
    }

    #[test]
    fn non_blank_query_with_no_fields_never_matches() {
        assert!(!matches_any("ana", &[]));
    }

    #[test]
    fn matches_accented_text() {
        assert!(matches_any("joão", &["JOÃO Pereira"]));
    }
}
