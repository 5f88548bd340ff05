//! Presence checks shared by the form-backed services.

use domains::{DomainError, Result};

/// Returns the trimmed value, or a validation error naming the field.
pub(crate) fn require(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::ValidationError(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

/// Trims optional text and collapses blanks to `None`.
pub(crate) fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_trims() {
        assert_eq!(require("title", "  Hello ").unwrap(), "Hello");
        assert!(matches!(
            require("title", "   "),
            Err(DomainError::ValidationError(msg)) if msg == "title is required"
        ));
    }

    #[test]
    fn test_clean_drops_blanks() {
        assert_eq!(clean(Some("  ".into())), None);
        assert_eq!(clean(Some(" tech ".into())), Some("tech".into()));
        assert_eq!(clean(None), None);
    }
}
