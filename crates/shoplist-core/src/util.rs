//! Shared utility functions used across multiple modules.

/// Trim a borrowed string, returning `None` when nothing is left.
pub fn non_empty_trimmed(value: &str) -> Option<&str> {
    let value = value.trim();
    (!value.is_empty()).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_empty_trimmed_borrows_inner_text() {
        assert_eq!(non_empty_trimmed("  Milk\t"), Some("Milk"));
        assert_eq!(non_empty_trimmed("Dairy"), Some("Dairy"));
    }

    #[test]
    fn non_empty_trimmed_rejects_blank() {
        assert_eq!(non_empty_trimmed(""), None);
        assert_eq!(non_empty_trimmed(" \n "), None);
    }
}
