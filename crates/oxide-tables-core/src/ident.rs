//! Identifier validation.
//!
//! Table and column names cannot be bound as parameters, so they end up
//! concatenated into the SQL text. Every identifier must pass
//! [`validate_identifier`] before that happens; this is the only thing
//! standing between a request body and the statement.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{CoreError, Result};

/// The wildcard column selector.
pub const WILDCARD: &str = "*";

/// Keywords that are never accepted as identifiers (compared case-insensitively).
pub const RESERVED_KEYWORDS: &[&str] = &[
    "select",
    "insert",
    "update",
    "delete",
    "drop",
    "create",
    "alter",
    "union",
    "exec",
    "execute",
    "script",
    "declare",
    "cast",
    "convert",
    "information_schema",
    "sys",
    "master",
    "msdb",
    "tempdb",
];

/// Substrings associated with injection attempts.
pub const INJECTION_PATTERNS: &[&str] = &["'", "\"", ";", "--", "/*", "*/", "xp_", "sp_", "@@"];

static IDENTIFIER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern"));

/// Validates a column identifier. The wildcard `*` is accepted.
///
/// Rules are applied in order: non-empty, wildcard short-circuit, the
/// `[A-Za-z_][A-Za-z0-9_]*` shape, the reserved keyword list, and finally
/// the injection substring list.
///
/// # Errors
///
/// Returns [`CoreError::InvalidIdentifier`] naming the offending string.
pub fn validate_identifier(identifier: &str) -> Result<()> {
    if identifier.is_empty() {
        return Err(CoreError::invalid_identifier(identifier, "must not be empty"));
    }

    if identifier == WILDCARD {
        return Ok(());
    }

    if !IDENTIFIER_PATTERN.is_match(identifier) {
        return Err(CoreError::invalid_identifier(
            identifier,
            "must start with a letter or underscore and contain only letters, digits and underscores",
        ));
    }

    let lower = identifier.to_lowercase();
    if RESERVED_KEYWORDS.contains(&lower.as_str()) {
        return Err(CoreError::invalid_identifier(identifier, "reserved keyword"));
    }

    if INJECTION_PATTERNS.iter().any(|p| lower.contains(p)) {
        return Err(CoreError::invalid_identifier(
            identifier,
            "contains a forbidden character sequence",
        ));
    }

    Ok(())
}

/// Validates a table name: same rules as columns, minus the wildcard.
///
/// # Errors
///
/// Returns [`CoreError::InvalidIdentifier`] if the name is unsafe.
pub fn validate_table_name(name: &str) -> Result<()> {
    if name == WILDCARD {
        return Err(CoreError::invalid_identifier(
            name,
            "wildcard is not a table name",
        ));
    }
    validate_identifier(name)
}

/// Returns whether `identifier` is the wildcard selector.
#[must_use]
pub fn is_wildcard(identifier: &str) -> bool {
    identifier == WILDCARD
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejected(identifier: &str) -> bool {
        matches!(
            validate_identifier(identifier),
            Err(CoreError::InvalidIdentifier { .. })
        )
    }

    #[test]
    fn test_accepts_plain_identifiers() {
        for ok in ["id", "title", "_private", "created_at", "Col9", "selected"] {
            assert!(validate_identifier(ok).is_ok(), "{ok} should be accepted");
        }
    }

    #[test]
    fn test_accepts_wildcard() {
        assert!(validate_identifier("*").is_ok());
    }

    #[test]
    fn test_rejects_empty_and_whitespace() {
        assert!(rejected(""));
        assert!(rejected(" "));
        assert!(rejected(" name"));
    }

    #[test]
    fn test_rejects_bad_shape() {
        assert!(rejected("1col"));
        assert!(rejected("col-name"));
        assert!(rejected("name;"));
        assert!(rejected("a b"));
        assert!(rejected("**"));
    }

    #[test]
    fn test_rejects_reserved_keywords_any_case() {
        assert!(rejected("select"));
        assert!(rejected("DROP"));
        assert!(rejected("Information_Schema"));
    }

    #[test]
    fn test_rejects_injection_substrings() {
        assert!(rejected("xp_cmdshell"));
        assert!(rejected("my_sp_proc"));
        assert!(rejected("SP_who"));
    }

    #[test]
    fn test_error_names_identifier() {
        let err = validate_identifier("drop").unwrap_err();
        assert!(err.to_string().contains("'drop'"));
    }

    #[test]
    fn test_table_name_rejects_wildcard() {
        assert!(validate_table_name("*").is_err());
        assert!(validate_table_name("posts").is_ok());
    }
}
