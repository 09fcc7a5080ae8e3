//! Logical column types and their SQLite spelling.

use std::fmt;

/// Abstract column types accepted in table descriptors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalType {
    /// Free text.
    Text,
    /// Boolean stored as 0/1.
    Bool,
    /// Numeric affinity (integer or decimal).
    Numeric,
    /// 64-bit integer.
    Integer,
    /// Double precision float.
    Real,
    /// Raw bytes.
    Blob,
    /// Calendar date.
    Date,
    /// Date and time.
    DateTime,
    /// Time of day.
    Time,
    /// Timestamp.
    Timestamp,
}

impl LogicalType {
    /// All logical types, in wire-key order.
    pub const ALL: [Self; 10] = [
        Self::Text,
        Self::Bool,
        Self::Numeric,
        Self::Integer,
        Self::Real,
        Self::Blob,
        Self::Date,
        Self::DateTime,
        Self::Time,
        Self::Timestamp,
    ];

    /// Parses a wire key such as `txt` or `int`. Long spellings are aliases.
    ///
    /// Returns `None` for unknown keys; callers must treat that as fatal.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "txt" | "text" => Some(Self::Text),
            "bool" | "boolean" => Some(Self::Bool),
            "num" | "numeric" => Some(Self::Numeric),
            "int" | "integer" => Some(Self::Integer),
            "real" => Some(Self::Real),
            "data" | "blob" => Some(Self::Blob),
            "date" => Some(Self::Date),
            "datetime" => Some(Self::DateTime),
            "time" => Some(Self::Time),
            "timestamp" => Some(Self::Timestamp),
            _ => None,
        }
    }

    /// The canonical wire key.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Bool => "bool",
            Self::Numeric => "num",
            Self::Integer => "int",
            Self::Real => "real",
            Self::Blob => "data",
            Self::Date => "date",
            Self::DateTime => "datetime",
            Self::Time => "time",
            Self::Timestamp => "timestamp",
        }
    }

    /// The SQLite column type keyword.
    #[must_use]
    pub const fn sqlite_name(self) -> &'static str {
        match self {
            Self::Text => "TEXT",
            Self::Bool => "BOOLEAN",
            Self::Numeric => "NUMERIC",
            Self::Integer => "INTEGER",
            Self::Real => "REAL",
            Self::Blob => "BLOB",
            Self::Date => "DATE",
            Self::DateTime => "DATETIME",
            Self::Time => "TIME",
            Self::Timestamp => "TIMESTAMP",
        }
    }
}

impl fmt::Display for LogicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Maps a logical type key straight to its native keyword.
#[must_use]
pub fn native_type(key: &str) -> Option<&'static str> {
    LogicalType::from_key(key).map(LogicalType::sqlite_name)
}

/// Whether a native type is one of the textual variants.
///
/// SQLite type names are case-insensitive and may carry a length, e.g.
/// `varchar(36)`.
#[must_use]
pub fn is_textual(native: &str) -> bool {
    let upper = native.trim().to_ascii_uppercase();
    let base = upper.split('(').next().unwrap_or_default().trim();
    matches!(base, "TEXT" | "VARCHAR" | "CHAR")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_key_maps() {
        for ty in LogicalType::ALL {
            assert_eq!(LogicalType::from_key(ty.key()), Some(ty));
        }
    }

    #[test]
    fn test_native_names() {
        assert_eq!(native_type("txt"), Some("TEXT"));
        assert_eq!(native_type("int"), Some("INTEGER"));
        assert_eq!(native_type("data"), Some("BLOB"));
        assert_eq!(native_type("TIMESTAMP"), Some("TIMESTAMP"));
    }

    #[test]
    fn test_unknown_key() {
        assert_eq!(native_type("uuid"), None);
        assert_eq!(native_type(""), None);
    }

    #[test]
    fn test_is_textual() {
        assert!(is_textual("TEXT"));
        assert!(is_textual("varchar(36)"));
        assert!(is_textual("Char"));
        assert!(!is_textual("INTEGER"));
        assert!(!is_textual("TEXTUAL"));
    }
}
