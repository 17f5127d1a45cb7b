//! Validated table identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Error type for table name validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidTableName {
    /// The name is empty.
    Empty,
    /// The name contains characters outside `[a-z0-9_]`.
    InvalidCharacters { name: String },
    /// The name exceeds the maximum length.
    TooLong { length: usize },
}

impl fmt::Display for InvalidTableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "table name cannot be empty"),
            Self::InvalidCharacters { name } => write!(
                f,
                "table name '{name}' may only contain lowercase letters, digits, and underscores"
            ),
            Self::TooLong { length } => write!(
                f,
                "table name is {length} characters (limit: {})",
                TableName::MAX_LENGTH
            ),
        }
    }
}

impl std::error::Error for InvalidTableName {}

/// Name of one logical table in the configured dataset.
///
/// Table names double as archive member stems (`<table>.csv`) and as
/// identifiers passed to the store collaborator, so they are restricted to
/// `[a-z0-9_]`, nothing that could smuggle a path separator into an archive
/// entry name.
///
/// ## Validation
///
/// ```
/// use tablevault_core::TableName;
///
/// assert!(TableName::parse("sale_returns").is_ok());
/// assert!(TableName::parse("").is_err());
/// assert!(TableName::parse("Sales").is_err());
/// assert!(TableName::parse("../etc").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableName(String);

impl TableName {
    /// Maximum table name length.
    pub const MAX_LENGTH: usize = 64;

    /// Parse and validate a table name from a string.
    pub fn parse(name: impl AsRef<str>) -> Result<Self, InvalidTableName> {
        let s = name.as_ref();

        if s.is_empty() {
            return Err(InvalidTableName::Empty);
        }

        if s.len() > Self::MAX_LENGTH {
            return Err(InvalidTableName::TooLong { length: s.len() });
        }

        if !s
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
        {
            return Err(InvalidTableName::InvalidCharacters {
                name: s.to_string(),
            });
        }

        Ok(Self(s.to_string()))
    }

    /// Get the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for TableName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_lowercase_names_with_underscores_and_digits() {
        for name in ["sales", "sale_returns", "app_users", "t2"] {
            assert!(TableName::parse(name).is_ok(), "expected '{name}' valid");
        }
    }

    #[test]
    fn rejects_empty_name() {
        assert_eq!(TableName::parse(""), Err(InvalidTableName::Empty));
    }

    #[test]
    fn rejects_uppercase_whitespace_and_path_characters() {
        for name in ["Sales", "sa les", "sales/", "..", "sales.csv"] {
            assert!(
                matches!(
                    TableName::parse(name),
                    Err(InvalidTableName::InvalidCharacters { .. })
                ),
                "expected '{name}' rejected"
            );
        }
    }

    #[test]
    fn rejects_overlong_name() {
        let name = "a".repeat(TableName::MAX_LENGTH + 1);
        assert!(matches!(
            TableName::parse(&name),
            Err(InvalidTableName::TooLong { .. })
        ));
    }
}
