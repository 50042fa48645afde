use std::sync::LazyLock;

use regex::Regex;

/// Utility for parsing PostgreSQL constraint violation messages.
///
/// Constraint names follow the PostgreSQL defaults (`colors_hex_key`,
/// `colors_author_id_fkey`, `users_email_key`), so the table and column can
/// usually be read straight off the name. The message text is the fallback.
pub struct ConstraintParser;

// "Key (hex)=(ff0000) already exists."
static KEY_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Key \(([^)]+)\)=\(([^)]*)\)").expect("valid key/value regex"));

static COLUMN_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"column "([^"]+)""#).expect("valid column regex"));

// Matches both `table "x"` and `relation "x"`.
static TABLE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?:table|relation) "([^"]+)""#).expect("valid table regex"));

const CONSTRAINT_SUFFIXES: [&str; 5] = ["_pkey", "_fkey", "_key", "_check", "_idx"];

impl ConstraintParser {
    /// Parses a unique constraint violation.
    ///
    /// # Returns
    /// `(entity, field, value)` when the table and column can be determined
    ///
    /// # Examples
    /// ```
    /// use color_service::error::ConstraintParser;
    ///
    /// let message = "duplicate key value violates unique constraint \"colors_hex_key\"\nDETAIL: Key (hex)=(ff0000) already exists.";
    /// let result = ConstraintParser::parse_unique_violation(message, Some("colors_hex_key"));
    /// assert_eq!(result, Some(("colors".to_string(), "hex".to_string(), "ff0000".to_string())));
    /// ```
    pub fn parse_unique_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String, String)> {
        let key_value = Self::extract_key_value_from_message(message);

        if let Some((entity, field)) = constraint_name.and_then(Self::parse_constraint_name) {
            let value = key_value
                .map(|(_, value)| value)
                .unwrap_or_else(|| "duplicate_value".to_string());
            return Some((entity, field, value));
        }

        let (field, value) = key_value?;
        let entity =
            Self::extract_table_from_message(message).unwrap_or_else(|| "resource".to_string());
        Some((entity, field, value))
    }

    /// Parses a not-null violation into `(entity, field)`.
    pub fn parse_not_null_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String)> {
        let field = Self::extract_column_from_message(message)?;
        let entity = Self::extract_table_from_message(message)
            .or_else(|| constraint_name.and_then(Self::parse_constraint_name).map(|(e, _)| e))
            .unwrap_or_else(|| "resource".to_string());
        Some((entity, field))
    }

    /// Parses a foreign key violation into `(entity, field, referenced_value)`.
    pub fn parse_foreign_key_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String, String)> {
        let key_value = Self::extract_key_value_from_message(message);

        if let Some((entity, field)) = constraint_name.and_then(Self::parse_constraint_name) {
            let value = key_value
                .map(|(_, value)| value)
                .unwrap_or_else(|| "invalid_reference".to_string());
            return Some((entity, field, value));
        }

        let (field, value) = key_value?;
        let entity =
            Self::extract_table_from_message(message).unwrap_or_else(|| "resource".to_string());
        Some((entity, field, value))
    }

    /// Parses a check violation into `(entity, field)`.
    pub fn parse_check_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String)> {
        if let Some(parsed) = constraint_name.and_then(Self::parse_constraint_name) {
            return Some(parsed);
        }

        let field = Self::extract_column_from_message(message)?;
        let entity =
            Self::extract_table_from_message(message).unwrap_or_else(|| "resource".to_string());
        Some((entity, field))
    }

    /// Splits a default-named constraint into `(table, column)`.
    ///
    /// - `colors_hex_key` -> `("colors", "hex")`
    /// - `colors_author_id_fkey` -> `("colors", "author_id")`
    /// - `users_email_key` -> `("users", "email")`
    pub fn parse_constraint_name(constraint_name: &str) -> Option<(String, String)> {
        let stem = CONSTRAINT_SUFFIXES
            .iter()
            .find_map(|suffix| constraint_name.strip_suffix(suffix))?;
        let (entity, field) = stem.split_once('_')?;
        if entity.is_empty() || field.is_empty() {
            return None;
        }
        Some((entity.to_string(), field.to_string()))
    }

    pub fn extract_column_from_message(message: &str) -> Option<String> {
        COLUMN_NAME
            .captures(message)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }

    pub fn extract_table_from_message(message: &str) -> Option<String> {
        TABLE_NAME
            .captures(message)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }

    /// Extracts `(field, value)` from the `Key (field)=(value)` detail line.
    pub fn extract_key_value_from_message(message: &str) -> Option<(String, String)> {
        KEY_VALUE.captures(message).and_then(|caps| {
            let field = caps.get(1)?.as_str().to_string();
            let value = caps.get(2)?.as_str().to_string();
            Some((field, value))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEX_DUPLICATE: &str = "duplicate key value violates unique constraint \"colors_hex_key\"\nDETAIL: Key (hex)=(ff0000) already exists.";

    #[test]
    fn test_parse_unique_violation_with_constraint_name() {
        let result = ConstraintParser::parse_unique_violation(HEX_DUPLICATE, Some("colors_hex_key"));
        assert_eq!(
            result,
            Some(("colors".to_string(), "hex".to_string(), "ff0000".to_string()))
        );
    }

    #[test]
    fn test_parse_unique_violation_without_constraint_name() {
        let message = "duplicate key value violates unique constraint\nDETAIL: Key (username)=(john_doe) already exists.";
        let result = ConstraintParser::parse_unique_violation(message, None);
        assert_eq!(
            result,
            Some(("resource".to_string(), "username".to_string(), "john_doe".to_string()))
        );
    }

    #[test]
    fn test_parse_unique_violation_without_detail() {
        let result = ConstraintParser::parse_unique_violation(
            "duplicate key value violates unique constraint \"users_email_key\"",
            Some("users_email_key"),
        );
        assert_eq!(
            result,
            Some(("users".to_string(), "email".to_string(), "duplicate_value".to_string()))
        );
    }

    #[test]
    fn test_parse_not_null_violation_with_relation() {
        let message = "null value in column \"hex\" of relation \"colors\" violates not-null constraint";
        let result = ConstraintParser::parse_not_null_violation(message, None);
        assert_eq!(result, Some(("colors".to_string(), "hex".to_string())));
    }

    #[test]
    fn test_parse_foreign_key_violation() {
        let message = "insert or update on table \"colors\" violates foreign key constraint \"colors_author_id_fkey\"\nDETAIL: Key (author_id)=(999) is not present in table \"users\".";
        let result =
            ConstraintParser::parse_foreign_key_violation(message, Some("colors_author_id_fkey"));
        assert_eq!(
            result,
            Some(("colors".to_string(), "author_id".to_string(), "999".to_string()))
        );
    }

    #[test]
    fn test_parse_check_violation() {
        let message = "new row for relation \"colors\" violates check constraint \"colors_description_check\"";
        let result =
            ConstraintParser::parse_check_violation(message, Some("colors_description_check"));
        assert_eq!(result, Some(("colors".to_string(), "description".to_string())));
    }

    #[test]
    fn test_parse_constraint_name() {
        assert_eq!(
            ConstraintParser::parse_constraint_name("colors_hex_key"),
            Some(("colors".to_string(), "hex".to_string()))
        );
        assert_eq!(
            ConstraintParser::parse_constraint_name("colors_author_id_fkey"),
            Some(("colors".to_string(), "author_id".to_string()))
        );
        assert_eq!(ConstraintParser::parse_constraint_name("invalid"), None);
        assert_eq!(ConstraintParser::parse_constraint_name("_key"), None);
    }

    #[test]
    fn test_extract_table_from_message() {
        let message = "insert or update on table \"colors\" violates foreign key constraint";
        assert_eq!(
            ConstraintParser::extract_table_from_message(message),
            Some("colors".to_string())
        );
        assert_eq!(ConstraintParser::extract_table_from_message("no table here"), None);
    }

    #[test]
    fn test_graceful_parsing_failures() {
        let message = "completely unrelated error message";
        assert_eq!(ConstraintParser::parse_unique_violation(message, None), None);
        assert_eq!(ConstraintParser::parse_not_null_violation(message, None), None);
        assert_eq!(ConstraintParser::parse_foreign_key_violation(message, None), None);
        assert_eq!(ConstraintParser::parse_check_violation(message, None), None);
    }
}
