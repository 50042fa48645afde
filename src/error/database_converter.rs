use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

use crate::error::{AppError, ConstraintParser};

/// Converts Diesel errors into structured [`AppError`] variants.
///
/// Constraint violations are parsed into `Duplicate` or `Validation` so that
/// callers can react to them by entity and field; anything unrecognised is
/// wrapped as `Database` with the failing operation attached.
pub struct DatabaseErrorConverter;

impl DatabaseErrorConverter {
    /// Converts a Diesel error to an appropriate AppError variant.
    ///
    /// # Arguments
    /// * `error` - The Diesel error to convert
    /// * `operation` - Description of the database operation that failed
    pub fn convert_diesel_error(error: DieselError, operation: &str) -> AppError {
        match error {
            DieselError::DatabaseError(kind, info) => {
                Self::convert_database_error(kind, info.as_ref(), operation)
            }
            DieselError::NotFound => AppError::NotFound {
                entity: "resource".to_string(),
                field: "id".to_string(),
                value: "unknown".to_string(),
            },
            other => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::from(other),
            },
        }
    }

    fn convert_database_error(
        kind: DatabaseErrorKind,
        info: &(dyn DatabaseErrorInformation + Send + Sync),
        operation: &str,
    ) -> AppError {
        let message = info.message();
        let constraint_name = info.constraint_name();

        let converted = match kind {
            DatabaseErrorKind::UniqueViolation => {
                ConstraintParser::parse_unique_violation(message, constraint_name).map(
                    |(entity, field, value)| AppError::Duplicate {
                        entity,
                        field,
                        value,
                    },
                )
            }
            DatabaseErrorKind::NotNullViolation => {
                ConstraintParser::parse_not_null_violation(message, constraint_name).map(
                    |(entity, field)| AppError::Validation {
                        field,
                        reason: format!("Field is required for {}", entity),
                    },
                )
            }
            DatabaseErrorKind::ForeignKeyViolation => {
                ConstraintParser::parse_foreign_key_violation(message, constraint_name).map(
                    |(entity, field, value)| AppError::Validation {
                        field,
                        reason: format!("Invalid reference from {} with value '{}'", entity, value),
                    },
                )
            }
            DatabaseErrorKind::CheckViolation => {
                ConstraintParser::parse_check_violation(message, constraint_name).map(
                    |(entity, field)| AppError::Validation {
                        field,
                        reason: format!("Check constraint failed for {} field", entity),
                    },
                )
            }
            _ => None,
        };

        converted.unwrap_or_else(|| AppError::Database {
            operation: operation.to_string(),
            source: anyhow::anyhow!("{:?}: {}", kind, message),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeErrorInfo {
        message: String,
        constraint_name: Option<String>,
    }

    impl DatabaseErrorInformation for FakeErrorInfo {
        fn message(&self) -> &str {
            &self.message
        }

        fn details(&self) -> Option<&str> {
            None
        }

        fn hint(&self) -> Option<&str> {
            None
        }

        fn table_name(&self) -> Option<&str> {
            None
        }

        fn column_name(&self) -> Option<&str> {
            None
        }

        fn constraint_name(&self) -> Option<&str> {
            self.constraint_name.as_deref()
        }

        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn db_error(kind: DatabaseErrorKind, message: &str, constraint: Option<&str>) -> DieselError {
        DieselError::DatabaseError(
            kind,
            Box::new(FakeErrorInfo {
                message: message.to_string(),
                constraint_name: constraint.map(str::to_string),
            }),
        )
    }

    #[test]
    fn test_convert_not_found_error() {
        let result = DatabaseErrorConverter::convert_diesel_error(DieselError::NotFound, "find color");
        assert!(matches!(result, AppError::NotFound { entity, .. } if entity == "resource"));
    }

    #[test]
    fn test_convert_hex_unique_violation() {
        let error = db_error(
            DatabaseErrorKind::UniqueViolation,
            "duplicate key value violates unique constraint \"colors_hex_key\"\nDETAIL: Key (hex)=(ff0000) already exists.",
            Some("colors_hex_key"),
        );

        match DatabaseErrorConverter::convert_diesel_error(error, "insert color") {
            AppError::Duplicate {
                entity,
                field,
                value,
            } => {
                assert_eq!(entity, "colors");
                assert_eq!(field, "hex");
                assert_eq!(value, "ff0000");
            }
            other => panic!("Expected Duplicate error, got: {:?}", other),
        }
    }

    #[test]
    fn test_convert_not_null_violation() {
        let error = db_error(
            DatabaseErrorKind::NotNullViolation,
            "null value in column \"hex\" of relation \"colors\" violates not-null constraint",
            None,
        );

        match DatabaseErrorConverter::convert_diesel_error(error, "insert color") {
            AppError::Validation { field, reason } => {
                assert_eq!(field, "hex");
                assert!(reason.contains("required"));
            }
            other => panic!("Expected Validation error, got: {:?}", other),
        }
    }

    #[test]
    fn test_convert_foreign_key_violation() {
        let error = db_error(
            DatabaseErrorKind::ForeignKeyViolation,
            "insert or update on table \"colors\" violates foreign key constraint \"colors_author_id_fkey\"\nDETAIL: Key (author_id)=(999) is not present in table \"users\".",
            Some("colors_author_id_fkey"),
        );

        match DatabaseErrorConverter::convert_diesel_error(error, "insert color") {
            AppError::Validation { field, reason } => {
                assert_eq!(field, "author_id");
                assert!(reason.contains("999"));
            }
            other => panic!("Expected Validation error, got: {:?}", other),
        }
    }

    #[test]
    fn test_unparseable_violation_falls_back_to_database() {
        let error = db_error(DatabaseErrorKind::UniqueViolation, "something odd", None);

        match DatabaseErrorConverter::convert_diesel_error(error, "insert color") {
            AppError::Database { operation, .. } => assert_eq!(operation, "insert color"),
            other => panic!("Expected Database error, got: {:?}", other),
        }
    }
}
