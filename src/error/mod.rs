mod app_error;
mod color_error;
mod constraint_parser;
mod database_converter;

pub use app_error::{AppError, AppResult, ValidationFieldError};
pub use color_error::{ColorError, ColorKey};
pub use constraint_parser::ConstraintParser;
pub use database_converter::DatabaseErrorConverter;
