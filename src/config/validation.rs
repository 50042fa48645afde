//! Configuration validation logic
//!
//! This module provides validation methods for all configuration structures
//! to ensure configuration values are within acceptable ranges and formats.

use crate::config::error::ConfigError;
use crate::config::settings::{
    DatabaseConfig, FileSettings, JwtConfig, LoggerSettings, ServerConfig, Settings,
};

/// Valid log levels
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Valid log formats
const VALID_LOG_FORMATS: &[&str] = &["full", "compact", "json"];

/// Minimum length of the JWT signing secret
const MIN_JWT_SECRET_LEN: usize = 32;

impl ServerConfig {
    /// Validate server configuration
    ///
    /// # Validation Rules
    /// - Port must be between 1 and 65535
    /// - Request timeout must be greater than 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::validation(
                "server.port",
                "Port must be between 1 and 65535. Please specify a valid port number.",
            ));
        }

        if self.request_timeout == 0 {
            return Err(ConfigError::validation(
                "server.request_timeout",
                "Request timeout must be greater than 0 seconds.",
            ));
        }

        Ok(())
    }
}

impl DatabaseConfig {
    /// Validate database configuration
    ///
    /// # Validation Rules
    /// - URL must be a PostgreSQL connection string
    /// - Min connections must be between 1 and max connections
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.url.is_empty() {
            return Err(ConfigError::validation(
                "database.url",
                "Database URL is required. Please specify a valid database connection string.",
            ));
        }

        if !self.url.starts_with("postgres://") && !self.url.starts_with("postgresql://") {
            return Err(ConfigError::validation(
                "database.url",
                "Invalid database URL format. Expected format: postgres://[user:password@]host[:port]/database",
            ));
        }

        if self.max_connections == 0 {
            return Err(ConfigError::validation(
                "database.max_connections",
                "Max connections must be greater than 0.",
            ));
        }

        if self.min_connections == 0 {
            return Err(ConfigError::validation(
                "database.min_connections",
                "Min connections must be greater than 0.",
            ));
        }

        if self.min_connections > self.max_connections {
            return Err(ConfigError::validation(
                "database.min_connections",
                format!(
                    "Min connections ({}) cannot exceed max connections ({}).",
                    self.min_connections, self.max_connections
                ),
            ));
        }

        Ok(())
    }
}

impl JwtConfig {
    /// Validate JWT configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.secret.len() < MIN_JWT_SECRET_LEN {
            return Err(ConfigError::validation(
                "jwt.secret",
                format!(
                    "JWT secret must be at least {} characters. Set it with COLOR_JWT__SECRET.",
                    MIN_JWT_SECRET_LEN
                ),
            ));
        }

        if self.access_token_expiration <= 0 {
            return Err(ConfigError::validation(
                "jwt.access_token_expiration",
                "Access token expiration must be greater than 0 hours.",
            ));
        }

        if self.refresh_token_expiration <= self.access_token_expiration {
            return Err(ConfigError::validation(
                "jwt.refresh_token_expiration",
                "Refresh token expiration must be longer than access token expiration.",
            ));
        }

        Ok(())
    }
}

impl FileSettings {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.enabled && self.path.trim().is_empty() {
            return Err(ConfigError::validation(
                "logger.file.path",
                "File path is required when file logging is enabled.",
            ));
        }

        if !VALID_LOG_FORMATS.contains(&self.format.to_lowercase().as_str()) {
            return Err(ConfigError::validation(
                "logger.file.format",
                format!(
                    "Invalid log format '{}'. Valid formats are: {}",
                    self.format,
                    VALID_LOG_FORMATS.join(", ")
                ),
            ));
        }

        Ok(())
    }
}

impl LoggerSettings {
    /// Validate logger settings
    ///
    /// # Validation Rules
    /// - Level must be one of trace, debug, info, warn, error
    /// - At least one output must be enabled
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !VALID_LOG_LEVELS.contains(&self.level.to_lowercase().as_str()) {
            return Err(ConfigError::validation(
                "logger.level",
                format!(
                    "Invalid log level '{}'. Valid levels are: {}",
                    self.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            ));
        }

        if !self.console.enabled && !self.file.enabled {
            return Err(ConfigError::validation(
                "logger",
                "At least one output (console or file) must be enabled.",
            ));
        }

        self.file.validate()
    }
}

impl Settings {
    /// Validate all configuration sections
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.database.validate()?;
        self.jwt.validate()?;
        self.logger.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_settings() -> Settings {
        let mut settings = Settings::default();
        settings.database.url = "postgres://localhost/colors".to_string();
        settings.jwt.secret = "a".repeat(MIN_JWT_SECRET_LEN);
        settings
    }

    fn field_of(err: ConfigError) -> String {
        match err {
            ConfigError::ValidationError { field, .. } => field,
            other => panic!("Expected ValidationError, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_settings() {
        assert!(valid_settings().validate().is_ok());
    }

    #[test]
    fn test_server_port_zero() {
        let mut settings = valid_settings();
        settings.server.port = 0;
        assert_eq!(field_of(settings.validate().unwrap_err()), "server.port");
    }

    #[test]
    fn test_database_url_required() {
        let mut settings = valid_settings();
        settings.database.url.clear();
        assert_eq!(field_of(settings.validate().unwrap_err()), "database.url");
    }

    #[test]
    fn test_database_url_must_be_postgres() {
        let mut settings = valid_settings();
        settings.database.url = "mysql://localhost/colors".to_string();
        assert_eq!(field_of(settings.validate().unwrap_err()), "database.url");

        settings.database.url = "postgresql://localhost/colors".to_string();
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_min_connections_exceeds_max() {
        let mut settings = valid_settings();
        settings.database.min_connections = 20;
        assert_eq!(
            field_of(settings.validate().unwrap_err()),
            "database.min_connections"
        );
    }

    #[test]
    fn test_jwt_secret_too_short() {
        let mut settings = valid_settings();
        settings.jwt.secret = "short".to_string();
        assert_eq!(field_of(settings.validate().unwrap_err()), "jwt.secret");
    }

    #[test]
    fn test_refresh_must_outlive_access() {
        let mut settings = valid_settings();
        settings.jwt.refresh_token_expiration = settings.jwt.access_token_expiration;
        assert_eq!(
            field_of(settings.validate().unwrap_err()),
            "jwt.refresh_token_expiration"
        );
    }

    #[test]
    fn test_logger_level_and_outputs() {
        let mut settings = valid_settings();
        settings.logger.level = "WARN".to_string();
        assert!(settings.validate().is_ok());

        settings.logger.level = "loud".to_string();
        assert_eq!(field_of(settings.validate().unwrap_err()), "logger.level");

        settings.logger.level = "info".to_string();
        settings.logger.console.enabled = false;
        assert_eq!(field_of(settings.validate().unwrap_err()), "logger");
    }

    #[test]
    fn test_enabled_file_logging_needs_path() {
        let mut settings = valid_settings();
        settings.logger.file.enabled = true;
        settings.logger.file.path = "  ".to_string();
        assert_eq!(
            field_of(settings.validate().unwrap_err()),
            "logger.file.path"
        );
    }
}
