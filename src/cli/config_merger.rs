//! Configuration merger for CLI arguments and config files
//!
//! CLI arguments take precedence over every file and environment source.

use std::path::Path;

use super::parser::{Cli, Commands};
use crate::config::error::ConfigError;
use crate::config::{ConfigLoader, Environment, settings::Settings};

/// Applies CLI argument overrides on top of file-based configuration.
pub struct ConfigurationMerger {
    base_config: Settings,
}

impl ConfigurationMerger {
    pub fn new(base_config: Settings) -> Self {
        Self { base_config }
    }

    /// Loads the base configuration, honouring `--config` and `--env`.
    ///
    /// # Errors
    /// Returns ConfigError if configuration loading or validation fails
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        Self::load(cli.config.as_deref(), cli.env.map(Environment::from))
    }

    fn load(
        config_path: Option<&Path>,
        environment: Option<Environment>,
    ) -> Result<Self, ConfigError> {
        let mut loader = ConfigLoader::new()?;
        if let Some(path) = config_path {
            loader = loader.with_config_file(path);
        }
        if let Some(environment) = environment {
            loader = loader.with_environment(environment);
        }

        Ok(Self::new(loader.load()?))
    }

    /// Merge CLI arguments with the base configuration and validate the result.
    ///
    /// A serve `--log-level` wins over `--verbose` and `--quiet`.
    pub fn merge_cli_args(&self, cli: &Cli) -> Result<Settings, ConfigError> {
        let mut config = self.base_config.clone();

        if cli.verbose {
            config.logger.level = "debug".to_string();
        } else if cli.quiet {
            config.logger.level = "error".to_string();
        }

        if let Some(Commands::Serve {
            host,
            port,
            log_level,
            ..
        }) = &cli.command
        {
            if let Some(host) = host {
                config.server.host = host.clone();
            }
            if let Some(port) = port {
                config.server.port = *port;
            }
            if let Some(level) = log_level {
                config.logger.level = level.as_str().to_string();
            }
        }

        config.validate()?;

        Ok(config)
    }

    pub fn config(&self) -> &Settings {
        &self.base_config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::NamedTempFile;

    fn create_valid_base_config() -> Settings {
        let mut config = Settings::default();
        config.database.url = "postgres://localhost/test".to_string();
        config.jwt.secret = "merger_test_secret_with_at_least_32_chars".to_string();
        config
    }

    fn merge(args: &[&str]) -> Result<Settings, ConfigError> {
        let cli = Cli::try_parse_from(args).unwrap();
        ConfigurationMerger::new(create_valid_base_config()).merge_cli_args(&cli)
    }

    #[test]
    fn test_configuration_merger_new() {
        let base_config = create_valid_base_config();
        let merger = ConfigurationMerger::new(base_config.clone());
        assert_eq!(merger.config(), &base_config);
    }

    #[test]
    fn test_verbose_and_quiet_flags() {
        assert_eq!(merge(&["color-service", "--verbose"]).unwrap().logger.level, "debug");
        assert_eq!(merge(&["color-service", "--quiet"]).unwrap().logger.level, "error");
    }

    #[test]
    fn test_serve_host_and_port() {
        let merged =
            merge(&["color-service", "serve", "--host", "0.0.0.0", "--port", "8080"]).unwrap();
        assert_eq!(merged.server.address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_command_log_level_overrides_global() {
        let merged =
            merge(&["color-service", "--verbose", "serve", "--log-level", "warn"]).unwrap();
        assert_eq!(merged.logger.level, "warn");
    }

    #[test]
    fn test_merge_validates_result() {
        let cli = Cli::try_parse_from(["color-service", "serve"]).unwrap();
        let result = ConfigurationMerger::new(Settings::default()).merge_cli_args(&cli);
        assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
    }

    #[test]
    fn test_load_from_explicit_file() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(
            file.path(),
            r#"
[server]
port = 4321

[database]
url = "postgres://file/colors"

[jwt]
secret = "file_based_secret_with_at_least_32_chars"
"#,
        )
        .unwrap();

        let _lock = crate::config::loader::ENV_TEST_MUTEX.lock().unwrap();
        let merger = ConfigurationMerger::load(Some(file.path()), None).unwrap();
        assert_eq!(merger.config().server.port, 4321);
        assert_eq!(merger.config().database.url, "postgres://file/colors");
    }
}
