//! Serve command handler
//!
//! Handles the serve command including dry-run validation and server startup.

use crate::config::settings::Settings;
use crate::error::AppResult;
use crate::server::Server;

/// Handler for the serve command
pub struct ServeCommandHandler {
    config: Settings,
}

impl ServeCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Execute the serve command with optional dry-run support
    ///
    /// # Arguments
    /// * `dry_run` - If true, validates configuration and exits without starting server
    ///
    /// # Errors
    /// - Configuration validation errors
    /// - Server startup errors (if not dry-run)
    pub async fn execute(self, dry_run: bool) -> AppResult<()> {
        self.config.validate()?;

        if dry_run {
            self.report_dry_run();
            return Ok(());
        }

        Server::new(self.config).run().await?;
        Ok(())
    }

    fn report_dry_run(&self) {
        let logger = &self.config.logger;

        println!("✓ Configuration is valid");
        println!("✓ Server would bind to: {}", self.config.server.address());
        println!(
            "✓ Database pool: {}..{} connections, auto_migrate={}",
            self.config.database.min_connections,
            self.config.database.max_connections,
            self.config.database.auto_migrate
        );
        println!(
            "✓ Logger: level={}, console={}, file={}",
            logger.level, logger.console.enabled, logger.file.enabled
        );
        println!("Dry run completed successfully - configuration is ready for deployment");
    }

    pub fn config(&self) -> &Settings {
        &self.config
    }
}
