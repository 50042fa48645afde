//! Migrate command handler
//!
//! Handles database migration operations including dry-run and rollback.

use crate::config::settings::Settings;
use crate::db::migrate::{pending_migrations, revert_migrations, run_pending_migrations};
use crate::error::AppResult;

/// Handler for the migrate command
pub struct MigrateCommandHandler {
    config: Settings,
}

impl MigrateCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Execute the migrate command with dry-run and rollback support
    ///
    /// # Arguments
    /// * `dry_run` - If true, shows pending migrations without applying them
    /// * `rollback` - Optional number of migrations to rollback
    ///
    /// # Errors
    /// - Database connection errors
    /// - Migration execution errors
    /// - Configuration validation errors
    pub async fn execute(&self, dry_run: bool, rollback: Option<u32>) -> AppResult<()> {
        self.config.database.validate()?;

        let url = self.config.database.url.as_str();
        match (dry_run, rollback) {
            (true, _) => self.show_pending_migrations(url).await,
            (false, Some(steps)) => self.rollback_migrations(url, steps).await,
            (false, None) => self.run_migrations(url).await,
        }
    }

    async fn show_pending_migrations(&self, url: &str) -> AppResult<()> {
        println!("Checking for pending migrations...");

        let pending = pending_migrations(url).await?;
        if pending.is_empty() {
            println!("✓ No pending migrations found - database is up to date");
        } else {
            println!("Found {} pending migration(s):", pending.len());
            for name in &pending {
                println!("  - {}", name);
            }
            println!("\nRun without --dry-run to apply these migrations");
        }

        Ok(())
    }

    async fn run_migrations(&self, url: &str) -> AppResult<()> {
        println!("Running database migrations...");

        let applied = run_pending_migrations(url).await?;
        if applied.is_empty() {
            println!("✓ No migrations to apply - database is already up to date");
        } else {
            println!("✓ Applied {} migration(s):", applied.len());
            for version in &applied {
                println!("  - {}", version);
            }
            tracing::info!(count = applied.len(), "Database migration completed");
        }

        Ok(())
    }

    async fn rollback_migrations(&self, url: &str, steps: u32) -> AppResult<()> {
        println!("Rolling back {} migration(s)...", steps);

        let reverted = revert_migrations(url, steps).await?;
        for version in &reverted {
            println!("  - reverted {}", version);
        }
        println!("✓ Rolled back {} migration(s)", reverted.len());

        Ok(())
    }

    pub fn config(&self) -> &Settings {
        &self.config
    }
}
