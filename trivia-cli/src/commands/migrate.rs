//! Schema migration command

use anyhow::{Context, Result};
use clap::Parser;

use trivia_server::db;

use crate::config::require_database_url;

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// Database URL (overrides environment)
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Skip seeding default categories into an empty database
    #[arg(long)]
    pub no_seed: bool,
}

/// Create the trivia tables (idempotent)
pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    let database_url = require_database_url(args.database_url)?;
    let pool = db::create_pool(&database_url)
        .await
        .context("Failed to create database pool")?;

    db::migrations::run(&pool, !args.no_seed)
        .await
        .context("Failed to run migrations")?;

    pool.close().await;
    Ok(())
}
