//! HTTP server command for the trivia API

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use trivia_server::db::{self, MemoryStore, PgStore, QuestionStore};
use trivia_server::http::{run_server, ServerConfig};
use trivia_server::Catalog;

use crate::config::require_database_url;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', default_value = "127.0.0.1:5000", env = "TRIVIA_BIND")]
    pub bind: SocketAddr,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Database URL (overrides environment)
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Maximum pooled database connections
    #[arg(long, default_value_t = db::DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,

    /// Request timeout in seconds
    #[arg(long, default_value = "30")]
    pub timeout: u64,

    /// Serve from an in-memory store with the default categories (ignores the database URL)
    #[arg(long)]
    pub in_memory: bool,

    /// Skip seeding default categories into an empty database
    #[arg(long)]
    pub no_seed: bool,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let store: Arc<dyn QuestionStore> = if args.in_memory {
        tracing::warn!("Serving from in-memory store; data is lost on shutdown");
        Arc::new(MemoryStore::with_default_categories())
    } else {
        let database_url = require_database_url(args.database_url)?;
        let pool = db::create_pool_with_options(&database_url, args.max_connections)
            .await
            .context("Failed to create database pool")?;

        db::migrations::run(&pool, !args.no_seed)
            .await
            .context("Failed to run migrations")?;

        Arc::new(PgStore::new(pool))
    };

    let config = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: args.cors_permissive,
        request_timeout: Duration::from_secs(args.timeout.max(1)),
    };

    tracing::info!("Starting trivia server on {}", config.bind_addr);

    // Run server (blocks until shutdown)
    run_server(Catalog::new(store), config)
        .await
        .context("Server error")?;

    Ok(())
}
