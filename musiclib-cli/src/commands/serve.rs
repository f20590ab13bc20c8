//! HTTP server command for the song catalog
//!
//! Connects to Postgres, optionally migrates, wires the catalog service
//! with its logging decorators and serves until Ctrl+C / SIGTERM.

use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use musiclib_server::config::{parse_bind_addr, parse_duration};
use musiclib_server::db::{create_pool, migrations, MigrateAction};
use musiclib_server::enrichment::client::DEFAULT_LOOKUP_TIMEOUT;
use musiclib_server::http::{run_server, ServerConfig};
use musiclib_server::{
    Catalog, CatalogService, HttpMetadataClient, SongRepo, TracedCatalog, TracedLookup,
    TracedStore,
};

use crate::config::DatabaseArgs;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to: host:port, :port or port
    #[arg(long, short = 'b', env = "BIND_ADDR", default_value = "127.0.0.1:8080", value_parser = parse_bind_addr)]
    pub bind: SocketAddr,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long, env = "CORS_PERMISSIVE")]
    pub cors_permissive: bool,

    /// Base URL of the song metadata service (queried at {url}/info)
    #[arg(long, env = "EXTERNAL_API_URL")]
    pub external_api_url: String,

    /// Deadline for each catalog operation (e.g. 30, 30s, 500ms)
    #[arg(long, env = "REQUEST_TIMEOUT", default_value = "30s", value_parser = parse_duration)]
    pub request_timeout: Duration,

    /// Time allowed to drain requests and close the pool on shutdown
    #[arg(long, env = "SHUTDOWN_GRACE", default_value = "10s", value_parser = parse_duration)]
    pub shutdown_grace: Duration,

    /// Schema action before serving: up, down, or anything else to skip
    #[arg(long, env = "MIGRATE", default_value = "none")]
    pub migrate: MigrateAction,

    #[command(flatten)]
    pub db: DatabaseArgs,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let pool_config = args.db.pool_config()?;

    let pool = create_pool(&pool_config)
        .await
        .context("Failed to create database pool")?;

    migrations::apply(&pool, args.migrate)
        .await
        .with_context(|| format!("Failed to run migration action {:?}", args.migrate))?;

    let lookup_timeout = args.request_timeout.min(DEFAULT_LOOKUP_TIMEOUT);
    let lookup = HttpMetadataClient::new(&args.external_api_url, lookup_timeout)
        .context("Invalid EXTERNAL_API_URL")?;

    let service = CatalogService::new(
        TracedStore::new(SongRepo::new(pool.clone())),
        TracedLookup::new(lookup),
    )
    .with_deadline(args.request_timeout);
    let catalog: Arc<dyn Catalog> = Arc::new(TracedCatalog::new(service));

    let config = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: args.cors_permissive,
        shutdown_grace: args.shutdown_grace,
    };

    tracing::info!(
        bind = %config.bind_addr,
        metadata = %args.external_api_url,
        request_timeout_ms = args.request_timeout.as_millis() as u64,
        "Starting musiclib server"
    );

    // Blocks until shutdown; closes the pool before returning
    run_server(config, catalog, pool)
        .await
        .context("Server error")?;

    Ok(())
}
