//! HTTP server command
//!
//! Runs the todo API on PostgreSQL, or on the in-memory store with `--memory`.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use todoctl_core::{MemoryStore, Store};
use todoctl_server::db::{schema, PgStore, PoolConfig};
use todoctl_server::{run_server, ServerConfig};

use crate::config::AppConfig;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (default: [server] bind, 127.0.0.1:3000)
    #[arg(long, short = 'b')]
    pub bind: Option<SocketAddr>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Database URL (overrides config/environment)
    #[arg(long)]
    pub database_url: Option<String>,

    /// Maximum pooled database connections
    #[arg(long)]
    pub max_connections: Option<u32>,

    /// Keep data in memory instead of PostgreSQL (lost on exit)
    #[arg(long, conflicts_with = "database_url")]
    pub memory: bool,
}

/// Resolve the pool settings from flags over config.
pub(crate) fn pool_config(
    config: &AppConfig,
    database_url: Option<String>,
    max_connections: Option<u32>,
) -> Result<PoolConfig> {
    let url = database_url
        .or_else(|| config.database.url.clone())
        .context("DATABASE_URL not set. Set via --database-url, DATABASE_URL env, .env, or [database] url in config")?;

    Ok(PoolConfig {
        url,
        max_connections: max_connections.unwrap_or(config.database.max_connections),
    })
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs, config: AppConfig) -> Result<()> {
    let server_config = ServerConfig {
        bind_addr: args.bind.unwrap_or(config.server.bind),
        cors_permissive: args.cors_permissive || config.server.cors_permissive,
    };

    let store: Arc<dyn Store> = if args.memory {
        tracing::warn!("Using in-memory store - data is lost on shutdown");
        Arc::new(MemoryStore::new())
    } else {
        let pool_config = pool_config(&config, args.database_url, args.max_connections)?;
        let pool = pool_config
            .connect()
            .await
            .context("Failed to create database pool")?;

        schema::ensure(&pool)
            .await
            .context("Failed to create todo schema")?;

        Arc::new(PgStore::new(pool))
    };

    tracing::info!("Starting todoctl server on {}", server_config.bind_addr);

    // Blocks until shutdown
    run_server(store, server_config)
        .await
        .context("Server error")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_url_beats_config() {
        let mut config = AppConfig::default();
        config.database.url = Some("postgres://config/db".into());

        let pool = pool_config(&config, Some("postgres://flag/db".into()), Some(2)).unwrap();
        assert_eq!(pool.url, "postgres://flag/db");
        assert_eq!(pool.max_connections, 2);
    }

    #[test]
    fn missing_url_is_error() {
        let err = pool_config(&AppConfig::default(), None, None).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL not set"));
    }
}
