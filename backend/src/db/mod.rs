//! Database connection and pool management
//!
//! Connections are handed out per request from a shared pool and
//! returned to it when the request's handle is dropped.

use crate::config::DatabaseConfig;
use anyhow::{Context, Result};
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

/// Pool sizing and timeouts
pub struct PoolConfig {
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_connections: 10,
            min_connections: 1,
            acquire_timeout_secs: 30,
            idle_timeout_secs: 600,      // 10 minutes
            max_lifetime_secs: 1800,     // 30 minutes
        }
    }
}

/// Build connection options from configuration
///
/// A full `url` wins; otherwise the options are assembled from the parts,
/// so credentials never need URL escaping.
pub fn connect_options(config: &DatabaseConfig) -> Result<PgConnectOptions> {
    let options = match &config.url {
        Some(url) => PgConnectOptions::from_str(url).context("Invalid DATABASE_URL")?,
        None => {
            let (host, port) = split_host_port(&config.server)?;
            let options = PgConnectOptions::new()
                .host(host)
                .username(&config.user)
                .password(&config.password)
                .database(&config.name);
            match port {
                Some(port) => options.port(port),
                None => options,
            }
        }
    };

    Ok(options.application_name("cookbook"))
}

/// Split `host[:port]`
fn split_host_port(server: &str) -> Result<(&str, Option<u16>)> {
    match server.rsplit_once(':') {
        Some((host, port)) if !host.is_empty() => {
            let port = port
                .parse::<u16>()
                .with_context(|| format!("Invalid port in POSTGRES_SERVER: {}", server))?;
            Ok((host, Some(port)))
        }
        _ => Ok((server, None)),
    }
}

/// Create a PostgreSQL connection pool from application configuration
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool> {
    let pool_config = PoolConfig {
        max_connections: config.max_connections,
        ..Default::default()
    };
    create_pool_with_config(connect_options(config)?, &pool_config).await
}

/// Create a PostgreSQL connection pool with custom pool settings
pub async fn create_pool_with_config(
    connect_options: PgConnectOptions,
    config: &PoolConfig,
) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(config.max_lifetime_secs))
        // Ping connections before handing them out
        .test_before_acquire(true)
        .connect_with(connect_options)
        .await?;

    info!(
        "Database pool created: max={}, min={}",
        config.max_connections, config.min_connections
    );

    Ok(pool)
}

/// Run database migrations
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("Database migrations completed successfully");
    Ok(())
}

/// Check database health
pub async fn health_check(pool: &PgPool) -> Result<()> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .map(|_| ())
        .map_err(|e| {
            warn!("Database health check failed: {}", e);
            e.into()
        })
}
