//! Application state management
//!
//! This module provides the shared application state that is passed
//! to all request handlers via Axum's state extraction.
//!
//! The state is built once at startup and is read-only afterwards.

use crate::config::AppConfig;
use crate::error::ApiError;
use sqlx::pool::PoolConnection;
use sqlx::{PgPool, Postgres};
use std::sync::Arc;

/// Shared application state
///
/// All fields are cheap to clone: `PgPool` is internally reference
/// counted and the configuration sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,
    /// Application configuration
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Create a new application state
    pub fn new(db: PgPool, config: AppConfig) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// Get a reference to the database pool
    #[inline]
    pub fn db(&self) -> &PgPool {
        &self.db
    }

    /// Get a reference to the configuration
    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Check out one connection for the current request
    ///
    /// The connection goes back to the pool when the returned handle is
    /// dropped, on success and error paths alike.
    pub async fn acquire(&self) -> Result<PoolConnection<Postgres>, ApiError> {
        Ok(self.db.acquire().await?)
    }
}
