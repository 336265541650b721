//! Configuration management for the CookBook backend
//!
//! Configuration is loaded hierarchically:
//! 1. Default values (in code)
//! 2. TOML config files (config/development.toml or config/production.toml)
//! 3. Environment variables (prefix: COOKBOOK__)
//! 4. Plain deployment variables (POSTGRES_USER, DATABASE_URL, CORS_ORIGINS, ...)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub api: ApiConfig,
    #[serde(default)]
    pub cors: CorsConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Database configuration
///
/// `url`, when set, takes precedence over the individual parts.
#[derive(Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub user: String,
    pub password: String,
    /// Host, optionally with `:port`
    pub server: String,
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    pub max_connections: u32,
}

/// API surface configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Path prefix the recipe routes are mounted under
    pub prefix: String,
    /// Display name used in the welcome message
    pub project_name: String,
}

/// Cross-origin configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated list of allowed origins
    #[serde(default)]
    pub origins: String,
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("user", &self.user)
            .field("password", &"[redacted]")
            .field("server", &self.server)
            .field("name", &self.name)
            .field("url", &self.url.as_ref().map(|_| "[redacted]"))
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8000,
            },
            database: DatabaseConfig {
                user: "postgres".to_string(),
                password: "postgres".to_string(),
                server: "localhost".to_string(),
                name: "cookbook".to_string(),
                url: None,
                max_connections: 10,
            },
            api: ApiConfig {
                prefix: "/v1".to_string(),
                project_name: "CookBook API".to_string(),
            },
            cors: CorsConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from files and environment
    ///
    /// Loading order (later sources override earlier):
    /// 1. Default values
    /// 2. Config file based on RUST_ENV (development.toml or production.toml)
    /// 3. Environment variables with COOKBOOK__ prefix
    /// 4. POSTGRES_USER, POSTGRES_PASSWORD, POSTGRES_SERVER, POSTGRES_DB,
    ///    DATABASE_URL, CORS_ORIGINS, API_V1_STR, PROJECT_NAME
    pub fn load() -> Result<Self> {
        let env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
        let config_file = format!("config/{}.toml", env);

        let config = config::Config::builder()
            // Start with defaults
            .add_source(config::Config::try_from(&AppConfig::default())?)
            // Load from environment-specific config file
            .add_source(config::File::with_name(&config_file).required(false))
            // e.g., COOKBOOK__SERVER__PORT=9000 sets server.port
            .add_source(config::Environment::with_prefix("COOKBOOK").separator("__"))
            .set_override_option("database.user", env_var("POSTGRES_USER"))?
            .set_override_option("database.password", env_var("POSTGRES_PASSWORD"))?
            .set_override_option("database.server", env_var("POSTGRES_SERVER"))?
            .set_override_option("database.name", env_var("POSTGRES_DB"))?
            .set_override_option("database.url", env_var("DATABASE_URL"))?
            .set_override_option("cors.origins", env_var("CORS_ORIGINS"))?
            .set_override_option("api.prefix", env_var("API_V1_STR"))?
            .set_override_option("api.project_name", env_var("PROJECT_NAME"))?
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Check if running in production mode
    pub fn is_production() -> bool {
        env::var("RUST_ENV")
            .map(|v| v == "production")
            .unwrap_or(false)
    }
}

impl ApiConfig {
    /// Prefix with a leading slash and no trailing slash; empty means root
    pub fn normalized_prefix(&self) -> String {
        let trimmed = self.prefix.trim().trim_matches('/');
        if trimmed.is_empty() {
            String::new()
        } else {
            format!("/{}", trimmed)
        }
    }
}

impl CorsConfig {
    /// Parse the comma-separated origin list, dropping blanks
    pub fn allowed_origins(&self) -> Vec<String> {
        self.origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Read a variable, treating unset and empty the same
fn env_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}
