//! Configuration loading: `.env` files and database connection settings

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use musiclib_server::config::PostgresParts;
use musiclib_server::db::pool::{DEFAULT_ACQUIRE_TIMEOUT, DEFAULT_MAX_CONNECTIONS};
use musiclib_server::PoolConfig;

/// Load environment variables from .env files in multiple locations
///
/// Priority order (highest to lowest):
/// 1. Environment variables already set
/// 2. Current directory .env
/// 3. ~/.musiclib/.env
///
/// Runs before tracing is initialized, so the files that were loaded are
/// returned for the caller to log.
pub fn load_dotenv() -> Vec<PathBuf> {
    let mut loaded_from = Vec::new();

    if let Ok(path) = dotenvy::dotenv() {
        loaded_from.push(path);
    }

    if let Some(env_file) = config_dir().map(|dir| dir.join(".env")) {
        // dotenvy never overwrites variables that are already set
        if env_file.exists() && dotenvy::from_path(&env_file).is_ok() {
            loaded_from.push(env_file);
        }
    }

    loaded_from
}

/// Get the musiclib config directory path (~/.musiclib)
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".musiclib"))
}

/// Database connection arguments shared by every command that needs a pool
#[derive(Args, Debug, Clone)]
pub struct DatabaseArgs {
    /// Full connection string; takes precedence over the POSTGRES_* parts
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Database host
    #[arg(long, env = "POSTGRES_HOST")]
    pub postgres_host: Option<String>,

    /// Database port (default: 5432)
    #[arg(long, env = "POSTGRES_PORT")]
    pub postgres_port: Option<u16>,

    /// Database user
    #[arg(long, env = "POSTGRES_USER")]
    pub postgres_user: Option<String>,

    /// Database password
    #[arg(long, env = "POSTGRES_PASSWORD", hide_env_values = true)]
    pub postgres_password: Option<String>,

    /// Database name
    #[arg(long, env = "POSTGRES_NAME")]
    pub postgres_name: Option<String>,

    /// Maximum pooled connections
    #[arg(long, env = "DB_MAX_CONNECTIONS", default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub db_max_connections: u32,
}

impl DatabaseArgs {
    /// DATABASE_URL if given, else assembled from the POSTGRES_* parts.
    pub fn database_url(&self) -> Result<String> {
        if let Some(url) = &self.database_url {
            return Ok(url.clone());
        }

        let parts = PostgresParts {
            host: self.postgres_host.clone(),
            port: self.postgres_port,
            user: self.postgres_user.clone(),
            password: self.postgres_password.clone(),
            name: self.postgres_name.clone(),
        };
        parts.to_url().context(
            "Database not configured. Set --database-url, DATABASE_URL, or POSTGRES_* in ~/.musiclib/.env",
        )
    }

    pub fn pool_config(&self) -> Result<PoolConfig> {
        Ok(PoolConfig {
            database_url: self.database_url()?,
            max_connections: self.db_max_connections,
            acquire_timeout: DEFAULT_ACQUIRE_TIMEOUT,
        })
    }
}
