//! Command-line and environment configuration for the server binary.

use clap::{Parser, ValueEnum};
use std::net::SocketAddr;
use thiserror::Error;

/// Storage backend selected at start-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StoreBackend {
    /// Process-local store; contents are lost on restart.
    Memory,
    /// PostgreSQL through a Diesel connection pool.
    Postgres,
}

/// Todo service - REST API for todos and their steps
#[derive(Debug, Clone, Parser)]
#[command(name = "todo-server", version)]
pub struct ServerConfig {
    /// Socket address the HTTP listener binds to
    #[arg(long, env = "TODO_BIND", default_value = "127.0.0.1:8080")]
    pub bind: SocketAddr,

    /// Storage backend
    #[arg(long, env = "TODO_STORE", value_enum, default_value_t = StoreBackend::Memory)]
    pub store: StoreBackend,

    /// PostgreSQL connection URL, required with `--store postgres`
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Maximum number of pooled database connections
    #[arg(long, env = "TODO_POOL_SIZE", default_value_t = 4)]
    pub pool_size: u32,

    /// Log filter directive, overridden by `RUST_LOG`
    #[arg(long, env = "TODO_LOG")]
    pub log_filter: Option<String>,
}

/// Inconsistent configuration detected after parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The PostgreSQL backend was selected without a database URL.
    #[error("--database-url (or DATABASE_URL) is required when --store is postgres")]
    MissingDatabaseUrl,
    /// The pool was configured with no connections.
    #[error("--pool-size must be at least 1")]
    EmptyPool,
}

impl ServerConfig {
    /// Checks option combinations that clap cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the configuration cannot start a server.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pool_size == 0 {
            return Err(ConfigError::EmptyPool);
        }
        if self.store == StoreBackend::Postgres
            && self.database_url.as_deref().is_none_or(|url| url.trim().is_empty())
        {
            return Err(ConfigError::MissingDatabaseUrl);
        }
        Ok(())
    }
}
