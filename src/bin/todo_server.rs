//! HTTP server exposing the todo service.

use clap::Parser;
use diesel::{
    PgConnection,
    r2d2::{ConnectionManager, Pool},
};
use eyre::{Result, WrapErr, eyre};
use std::{io, sync::Arc, time::Duration};
use todo_service::{
    config::{ServerConfig, StoreBackend},
    http::router,
    telemetry,
    todo::{
        adapters::{
            memory::InMemoryTodoRepository,
            postgres::{PostgresTodoRepository, TodoPgPool},
        },
        services::TodoService,
    },
};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServerConfig::parse();
    telemetry::init(config.log_filter.as_deref())?;
    config.validate()?;

    let app = match config.store {
        StoreBackend::Memory => {
            info!("using in-memory store");
            router(TodoService::new(Arc::new(InMemoryTodoRepository::new())))
        }
        StoreBackend::Postgres => {
            let repository = connect_postgres(&config).await?;
            router(TodoService::new(Arc::new(repository)))
        }
    };

    let listener = TcpListener::bind(config.bind)
        .await
        .wrap_err_with(|| format!("failed to bind {}", config.bind))?;
    info!(addr = %config.bind, "todo server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .wrap_err("server terminated unexpectedly")?;

    info!("todo server stopped");
    Ok(())
}

/// How long start-up waits for the pool's first connections.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

async fn connect_postgres(config: &ServerConfig) -> Result<PostgresTodoRepository> {
    let url = config
        .database_url
        .as_deref()
        .ok_or_else(|| eyre!("database URL missing"))?;
    let pool = build_pool(url, config.pool_size, CONNECT_TIMEOUT).await?;
    let repository = PostgresTodoRepository::new(pool);
    repository
        .migrate()
        .await
        .wrap_err("failed to apply schema")?;
    info!(pool_size = config.pool_size, "using PostgreSQL store");
    Ok(repository)
}

/// Builds the pool off the runtime; r2d2 opens its first connections
/// synchronously.
async fn build_pool(url: &str, size: u32, connection_timeout: Duration) -> Result<TodoPgPool> {
    let manager = ConnectionManager::<PgConnection>::new(url);
    tokio::task::spawn_blocking(move || {
        Pool::builder()
            .max_size(size)
            .connection_timeout(connection_timeout)
            .build(manager)
    })
    .await
    .wrap_err("pool construction task failed")?
    .wrap_err("failed to build PostgreSQL pool")
}

async fn shutdown_signal() {
    wait_for_shutdown(tokio::signal::ctrl_c()).await;
}

/// Resolves when `signal` fires. A signal that cannot be installed never
/// resolves, so the server keeps running instead of stopping at once.
async fn wait_for_shutdown(signal: impl Future<Output = io::Result<()>>) {
    if let Err(err) = signal.await {
        tracing::error!(%err, "failed to listen for shutdown signal, running until killed");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
