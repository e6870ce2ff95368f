//! Shared helpers for `PostgreSQL` integration tests.

use diesel::{PgConnection, r2d2::ConnectionManager};
use rstest::fixture;
use std::sync::Arc;
use todo_service::todo::{
    adapters::postgres::{PostgresTodoRepository, TodoPgPool},
    services::TodoService,
};

/// Environment variable holding the test database URL.
pub const DATABASE_URL_ENV: &str = "TODO_TEST_DATABASE_URL";

/// Repository and service sharing one connection pool.
pub struct PgTestContext {
    /// Repository under test.
    pub repository: Arc<PostgresTodoRepository>,
    /// Service over the same repository.
    pub service: TodoService<PostgresTodoRepository>,
}

/// Connects to the test database and applies the schema.
///
/// # Errors
///
/// Returns an error if [`DATABASE_URL_ENV`] is unset, the pool cannot be
/// built, or the schema cannot be applied.
#[fixture]
pub async fn context() -> eyre::Result<PgTestContext> {
    let url = std::env::var(DATABASE_URL_ENV)
        .map_err(|_| eyre::eyre!("{DATABASE_URL_ENV} must name a test database"))?;
    let pool: TodoPgPool = diesel::r2d2::Pool::builder()
        .max_size(2)
        .build(ConnectionManager::<PgConnection>::new(url))?;
    let repository = Arc::new(PostgresTodoRepository::new(pool));
    repository.migrate().await?;
    let service = TodoService::new(Arc::clone(&repository));
    Ok(PgTestContext {
        repository,
        service,
    })
}
