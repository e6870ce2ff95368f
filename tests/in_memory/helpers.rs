//! Shared fixtures for in-memory integration tests.

use rstest::fixture;
use std::sync::Arc;
use todo_service::todo::{
    adapters::memory::InMemoryTodoRepository,
    domain::{NewStep, NewTodo, Priority, Todo},
    services::TodoService,
};

/// Service backed by a fresh in-memory store.
pub type TestService = TodoService<InMemoryTodoRepository>;

/// Provides a service with an empty store for each test.
#[fixture]
pub fn service() -> TestService {
    TodoService::new(Arc::new(InMemoryTodoRepository::new()))
}

/// Builds `count` valid steps named `Step 0`, `Step 1`, ...
#[must_use]
pub fn numbered_steps(count: usize) -> Vec<NewStep> {
    (0..count)
        .map(|n| NewStep::new(format!("Step {n}"), format!("detail {n}")))
        .collect()
}

/// Creates a todo with `step_count` numbered steps.
///
/// # Errors
///
/// Returns an error if the service rejects the todo.
pub async fn create_todo(
    service: &TestService,
    name: &str,
    priority: Priority,
    step_count: usize,
) -> eyre::Result<Todo> {
    let todo = NewTodo::new(name, "", priority).with_steps(numbered_steps(step_count));
    Ok(service.create(todo).await?)
}
