//! Service layer applying the validation rules before every store write.

use crate::todo::{
    domain::{NewStep, NewTodo, Step, StepChanges, StepId, Todo, TodoChanges, TodoId, ValidationError},
    ports::{TodoRepository, TodoRepositoryError},
    validation::{
        MAX_STEPS_PER_TODO, ensure_capacity, validate_name_and_description, validate_steps,
    },
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Service-level errors for todo operations.
#[derive(Debug, Error)]
pub enum TodoServiceError {
    /// The request broke a validation rule or referenced a missing entity.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The store failed for reasons unrelated to the request.
    #[error(transparent)]
    Repository(TodoRepositoryError),
}

impl From<TodoRepositoryError> for TodoServiceError {
    /// Missing todos and steps reported by the store are client errors, the
    /// same as when the service detects them up front.
    fn from(err: TodoRepositoryError) -> Self {
        match err {
            TodoRepositoryError::NotFound(id) => Self::Validation(ValidationError::TodoNotFound(id)),
            TodoRepositoryError::StepNotFound { todo_id, step_id } => {
                Self::Validation(ValidationError::StepNotFound { todo_id, step_id })
            }
            TodoRepositoryError::CapacityExceeded {
                existing, incoming, ..
            } => Self::Validation(ValidationError::TooManySteps {
                existing,
                incoming,
                max: MAX_STEPS_PER_TODO,
            }),
            other => Self::Repository(other),
        }
    }
}

/// Result type for todo service operations.
pub type TodoServiceResult<T> = Result<T, TodoServiceError>;

/// Todo orchestration service.
///
/// Every mutation is validated completely before the store is called, so a
/// rejected request never leaves a partial write behind.
pub struct TodoService<R>
where
    R: TodoRepository,
{
    repository: Arc<R>,
}

impl<R> Clone for TodoService<R>
where
    R: TodoRepository,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R> TodoService<R>
where
    R: TodoRepository,
{
    /// Creates a new todo service.
    #[must_use]
    pub const fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Retrieves a todo by identifier.
    ///
    /// Returns `Ok(None)` when no todo exists under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`TodoServiceError::Repository`] when the lookup fails.
    pub async fn find_by_id(&self, id: TodoId) -> TodoServiceResult<Option<Todo>> {
        debug!(todo_id = %id, "finding todo");
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Returns every todo ordered by priority, `HIGH` first, then by
    /// identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TodoServiceError::Repository`] when the lookup fails.
    pub async fn find_all(&self) -> TodoServiceResult<Vec<Todo>> {
        debug!("finding all todos");
        let mut todos = self.repository.find_all().await?;
        todos.sort_by(|left, right| {
            left.priority()
                .cmp(&right.priority())
                .then_with(|| left.id().cmp(&right.id()))
        });
        Ok(todos)
    }

    /// Validates and stores a new todo together with its initial steps.
    ///
    /// # Errors
    ///
    /// Returns [`TodoServiceError::Validation`] when the todo or any step
    /// fails validation or more steps than allowed are attached; the store
    /// is not called in that case. Returns [`TodoServiceError::Repository`]
    /// when persistence fails.
    pub async fn create(&self, todo: NewTodo) -> TodoServiceResult<Todo> {
        debug!(name = todo.name(), steps = todo.steps().len(), "creating todo");
        validate_name_and_description(todo.name(), todo.description())
            .and_then(|()| validate_steps(todo.steps()))
            .and_then(|()| ensure_capacity(0, todo.steps().len()))
            .inspect_err(|err| warn!(%err, "rejected new todo"))?;

        let stored = self.repository.save(&todo).await?;
        info!(todo_id = %stored.id(), steps = stored.steps().len(), "todo created");
        Ok(stored)
    }

    /// Replaces a todo's name, description and priority. Steps are never
    /// touched by this operation.
    ///
    /// # Errors
    ///
    /// Returns [`TodoServiceError::Validation`] when no todo exists under
    /// `id` or the new values fail validation, and
    /// [`TodoServiceError::Repository`] when persistence fails.
    pub async fn update(&self, id: TodoId, changes: TodoChanges) -> TodoServiceResult<Todo> {
        debug!(todo_id = %id, "updating todo");
        self.require_todo(id).await?;
        validate_name_and_description(changes.name(), changes.description())
            .inspect_err(|err| warn!(todo_id = %id, %err, "rejected todo update"))?;

        let updated = self.repository.update(id, &changes).await?;
        info!(todo_id = %id, "todo updated");
        Ok(updated)
    }

    /// Removes a todo and all of its steps.
    ///
    /// Returns the removed todo, or `Ok(None)` when it did not exist.
    ///
    /// # Errors
    ///
    /// Returns [`TodoServiceError::Repository`] when persistence fails.
    pub async fn delete(&self, id: TodoId) -> TodoServiceResult<Option<Todo>> {
        debug!(todo_id = %id, "deleting todo");
        let removed = self.repository.delete(id).await?;
        if removed.is_some() {
            info!(todo_id = %id, "todo deleted");
        }
        Ok(removed)
    }

    /// Appends a batch of steps to an existing todo.
    ///
    /// The batch is applied completely or not at all. The capacity check
    /// here rejects early; the store repeats it atomically with the insert
    /// so concurrent batches cannot overfill a todo.
    ///
    /// # Errors
    ///
    /// Returns [`TodoServiceError::Validation`] when a step fails
    /// validation, the todo does not exist, or the todo would end up with
    /// more steps than allowed. Returns [`TodoServiceError::Repository`]
    /// when persistence fails.
    pub async fn add_steps(&self, id: TodoId, steps: Vec<NewStep>) -> TodoServiceResult<Vec<Step>> {
        debug!(todo_id = %id, incoming = steps.len(), "adding steps");
        validate_steps(&steps).inspect_err(|err| warn!(todo_id = %id, %err, "rejected steps"))?;
        let todo = self.require_todo(id).await?;
        ensure_capacity(todo.steps().len(), steps.len())
            .inspect_err(|err| warn!(todo_id = %id, %err, "rejected steps"))?;

        let created = self.repository.save_steps(id, &steps).await?;
        info!(todo_id = %id, added = created.len(), "steps added");
        Ok(created)
    }

    /// Replaces the name and description of one step in place.
    ///
    /// `step_id` is `None` when the caller did not identify the step.
    ///
    /// # Errors
    ///
    /// Returns [`TodoServiceError::Validation`] when the todo does not
    /// exist, it owns no step matching `step_id`, or the new values fail
    /// validation. Returns [`TodoServiceError::Repository`] when persistence
    /// fails.
    pub async fn update_step(
        &self,
        id: TodoId,
        step_id: Option<StepId>,
        changes: StepChanges,
    ) -> TodoServiceResult<Step> {
        debug!(todo_id = %id, ?step_id, "updating step");
        let todo = self.require_todo(id).await?;
        let step_id = step_id.ok_or(ValidationError::MissingStepId(id))?;
        if todo.step(step_id).is_none() {
            warn!(todo_id = %id, %step_id, "step to update not found");
            return Err(ValidationError::StepNotFound {
                todo_id: id,
                step_id,
            }
            .into());
        }
        validate_name_and_description(changes.name(), changes.description())
            .inspect_err(|err| warn!(todo_id = %id, %step_id, %err, "rejected step update"))?;

        let updated = self.repository.update_step(id, step_id, &changes).await?;
        info!(todo_id = %id, %step_id, "step updated");
        Ok(updated)
    }

    /// Removes the listed steps from a todo.
    ///
    /// Identifiers that do not belong to the todo, and a todo that does not
    /// exist, are ignored. Returns how many steps were removed.
    ///
    /// # Errors
    ///
    /// Returns [`TodoServiceError::Repository`] when persistence fails.
    pub async fn delete_steps(&self, id: TodoId, step_ids: &[StepId]) -> TodoServiceResult<usize> {
        debug!(todo_id = %id, requested = step_ids.len(), "deleting steps");
        let removed = self.repository.delete_steps(id, step_ids).await?;
        info!(todo_id = %id, removed, "steps deleted");
        Ok(removed)
    }

    async fn require_todo(&self, id: TodoId) -> TodoServiceResult<Todo> {
        self.repository.find_by_id(id).await?.ok_or_else(|| {
            warn!(todo_id = %id, "todo not found");
            ValidationError::TodoNotFound(id).into()
        })
    }
}
