//! Repository port for todo and step persistence.

use crate::todo::{
    domain::{NewStep, NewTodo, Step, StepChanges, StepId, Todo, TodoChanges, TodoId},
    validation::MAX_STEPS_PER_TODO,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for todo repository operations.
pub type TodoRepositoryResult<T> = Result<T, TodoRepositoryError>;

/// Todo persistence contract.
///
/// Implementations own their records; callers only ever receive copies.
/// A successful write is visible to the next read on the same repository.
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Finds a todo, with its steps, by identifier.
    ///
    /// Returns `None` when the todo does not exist.
    async fn find_by_id(&self, id: TodoId) -> TodoRepositoryResult<Option<Todo>>;

    /// Returns every todo with its steps, in no particular order.
    async fn find_all(&self) -> TodoRepositoryResult<Vec<Todo>>;

    /// Stores a new todo and its initial steps, assigning identifiers.
    async fn save(&self, todo: &NewTodo) -> TodoRepositoryResult<Todo>;

    /// Replaces a todo's name, description and priority. Steps are kept.
    ///
    /// # Errors
    ///
    /// Returns [`TodoRepositoryError::NotFound`] when the todo does not exist.
    async fn update(&self, id: TodoId, changes: &TodoChanges) -> TodoRepositoryResult<Todo>;

    /// Removes a todo and all of its steps.
    ///
    /// Returns the removed todo, or `None` when it did not exist.
    async fn delete(&self, id: TodoId) -> TodoRepositoryResult<Option<Todo>>;

    /// Appends steps to a todo, assigning identifiers. Either every step is
    /// stored or none is.
    ///
    /// # Errors
    ///
    /// Returns [`TodoRepositoryError::NotFound`] when the todo does not exist
    /// and [`TodoRepositoryError::CapacityExceeded`] when the batch would
    /// take the todo past [`MAX_STEPS_PER_TODO`]. The count is checked in the
    /// same critical section as the insert.
    async fn save_steps(&self, id: TodoId, steps: &[NewStep]) -> TodoRepositoryResult<Vec<Step>>;

    /// Replaces one step's name and description in place.
    ///
    /// # Errors
    ///
    /// Returns [`TodoRepositoryError::NotFound`] when the todo does not exist
    /// or [`TodoRepositoryError::StepNotFound`] when the todo owns no such
    /// step.
    async fn update_step(
        &self,
        id: TodoId,
        step_id: StepId,
        changes: &StepChanges,
    ) -> TodoRepositoryResult<Step>;

    /// Removes the listed steps from a todo and returns how many were
    /// removed. Unknown step identifiers and unknown todos are ignored.
    async fn delete_steps(&self, id: TodoId, step_ids: &[StepId]) -> TodoRepositoryResult<usize>;
}

/// Errors returned by todo repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TodoRepositoryError {
    /// The todo was not found.
    #[error("todo not found: {0}")]
    NotFound(TodoId),

    /// The todo exists but owns no step with the identifier.
    #[error("step {step_id} not found in todo {todo_id}")]
    StepNotFound {
        /// The todo that was searched.
        todo_id: TodoId,
        /// The missing step.
        step_id: StepId,
    },

    /// Storing the batch would exceed the per-todo step limit.
    #[error("todo {todo_id} holds {existing} steps and cannot take {incoming} more")]
    CapacityExceeded {
        /// The todo the batch was addressed to.
        todo_id: TodoId,
        /// Steps stored when the batch was checked.
        existing: usize,
        /// Steps in the rejected batch.
        incoming: usize,
    },

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TodoRepositoryError {
    /// Wraps a data-quality or parsing error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
