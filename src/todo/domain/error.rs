//! Error types for todo validation and parsing.

use super::{StepId, TodoId};
use thiserror::Error;

/// Rejection raised by the todo validation-and-consistency rules.
///
/// Every variant is a client error: the request was malformed, exceeded a
/// limit, or referenced an entity that does not exist.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The name is empty or only whitespace.
    #[error("name must not be blank")]
    BlankName,

    /// The name exceeds the maximum length.
    #[error("name is {length} characters long, the maximum is {max}")]
    NameTooLong {
        /// Length of the rejected name in characters.
        length: usize,
        /// Largest accepted length.
        max: usize,
    },

    /// The name contains characters outside `[a-zA-Z0-9 ]`.
    #[error("name '{0}' may only contain letters, digits and spaces")]
    InvalidNameCharacters(String),

    /// The description reached the length limit.
    #[error("description is {length} characters long, it must be shorter than {limit}")]
    DescriptionTooLong {
        /// Length of the rejected description in characters.
        length: usize,
        /// Exclusive upper bound on the length.
        limit: usize,
    },

    /// A step in a batch failed name or description validation.
    #[error("step {index} is invalid: {reason}")]
    InvalidStep {
        /// Zero-based position of the step in the submitted batch.
        index: usize,
        /// The underlying rejection.
        reason: Box<ValidationError>,
    },

    /// Accepting the incoming steps would exceed the per-todo limit.
    #[error("todo can hold at most {max} steps, it has {existing} and {incoming} more were submitted")]
    TooManySteps {
        /// Steps already attached to the todo.
        existing: usize,
        /// Steps submitted in this request.
        incoming: usize,
        /// The per-todo limit.
        max: usize,
    },

    /// No todo exists under the identifier.
    #[error("no todo exists with id {0}")]
    TodoNotFound(TodoId),

    /// The todo exists but owns no step with the identifier.
    #[error("todo {todo_id} has no step with id {step_id}")]
    StepNotFound {
        /// The todo that was searched.
        todo_id: TodoId,
        /// The step that was not found.
        step_id: StepId,
    },

    /// A step update did not say which step to replace.
    #[error("step to update in todo {0} has no id")]
    MissingStepId(TodoId),
}

/// Error returned while parsing priorities from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown priority: {0}")]
pub struct ParsePriorityError(pub String);
