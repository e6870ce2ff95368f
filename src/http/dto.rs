//! JSON request and response bodies.

use crate::todo::domain::{
    NewStep, NewTodo, Priority, Step, StepChanges, StepId, Todo, TodoChanges, TodoId,
};
use serde::{Deserialize, Serialize};

/// Body of `POST /todos` and `PUT /todos/{id}`.
///
/// Missing `name` and `description` fields deserialize to empty strings so
/// that validation, not deserialization, reports them. Client-supplied ids
/// are ignored, and `steps` is ignored by updates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoRequest {
    /// Todo name.
    #[serde(default)]
    pub name: String,
    /// Todo description.
    #[serde(default)]
    pub description: String,
    /// Todo priority.
    pub priority: Priority,
    /// Initial steps, only honoured on creation.
    #[serde(default)]
    pub steps: Vec<StepRequest>,
}

impl TodoRequest {
    /// Converts the body into an unsaved todo.
    #[must_use]
    pub fn into_new_todo(self) -> NewTodo {
        NewTodo::new(self.name, self.description, self.priority)
            .with_steps(self.steps.into_iter().map(StepRequest::into_new_step))
    }

    /// Converts the body into a change set, dropping any steps.
    #[must_use]
    pub fn into_changes(self) -> TodoChanges {
        TodoChanges::new(self.name, self.description, self.priority)
    }
}

/// A step inside a request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRequest {
    /// Identifies the step to replace in `PUT /todos/{id}/steps`; ignored
    /// elsewhere.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<StepId>,
    /// Step name.
    #[serde(default)]
    pub name: String,
    /// Step description.
    #[serde(default)]
    pub description: String,
}

impl StepRequest {
    /// Creates a step body without an id.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: description.into(),
        }
    }

    /// Sets the id of the step to replace.
    #[must_use]
    pub const fn with_id(mut self, id: StepId) -> Self {
        self.id = Some(id);
        self
    }

    /// Converts the body into an unsaved step.
    #[must_use]
    pub fn into_new_step(self) -> NewStep {
        NewStep::new(self.name, self.description)
    }

    /// Splits the body into the targeted step id and its replacement values.
    #[must_use]
    pub fn into_changes(self) -> (Option<StepId>, StepChanges) {
        (self.id, StepChanges::new(self.name, self.description))
    }
}

/// A todo as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoResponse {
    /// Todo identifier.
    pub id: TodoId,
    /// Todo name.
    pub name: String,
    /// Todo description.
    pub description: String,
    /// Todo priority.
    pub priority: Priority,
    /// Steps in insertion order.
    pub steps: Vec<StepResponse>,
}

impl From<Todo> for TodoResponse {
    fn from(todo: Todo) -> Self {
        Self {
            id: todo.id(),
            name: todo.name().to_owned(),
            description: todo.description().to_owned(),
            priority: todo.priority(),
            steps: todo.steps().iter().map(StepResponse::from).collect(),
        }
    }
}

/// A step as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepResponse {
    /// Step identifier.
    pub id: StepId,
    /// Step name.
    pub name: String,
    /// Step description.
    pub description: String,
}

impl From<&Step> for StepResponse {
    fn from(step: &Step) -> Self {
        Self {
            id: step.id(),
            name: step.name().to_owned(),
            description: step.description().to_owned(),
        }
    }
}

impl From<Step> for StepResponse {
    fn from(step: Step) -> Self {
        Self::from(&step)
    }
}

/// Body of `DELETE /todos/{id}/steps`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedStepsResponse {
    /// Number of steps actually removed.
    pub removed: usize,
}
