//! Steps nested under a todo.

use super::{StepId, TodoId};

/// A persisted step owned by exactly one todo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    id: StepId,
    todo_id: TodoId,
    name: String,
    description: String,
}

impl Step {
    /// Reconstructs a step from stored values.
    #[must_use]
    pub fn new(
        id: StepId,
        todo_id: TodoId,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id,
            todo_id,
            name: name.into(),
            description: description.into(),
        }
    }

    /// Returns the step identifier.
    #[must_use]
    pub const fn id(&self) -> StepId {
        self.id
    }

    /// Returns the identifier of the owning todo.
    #[must_use]
    pub const fn todo_id(&self) -> TodoId {
        self.todo_id
    }

    /// Returns the step name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the step description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Replaces the name and description, keeping identity and owner.
    pub fn apply(&mut self, changes: &StepChanges) {
        changes.name.clone_into(&mut self.name);
        changes.description.clone_into(&mut self.description);
    }
}

/// A step that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStep {
    name: String,
    description: String,
}

impl NewStep {
    /// Creates an unsaved step.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    /// Returns the step name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the step description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Attaches store-assigned identifiers, producing a persisted step.
    #[must_use]
    pub fn into_step(self, id: StepId, todo_id: TodoId) -> Step {
        Step::new(id, todo_id, self.name, self.description)
    }
}

/// Replacement values for an existing step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepChanges {
    name: String,
    description: String,
}

impl StepChanges {
    /// Creates a change set.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    /// Returns the replacement name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the replacement description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}
