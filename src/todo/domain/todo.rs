//! Todo aggregate root.

use super::{NewStep, Priority, Step, StepChanges, StepId, TodoId};

/// A persisted todo and its ordered steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    id: TodoId,
    name: String,
    description: String,
    priority: Priority,
    steps: Vec<Step>,
}

impl Todo {
    /// Reconstructs a todo from stored values.
    #[must_use]
    pub fn new(
        id: TodoId,
        name: impl Into<String>,
        description: impl Into<String>,
        priority: Priority,
        steps: Vec<Step>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            priority,
            steps,
        }
    }

    /// Returns the todo identifier.
    #[must_use]
    pub const fn id(&self) -> TodoId {
        self.id
    }

    /// Returns the todo name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the todo description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the todo priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the steps in insertion order.
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Returns the step with the given identifier, if this todo owns it.
    #[must_use]
    pub fn step(&self, step_id: StepId) -> Option<&Step> {
        self.steps.iter().find(|step| step.id() == step_id)
    }

    /// Replaces name, description and priority. Steps are left untouched.
    pub fn apply(&mut self, changes: &TodoChanges) {
        changes.name.clone_into(&mut self.name);
        changes.description.clone_into(&mut self.description);
        self.priority = changes.priority;
    }

    /// Appends an already-identified step.
    pub fn push_step(&mut self, step: Step) {
        self.steps.push(step);
    }

    /// Replaces a step's name and description in place.
    ///
    /// Returns the updated step, or `None` when this todo owns no step with
    /// the given identifier.
    pub fn update_step(&mut self, step_id: StepId, changes: &StepChanges) -> Option<&Step> {
        let step = self.steps.iter_mut().find(|step| step.id() == step_id)?;
        step.apply(changes);
        Some(step)
    }

    /// Removes every step whose identifier is listed and returns how many
    /// were removed. Unknown identifiers are ignored.
    pub fn remove_steps(&mut self, step_ids: &[StepId]) -> usize {
        let before = self.steps.len();
        self.steps.retain(|step| !step_ids.contains(&step.id()));
        before - self.steps.len()
    }
}

/// A todo that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    name: String,
    description: String,
    priority: Priority,
    steps: Vec<NewStep>,
}

impl NewTodo {
    /// Creates an unsaved todo without steps.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>, priority: Priority) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            priority,
            steps: Vec::new(),
        }
    }

    /// Sets the initial steps.
    #[must_use]
    pub fn with_steps(mut self, steps: impl IntoIterator<Item = NewStep>) -> Self {
        self.steps = steps.into_iter().collect();
        self
    }

    /// Returns the todo name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the todo description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the todo priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the initial steps.
    #[must_use]
    pub fn steps(&self) -> &[NewStep] {
        &self.steps
    }
}

/// Replacement values for an existing todo's top-level fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoChanges {
    name: String,
    description: String,
    priority: Priority,
}

impl TodoChanges {
    /// Creates a change set.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>, priority: Priority) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            priority,
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

    /// Returns the replacement priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }
}
