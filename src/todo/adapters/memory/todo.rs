//! In-memory todo repository.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::todo::{
    domain::{NewStep, NewTodo, Step, StepChanges, StepId, Todo, TodoChanges, TodoId},
    ports::{TodoRepository, TodoRepositoryError, TodoRepositoryResult},
    validation::ensure_capacity,
};

/// Thread-safe in-memory todo repository.
///
/// Clones share the same underlying state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTodoRepository {
    state: Arc<RwLock<InMemoryTodoState>>,
}

#[derive(Debug, Default)]
struct InMemoryTodoState {
    todos: BTreeMap<TodoId, Todo>,
    last_todo_id: i64,
    last_step_id: i64,
}

impl InMemoryTodoState {
    const fn next_todo_id(&mut self) -> TodoId {
        self.last_todo_id += 1;
        TodoId::new(self.last_todo_id)
    }

    const fn next_step_id(&mut self) -> StepId {
        self.last_step_id += 1;
        StepId::new(self.last_step_id)
    }

    fn todo_mut(&mut self, id: TodoId) -> TodoRepositoryResult<&mut Todo> {
        self.todos
            .get_mut(&id)
            .ok_or(TodoRepositoryError::NotFound(id))
    }
}

impl InMemoryTodoRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> TodoRepositoryResult<RwLockReadGuard<'_, InMemoryTodoState>> {
        self.state.read().map_err(|err| {
            TodoRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> TodoRepositoryResult<RwLockWriteGuard<'_, InMemoryTodoState>> {
        self.state.write().map_err(|err| {
            TodoRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

#[async_trait]
impl TodoRepository for InMemoryTodoRepository {
    async fn find_by_id(&self, id: TodoId) -> TodoRepositoryResult<Option<Todo>> {
        let state = self.read()?;
        Ok(state.todos.get(&id).cloned())
    }

    async fn find_all(&self) -> TodoRepositoryResult<Vec<Todo>> {
        let state = self.read()?;
        Ok(state.todos.values().cloned().collect())
    }

    async fn save(&self, todo: &NewTodo) -> TodoRepositoryResult<Todo> {
        let mut state = self.write()?;
        let todo_id = state.next_todo_id();
        let steps = todo
            .steps()
            .iter()
            .map(|step| step.clone().into_step(state.next_step_id(), todo_id))
            .collect();

        let stored = Todo::new(
            todo_id,
            todo.name(),
            todo.description(),
            todo.priority(),
            steps,
        );
        state.todos.insert(todo_id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, id: TodoId, changes: &TodoChanges) -> TodoRepositoryResult<Todo> {
        let mut state = self.write()?;
        let todo = state.todo_mut(id)?;
        todo.apply(changes);
        Ok(todo.clone())
    }

    async fn delete(&self, id: TodoId) -> TodoRepositoryResult<Option<Todo>> {
        let mut state = self.write()?;
        Ok(state.todos.remove(&id))
    }

    async fn save_steps(&self, id: TodoId, steps: &[NewStep]) -> TodoRepositoryResult<Vec<Step>> {
        let mut state = self.write()?;
        let existing = state.todo_mut(id)?.steps().len();
        if ensure_capacity(existing, steps.len()).is_err() {
            return Err(TodoRepositoryError::CapacityExceeded {
                todo_id: id,
                existing,
                incoming: steps.len(),
            });
        }

        let created: Vec<Step> = steps
            .iter()
            .map(|step| step.clone().into_step(state.next_step_id(), id))
            .collect();
        let todo = state.todo_mut(id)?;
        for step in &created {
            todo.push_step(step.clone());
        }
        Ok(created)
    }

    async fn update_step(
        &self,
        id: TodoId,
        step_id: StepId,
        changes: &StepChanges,
    ) -> TodoRepositoryResult<Step> {
        let mut state = self.write()?;
        let todo = state.todo_mut(id)?;
        todo.update_step(step_id, changes)
            .cloned()
            .ok_or(TodoRepositoryError::StepNotFound {
                todo_id: id,
                step_id,
            })
    }

    async fn delete_steps(&self, id: TodoId, step_ids: &[StepId]) -> TodoRepositoryResult<usize> {
        let mut state = self.write()?;
        let removed = state
            .todos
            .get_mut(&id)
            .map_or(0, |todo| todo.remove_steps(step_ids));
        Ok(removed)
    }
}
