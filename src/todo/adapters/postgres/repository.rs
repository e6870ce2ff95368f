//! `PostgreSQL` repository implementation for todo storage.

use super::{
    models::{NewStepRow, NewTodoRow, StepChangesRow, StepRow, TodoChangesRow, TodoRow},
    schema::{steps, todos},
};
use crate::todo::{
    domain::{NewStep, NewTodo, Priority, Step, StepChanges, StepId, Todo, TodoChanges, TodoId},
    ports::{TodoRepository, TodoRepositoryError, TodoRepositoryResult},
    validation::ensure_capacity,
};
use async_trait::async_trait;
use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::Error as DieselError;

/// `PostgreSQL` connection pool type used by todo adapters.
pub type TodoPgPool = Pool<ConnectionManager<PgConnection>>;

/// Schema applied by [`PostgresTodoRepository::migrate`].
const SCHEMA_SQL: &str =
    include_str!("../../../../migrations/2024-05-06-000000_create_todos_and_steps/up.sql");

/// `PostgreSQL`-backed todo repository.
#[derive(Debug, Clone)]
pub struct PostgresTodoRepository {
    pool: TodoPgPool,
}

impl PostgresTodoRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TodoPgPool) -> Self {
        Self { pool }
    }

    /// Creates the `todos` and `steps` tables when they do not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`TodoRepositoryError::Persistence`] when a connection cannot
    /// be obtained or the schema statements fail.
    pub async fn migrate(&self) -> TodoRepositoryResult<()> {
        self.run_blocking(|connection| {
            connection
                .batch_execute(SCHEMA_SQL)
                .map_err(TodoRepositoryError::persistence)
        })
        .await
    }

    async fn run_blocking<F, T>(&self, f: F) -> TodoRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TodoRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TodoRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TodoRepositoryError::persistence)?
    }
}

impl From<DieselError> for TodoRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

#[async_trait]
impl TodoRepository for PostgresTodoRepository {
    async fn find_by_id(&self, id: TodoId) -> TodoRepositoryResult<Option<Todo>> {
        self.run_blocking(move |connection| load_todo(connection, id))
            .await
    }

    async fn find_all(&self) -> TodoRepositoryResult<Vec<Todo>> {
        self.run_blocking(|connection| {
            let todo_rows = todos::table
                .order(todos::id.asc())
                .select(TodoRow::as_select())
                .load::<TodoRow>(connection)?;
            let step_rows = StepRow::belonging_to(&todo_rows)
                .order(steps::id.asc())
                .select(StepRow::as_select())
                .load::<StepRow>(connection)?;
            let grouped = step_rows.grouped_by(&todo_rows);

            todo_rows
                .into_iter()
                .zip(grouped)
                .map(|(row, step_rows)| row_to_todo(row, step_rows))
                .collect()
        })
        .await
    }

    async fn save(&self, todo: &NewTodo) -> TodoRepositoryResult<Todo> {
        let new_row = NewTodoRow {
            name: todo.name().to_owned(),
            description: todo.description().to_owned(),
            priority: todo.priority().as_str().to_owned(),
        };
        let new_steps = todo.steps().to_vec();

        self.run_blocking(move |connection| {
            connection.transaction(|connection| {
                let todo_row = diesel::insert_into(todos::table)
                    .values(&new_row)
                    .returning(TodoRow::as_returning())
                    .get_result::<TodoRow>(connection)?;
                let step_rows = insert_steps(connection, todo_row.id, &new_steps)?;
                row_to_todo(todo_row, step_rows)
            })
        })
        .await
    }

    async fn update(&self, id: TodoId, changes: &TodoChanges) -> TodoRepositoryResult<Todo> {
        let changes_row = TodoChangesRow {
            name: changes.name().to_owned(),
            description: changes.description().to_owned(),
            priority: changes.priority().as_str().to_owned(),
        };

        self.run_blocking(move |connection| {
            connection.transaction(|connection| {
                let updated = diesel::update(todos::table.find(id.value()))
                    .set(&changes_row)
                    .returning(TodoRow::as_returning())
                    .get_result::<TodoRow>(connection)
                    .optional()?;
                let Some(todo_row) = updated else {
                    return Err(TodoRepositoryError::NotFound(id));
                };
                let step_rows = load_step_rows(connection, todo_row.id)?;
                row_to_todo(todo_row, step_rows)
            })
        })
        .await
    }

    async fn delete(&self, id: TodoId) -> TodoRepositoryResult<Option<Todo>> {
        self.run_blocking(move |connection| {
            connection.transaction(|connection| {
                let Some(todo) = load_todo(connection, id)? else {
                    return Ok(None);
                };
                // Steps go with the parent through ON DELETE CASCADE.
                diesel::delete(todos::table.find(id.value())).execute(connection)?;
                Ok(Some(todo))
            })
        })
        .await
    }

    async fn save_steps(&self, id: TodoId, steps: &[NewStep]) -> TodoRepositoryResult<Vec<Step>> {
        let new_steps = steps.to_vec();

        self.run_blocking(move |connection| {
            connection.transaction(|connection| {
                lock_todo(connection, id)?;
                let existing = count_steps(connection, id)?;
                if ensure_capacity(existing, new_steps.len()).is_err() {
                    return Err(TodoRepositoryError::CapacityExceeded {
                        todo_id: id,
                        existing,
                        incoming: new_steps.len(),
                    });
                }
                let step_rows = insert_steps(connection, id.value(), &new_steps)?;
                Ok(step_rows.into_iter().map(row_to_step).collect())
            })
        })
        .await
    }

    async fn update_step(
        &self,
        id: TodoId,
        step_id: StepId,
        changes: &StepChanges,
    ) -> TodoRepositoryResult<Step> {
        let changes_row = StepChangesRow {
            name: changes.name().to_owned(),
            description: changes.description().to_owned(),
        };

        self.run_blocking(move |connection| {
            connection.transaction(|connection| {
                if !todo_exists(connection, id)? {
                    return Err(TodoRepositoryError::NotFound(id));
                }
                let updated = diesel::update(
                    steps::table
                        .filter(steps::id.eq(step_id.value()))
                        .filter(steps::todo_id.eq(id.value())),
                )
                .set(&changes_row)
                .returning(StepRow::as_returning())
                .get_result::<StepRow>(connection)
                .optional()?;

                updated
                    .map(row_to_step)
                    .ok_or(TodoRepositoryError::StepNotFound {
                        todo_id: id,
                        step_id,
                    })
            })
        })
        .await
    }

    async fn delete_steps(&self, id: TodoId, step_ids: &[StepId]) -> TodoRepositoryResult<usize> {
        let raw_ids: Vec<i64> = step_ids.iter().map(|step_id| step_id.value()).collect();

        self.run_blocking(move |connection| {
            let removed = diesel::delete(
                steps::table
                    .filter(steps::todo_id.eq(id.value()))
                    .filter(steps::id.eq_any(raw_ids)),
            )
            .execute(connection)?;
            Ok(removed)
        })
        .await
    }
}

fn todo_exists(connection: &mut PgConnection, id: TodoId) -> TodoRepositoryResult<bool> {
    let found = todos::table
        .find(id.value())
        .select(todos::id)
        .first::<i64>(connection)
        .optional()?;
    Ok(found.is_some())
}

/// Takes a row lock on the todo so concurrent step batches serialise.
fn lock_todo(connection: &mut PgConnection, id: TodoId) -> TodoRepositoryResult<()> {
    todos::table
        .find(id.value())
        .select(todos::id)
        .for_update()
        .first::<i64>(connection)
        .optional()?
        .map(|_| ())
        .ok_or(TodoRepositoryError::NotFound(id))
}

fn count_steps(connection: &mut PgConnection, id: TodoId) -> TodoRepositoryResult<usize> {
    let count = steps::table
        .filter(steps::todo_id.eq(id.value()))
        .count()
        .get_result::<i64>(connection)?;
    usize::try_from(count).map_err(TodoRepositoryError::invalid_persisted_data)
}

fn load_todo(connection: &mut PgConnection, id: TodoId) -> TodoRepositoryResult<Option<Todo>> {
    let row = todos::table
        .find(id.value())
        .select(TodoRow::as_select())
        .first::<TodoRow>(connection)
        .optional()?;

    match row {
        Some(todo_row) => {
            let step_rows = load_step_rows(connection, todo_row.id)?;
            row_to_todo(todo_row, step_rows).map(Some)
        }
        None => Ok(None),
    }
}

fn load_step_rows(connection: &mut PgConnection, todo_id: i64) -> TodoRepositoryResult<Vec<StepRow>> {
    let rows = steps::table
        .filter(steps::todo_id.eq(todo_id))
        .order(steps::id.asc())
        .select(StepRow::as_select())
        .load::<StepRow>(connection)?;
    Ok(rows)
}

fn insert_steps(
    connection: &mut PgConnection,
    todo_id: i64,
    new_steps: &[NewStep],
) -> TodoRepositoryResult<Vec<StepRow>> {
    if new_steps.is_empty() {
        return Ok(Vec::new());
    }

    let rows: Vec<NewStepRow> = new_steps
        .iter()
        .map(|step| NewStepRow {
            todo_id,
            name: step.name().to_owned(),
            description: step.description().to_owned(),
        })
        .collect();

    // BIGSERIAL assigns ids in VALUES order, which keeps insertion order.
    let mut inserted = diesel::insert_into(steps::table)
        .values(&rows)
        .returning(StepRow::as_returning())
        .get_results::<StepRow>(connection)?;
    inserted.sort_by_key(|row| row.id);
    Ok(inserted)
}

fn row_to_step(row: StepRow) -> Step {
    Step::new(
        StepId::new(row.id),
        TodoId::new(row.todo_id),
        row.name,
        row.description,
    )
}

fn row_to_todo(row: TodoRow, step_rows: Vec<StepRow>) -> TodoRepositoryResult<Todo> {
    let TodoRow {
        id,
        name,
        description,
        priority: persisted_priority,
    } = row;

    let priority = Priority::try_from(persisted_priority.as_str())
        .map_err(TodoRepositoryError::invalid_persisted_data)?;
    let steps = step_rows.into_iter().map(row_to_step).collect();

    Ok(Todo::new(TodoId::new(id), name, description, priority, steps))
}
