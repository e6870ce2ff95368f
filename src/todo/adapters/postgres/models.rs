//! Diesel row models for todo persistence.

use super::schema::{steps, todos};
use diesel::prelude::*;

/// Query result row for todo records.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = todos)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TodoRow {
    /// Todo identifier.
    pub id: i64,
    /// Todo name.
    pub name: String,
    /// Todo description.
    pub description: String,
    /// Canonical priority name.
    pub priority: String,
}

/// Insert model for todo records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = todos)]
pub struct NewTodoRow {
    /// Todo name.
    pub name: String,
    /// Todo description.
    pub description: String,
    /// Canonical priority name.
    pub priority: String,
}

/// Update model for a todo's top-level fields.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = todos)]
pub struct TodoChangesRow {
    /// Replacement name.
    pub name: String,
    /// Replacement description.
    pub description: String,
    /// Replacement priority name.
    pub priority: String,
}

/// Query result row for step records.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations)]
#[diesel(belongs_to(TodoRow, foreign_key = todo_id))]
#[diesel(table_name = steps)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct StepRow {
    /// Step identifier.
    pub id: i64,
    /// Owning todo identifier.
    pub todo_id: i64,
    /// Step name.
    pub name: String,
    /// Step description.
    pub description: String,
}

/// Insert model for step records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = steps)]
pub struct NewStepRow {
    /// Owning todo identifier.
    pub todo_id: i64,
    /// Step name.
    pub name: String,
    /// Step description.
    pub description: String,
}

/// Update model for a step's name and description.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = steps)]
pub struct StepChangesRow {
    /// Replacement name.
    pub name: String,
    /// Replacement description.
    pub description: String,
}
