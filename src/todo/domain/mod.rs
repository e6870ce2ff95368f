//! Domain model for todo and step management.
//!
//! Persisted entities ([`Todo`], [`Step`]) always carry store-assigned
//! identifiers. Data that has not been stored yet is described by the draft
//! types ([`NewTodo`], [`NewStep`]), and partial replacements by the change
//! sets ([`TodoChanges`], [`StepChanges`]).

mod error;
mod ids;
mod priority;
mod step;
mod todo;

pub use error::{ParsePriorityError, ValidationError};
pub use ids::{StepId, TodoId};
pub use priority::Priority;
pub use step::{NewStep, Step, StepChanges};
pub use todo::{NewTodo, Todo, TodoChanges};
