//! Application services for todo and step orchestration.

mod todo;

pub use todo::{TodoService, TodoServiceError, TodoServiceResult};
