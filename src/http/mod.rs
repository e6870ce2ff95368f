//! HTTP boundary for the todo service.
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | GET | `/health` | liveness probe |
//! | GET | `/todos` | list todos, `HIGH` priority first |
//! | POST | `/todos` | create a todo with optional steps |
//! | GET | `/todos/{id}` | fetch one todo, empty body when absent |
//! | PUT | `/todos/{id}` | replace name, description and priority |
//! | DELETE | `/todos/{id}` | delete a todo and its steps |
//! | POST | `/todos/{id}/steps` | append steps |
//! | PUT | `/todos/{id}/steps` | replace one step |
//! | DELETE | `/todos/{id}/steps?stepId=..` | delete steps by id |
//!
//! Validation failures are answered with `400 Bad Request` and the message
//! as a plain-text body; store failures with `500 Internal Server Error`.

mod dto;
mod error;
mod handlers;

pub use dto::{DeletedStepsResponse, StepRequest, StepResponse, TodoRequest, TodoResponse};
pub use error::ApiError;

use crate::todo::{ports::TodoRepository, services::TodoService};
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

/// Builds the application router over a todo service.
pub fn router<R>(service: TodoService<R>) -> Router
where
    R: TodoRepository + 'static,
{
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/todos",
            get(handlers::list_todos::<R>).post(handlers::create_todo::<R>),
        )
        .route(
            "/todos/{id}",
            get(handlers::get_todo::<R>)
                .put(handlers::update_todo::<R>)
                .delete(handlers::delete_todo::<R>),
        )
        .route(
            "/todos/{id}/steps",
            post(handlers::add_steps::<R>)
                .put(handlers::update_step::<R>)
                .delete(handlers::delete_steps::<R>),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}
