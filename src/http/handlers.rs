//! Request handlers translating HTTP calls into service calls.

use super::{
    ApiError,
    dto::{DeletedStepsResponse, StepRequest, StepResponse, TodoRequest, TodoResponse},
};
use crate::todo::{
    domain::{StepId, TodoId},
    ports::TodoRepository,
    services::TodoService,
};
use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

type Service<R> = State<TodoService<R>>;

#[derive(Debug, Serialize)]
pub(super) struct HealthResponse {
    status: &'static str,
}

pub(super) async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

pub(super) async fn list_todos<R: TodoRepository>(
    State(service): Service<R>,
) -> Result<Json<Vec<TodoResponse>>, ApiError> {
    let todos = service.find_all().await?;
    Ok(Json(todos.into_iter().map(TodoResponse::from).collect()))
}

pub(super) async fn get_todo<R: TodoRepository>(
    State(service): Service<R>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    let todo = service.find_by_id(TodoId::new(id)).await?;
    Ok(optional_json(todo.map(TodoResponse::from)))
}

pub(super) async fn create_todo<R: TodoRepository>(
    State(service): Service<R>,
    payload: Result<Json<TodoRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TodoResponse>), ApiError> {
    let Json(request) = payload?;
    let created = service.create(request.into_new_todo()).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

pub(super) async fn update_todo<R: TodoRepository>(
    State(service): Service<R>,
    Path(id): Path<i64>,
    payload: Result<Json<TodoRequest>, JsonRejection>,
) -> Result<Json<TodoResponse>, ApiError> {
    let Json(request) = payload?;
    let updated = service
        .update(TodoId::new(id), request.into_changes())
        .await?;
    Ok(Json(updated.into()))
}

pub(super) async fn delete_todo<R: TodoRepository>(
    State(service): Service<R>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    let removed = service.delete(TodoId::new(id)).await?;
    Ok(optional_json(removed.map(TodoResponse::from)))
}

pub(super) async fn add_steps<R: TodoRepository>(
    State(service): Service<R>,
    Path(id): Path<i64>,
    payload: Result<Json<Vec<StepRequest>>, JsonRejection>,
) -> Result<(StatusCode, Json<Vec<StepResponse>>), ApiError> {
    let Json(requests) = payload?;
    let steps = requests.into_iter().map(StepRequest::into_new_step).collect();
    let created = service.add_steps(TodoId::new(id), steps).await?;
    Ok((
        StatusCode::CREATED,
        Json(created.into_iter().map(StepResponse::from).collect()),
    ))
}

pub(super) async fn update_step<R: TodoRepository>(
    State(service): Service<R>,
    Path(id): Path<i64>,
    payload: Result<Json<StepRequest>, JsonRejection>,
) -> Result<Json<StepResponse>, ApiError> {
    let Json(request) = payload?;
    let (step_id, changes) = request.into_changes();
    let updated = service
        .update_step(TodoId::new(id), step_id, changes)
        .await?;
    Ok(Json(updated.into()))
}

pub(super) async fn delete_steps<R: TodoRepository>(
    State(service): Service<R>,
    Path(id): Path<i64>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<DeletedStepsResponse>, ApiError> {
    let step_ids = parse_step_ids(&params)?;
    let removed = service.delete_steps(TodoId::new(id), &step_ids).await?;
    Ok(Json(DeletedStepsResponse { removed }))
}

/// Collects `stepId` values, accepting both repeated parameters and
/// comma-separated lists.
fn parse_step_ids(params: &[(String, String)]) -> Result<Vec<StepId>, ApiError> {
    params
        .iter()
        .filter(|(key, _)| key == "stepId")
        .flat_map(|(_, value)| value.split(','))
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .map(|raw| {
            raw.parse::<i64>()
                .map(StepId::new)
                .map_err(|_| ApiError::InvalidStepId(raw.to_owned()))
        })
        .collect()
}

/// 200 with the JSON body when present, 200 with an empty body otherwise.
fn optional_json<T: Serialize>(body: Option<T>) -> Response {
    match body {
        Some(body) => Json(body).into_response(),
        None => StatusCode::OK.into_response(),
    }
}
