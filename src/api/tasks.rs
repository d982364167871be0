//! Task endpoints under `/api/tasks`.

use super::{
    AppState,
    error::ApiError,
    extract::{ApiJson, ApiPath, ApiQuery},
};
use crate::task::domain::{Page, TaskId};
use crate::task::services::{CreateTaskRequest, TaskListQuery, TaskResponse, UpdateTaskRequest};
use axum::{Json, extract::State, http::StatusCode};

/// `POST /api/tasks`
///
/// # Errors
///
/// Returns 400 for invalid fields and 404 for an unknown project.
pub async fn create_task(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateTaskRequest>,
) -> Result<(StatusCode, Json<TaskResponse>), ApiError> {
    let task = state.tasks().create(request).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// `GET /api/tasks?page&size&sort&status&priority&projectId`
///
/// # Errors
///
/// Returns 400 for an unknown status, priority, or sort value.
pub async fn list_tasks(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<TaskListQuery>,
) -> Result<Json<Page<TaskResponse>>, ApiError> {
    let page = state.tasks().list(query).await?;
    Ok(Json(page))
}

/// `GET /api/tasks/{id}`
///
/// # Errors
///
/// Returns 404 when the task does not exist.
pub async fn get_task(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<TaskResponse>, ApiError> {
    let task = state.tasks().get(TaskId::new(id)).await?;
    Ok(Json(task))
}

/// `PUT /api/tasks/{id}`
///
/// # Errors
///
/// Returns 404 for an unknown task or project and 400 for invalid fields.
pub async fn update_task(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(request): ApiJson<UpdateTaskRequest>,
) -> Result<Json<TaskResponse>, ApiError> {
    let task = state.tasks().update(TaskId::new(id), request).await?;
    Ok(Json(task))
}

/// `DELETE /api/tasks/{id}`
///
/// # Errors
///
/// Returns 404 when the task does not exist.
pub async fn delete_task(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, ApiError> {
    state.tasks().delete(TaskId::new(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
