//! Project endpoints under `/api/projects`.

use super::{
    AppState,
    error::ApiError,
    extract::{ApiJson, ApiPath},
};
use crate::project::domain::ProjectId;
use crate::project::services::{CreateProjectRequest, ProjectResponse, UpdateProjectRequest};
use axum::{Json, extract::State, http::StatusCode};

/// `POST /api/projects`
///
/// # Errors
///
/// Returns 400 for invalid fields and 409 for a duplicate name.
pub async fn create_project(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateProjectRequest>,
) -> Result<(StatusCode, Json<ProjectResponse>), ApiError> {
    let project = state.projects().create(request).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

/// `GET /api/projects`, ordered by id and not paginated.
///
/// # Errors
///
/// Returns 500 when the store is unavailable.
pub async fn list_projects(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProjectResponse>>, ApiError> {
    let projects = state.projects().list_all().await?;
    Ok(Json(projects))
}

/// `GET /api/projects/{id}`
///
/// # Errors
///
/// Returns 404 when the project does not exist.
pub async fn get_project(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<ProjectResponse>, ApiError> {
    let project = state.projects().get(ProjectId::new(id)).await?;
    Ok(Json(project))
}

/// `PUT /api/projects/{id}`
///
/// # Errors
///
/// Returns 404 for an unknown project, 400 for invalid fields, and 409 when
/// the new name is taken.
pub async fn update_project(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(request): ApiJson<UpdateProjectRequest>,
) -> Result<Json<ProjectResponse>, ApiError> {
    let project = state.projects().update(ProjectId::new(id), request).await?;
    Ok(Json(project))
}

/// `DELETE /api/projects/{id}`
///
/// # Errors
///
/// Returns 404 when the project does not exist.
pub async fn delete_project(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, ApiError> {
    state.projects().delete(ProjectId::new(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
