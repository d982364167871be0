//! Service layer for project creation, lookup, update, and removal.

use super::ProjectResponse;
use crate::project::{
    domain::{NewProject, Project, ProjectDetails, ProjectId, ProjectName},
    ports::{ProjectRepository, ProjectRepositoryError},
};
use crate::validation::FieldViolations;
use mockable::Clock;
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    color: Option<String>,
}

impl CreateProjectRequest {
    /// Creates a request with the required name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            color: None,
        }
    }

    /// Sets the project description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the display colour.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    fn into_details(self) -> Result<ProjectDetails, FieldViolations> {
        ProjectDetails::parse(self.name, self.description, self.color)
    }
}

/// Full-replace request payload for an existing project.
///
/// Every field overwrites the stored value; omitted optional fields are
/// cleared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectRequest {
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    color: Option<String>,
}

impl UpdateProjectRequest {
    /// Creates a request with the replacement name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            color: None,
        }
    }

    /// Sets the replacement description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the replacement display colour.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    fn into_details(self) -> Result<ProjectDetails, FieldViolations> {
        ProjectDetails::parse(self.name, self.description, self.color)
    }
}

/// Service-level errors for project operations.
#[derive(Debug, Error)]
pub enum ProjectServiceError {
    /// No project exists with the identifier.
    #[error("Project with id {0} not found")]
    NotFound(ProjectId),
    /// Another project already uses the requested name.
    #[error("Project with name '{0}' already exists")]
    DuplicateName(ProjectName),
    /// Request payload failed validation.
    #[error("validation failed: {0}")]
    Validation(FieldViolations),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(ProjectRepositoryError),
}

impl From<ProjectRepositoryError> for ProjectServiceError {
    fn from(err: ProjectRepositoryError) -> Self {
        match err {
            ProjectRepositoryError::NotFound(id) => Self::NotFound(id),
            ProjectRepositoryError::DuplicateName(name) => Self::DuplicateName(name),
            ProjectRepositoryError::Persistence(_) => Self::Repository(err),
        }
    }
}

impl From<FieldViolations> for ProjectServiceError {
    fn from(violations: FieldViolations) -> Self {
        Self::Validation(violations)
    }
}

/// Result type for project service operations.
pub type ProjectServiceResult<T> = Result<T, ProjectServiceError>;

/// Project orchestration service.
pub struct ProjectService<R, C>
where
    R: ProjectRepository + ?Sized,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> Clone for ProjectService<R, C>
where
    R: ProjectRepository + ?Sized,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R, C> ProjectService<R, C>
where
    R: ProjectRepository + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a new project service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates a project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Validation`] for invalid fields,
    /// [`ProjectServiceError::DuplicateName`] when the name is taken, or
    /// [`ProjectServiceError::Repository`] when persistence fails.
    pub async fn create(
        &self,
        request: CreateProjectRequest,
    ) -> ProjectServiceResult<ProjectResponse> {
        let details = request.into_details()?;
        let draft = NewProject::new(details, &*self.clock);
        let project = self.repository.store(&draft).await?;
        tracing::info!(project_id = %project.id(), name = %project.name(), "project created");
        Ok(ProjectResponse::from(&project))
    }

    /// Returns a single project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::NotFound`] when the project does not
    /// exist, or [`ProjectServiceError::Repository`] when lookup fails.
    pub async fn get(&self, id: ProjectId) -> ProjectServiceResult<ProjectResponse> {
        let project = self.find_by_id_or_error(id).await?;
        Ok(ProjectResponse::from(&project))
    }

    /// Returns every project, ordered by identifier, without pagination.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Repository`] when lookup fails.
    pub async fn list_all(&self) -> ProjectServiceResult<Vec<ProjectResponse>> {
        let projects = self.repository.list_all().await?;
        tracing::debug!(count = projects.len(), "listed projects");
        Ok(projects.iter().map(ProjectResponse::from).collect())
    }

    /// Replaces the name, description, and colour of a project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::NotFound`] when the project does not
    /// exist, [`ProjectServiceError::Validation`] for invalid fields,
    /// [`ProjectServiceError::DuplicateName`] when the new name is taken, or
    /// [`ProjectServiceError::Repository`] when persistence fails.
    pub async fn update(
        &self,
        id: ProjectId,
        request: UpdateProjectRequest,
    ) -> ProjectServiceResult<ProjectResponse> {
        let mut project = self.find_by_id_or_error(id).await?;
        let details = request.into_details()?;
        project.replace_details(details, &*self.clock);
        self.repository.update(&project).await?;
        tracing::info!(project_id = %id, "project updated");
        Ok(ProjectResponse::from(&project))
    }

    /// Removes a project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::NotFound`] when the project does not
    /// exist, or [`ProjectServiceError::Repository`] when persistence fails.
    pub async fn delete(&self, id: ProjectId) -> ProjectServiceResult<()> {
        self.repository.delete(id).await?;
        tracing::info!(project_id = %id, "project deleted");
        Ok(())
    }

    async fn find_by_id_or_error(&self, id: ProjectId) -> ProjectServiceResult<Project> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ProjectServiceError::NotFound(id))
    }
}
