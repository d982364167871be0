//! Service layer for task creation, lookup, listing, update, and removal.

use super::{CreateTaskRequest, TaskListQuery, TaskResponse, UpdateTaskRequest};
use crate::project::{
    domain::{Project, ProjectId},
    ports::{ProjectRepository, ProjectRepositoryError},
};
use crate::task::{
    domain::{NewTask, Page, PageRequest, Task, TaskFilter, TaskId},
    ports::{TaskRepository, TaskRepositoryError},
};
use crate::validation::FieldViolations;
use mockable::Clock;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// No task exists with the identifier.
    #[error("Task with id {0} not found")]
    TaskNotFound(TaskId),
    /// The referenced project does not exist.
    #[error("Project with id {0} not found")]
    ProjectNotFound(ProjectId),
    /// Request payload or listing parameters failed validation.
    #[error("validation failed: {0}")]
    Validation(FieldViolations),
    /// Task repository operation failed.
    #[error(transparent)]
    Repository(TaskRepositoryError),
    /// Project lookup failed.
    #[error(transparent)]
    ProjectRepository(ProjectRepositoryError),
}

impl From<TaskRepositoryError> for TaskServiceError {
    fn from(err: TaskRepositoryError) -> Self {
        match err {
            TaskRepositoryError::NotFound(id) => Self::TaskNotFound(id),
            TaskRepositoryError::Persistence(_) => Self::Repository(err),
        }
    }
}

impl From<ProjectRepositoryError> for TaskServiceError {
    fn from(err: ProjectRepositoryError) -> Self {
        match err {
            ProjectRepositoryError::NotFound(id) => Self::ProjectNotFound(id),
            ProjectRepositoryError::DuplicateName(_) | ProjectRepositoryError::Persistence(_) => {
                Self::ProjectRepository(err)
            }
        }
    }
}

impl From<FieldViolations> for TaskServiceError {
    fn from(violations: FieldViolations) -> Self {
        Self::Validation(violations)
    }
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Task orchestration service.
///
/// Holds the task store, the project store used to validate and resolve
/// project references, and the clock stamping creation and update times.
pub struct TaskService<T, P, C>
where
    T: TaskRepository + ?Sized,
    P: ProjectRepository + ?Sized,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    projects: Arc<P>,
    clock: Arc<C>,
}

impl<T, P, C> Clone for TaskService<T, P, C>
where
    T: TaskRepository + ?Sized,
    P: ProjectRepository + ?Sized,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            tasks: Arc::clone(&self.tasks),
            projects: Arc::clone(&self.projects),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<T, P, C> TaskService<T, P, C>
where
    T: TaskRepository + ?Sized,
    P: ProjectRepository + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a new task service.
    #[must_use]
    pub const fn new(tasks: Arc<T>, projects: Arc<P>, clock: Arc<C>) -> Self {
        Self {
            tasks,
            projects,
            clock,
        }
    }

    /// Creates a task, defaulting status to `OPEN` and priority to `MEDIUM`.
    ///
    /// A referenced project is looked up before anything is written.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Validation`] for invalid fields,
    /// [`TaskServiceError::ProjectNotFound`] for an unknown project, or a
    /// repository error when persistence fails.
    pub async fn create(&self, request: CreateTaskRequest) -> TaskServiceResult<TaskResponse> {
        let fields = request.into_fields()?;
        let project = self.require_project(fields.project_id).await?;
        let draft = NewTask::new(fields, &*self.clock);
        let task = self.tasks.store(&draft).await?;
        tracing::info!(
            task_id = %task.id(),
            status = task.status().as_str(),
            priority = task.priority().as_str(),
            "task created"
        );
        Ok(TaskResponse::from_task(&task, project.as_ref()))
    }

    /// Returns a single task with its project resolved.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] when the task does not
    /// exist, or a repository error when lookup fails.
    pub async fn get(&self, id: TaskId) -> TaskServiceResult<TaskResponse> {
        let task = self.find_by_id_or_error(id).await?;
        let project = self.resolve_project(&task).await?;
        tracing::debug!(task_id = %id, "task loaded");
        Ok(TaskResponse::from_task(&task, project.as_ref()))
    }

    /// Validates raw listing parameters and returns the selected page.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Validation`] for an unknown status,
    /// priority, or sort value, or a repository error when lookup fails.
    pub async fn list(&self, query: TaskListQuery) -> TaskServiceResult<Page<TaskResponse>> {
        let (filter, page) = query.into_selection()?;
        self.list_page(&filter, &page).await
    }

    /// Returns one page of tasks matching every present filter.
    ///
    /// Projects referenced by the page are resolved with a single batched
    /// lookup.
    ///
    /// # Errors
    ///
    /// Returns a repository error when lookup fails.
    pub async fn list_page(
        &self,
        filter: &TaskFilter,
        page: &PageRequest,
    ) -> TaskServiceResult<Page<TaskResponse>> {
        let tasks = self.tasks.find_page(filter, page).await?;
        tracing::debug!(
            combination = filter.combination(),
            page = page.number(),
            size = page.size(),
            total = tasks.total_elements(),
            "listed tasks"
        );
        let projects = self.resolve_projects(tasks.content()).await?;
        Ok(tasks.map(|task| {
            let project = task.project_id().and_then(|id| projects.get(&id));
            TaskResponse::from_task(&task, project)
        }))
    }

    /// Replaces a task's fields.
    ///
    /// The task must exist before anything else is checked. Omitted status
    /// and priority keep their stored values; an omitted project clears the
    /// association.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] when the task does not
    /// exist, [`TaskServiceError::Validation`] for invalid fields,
    /// [`TaskServiceError::ProjectNotFound`] for an unknown project, or a
    /// repository error when persistence fails. The stored task is left
    /// untouched on every error.
    pub async fn update(
        &self,
        id: TaskId,
        request: UpdateTaskRequest,
    ) -> TaskServiceResult<TaskResponse> {
        let mut task = self.find_by_id_or_error(id).await?;
        let fields = request.into_fields()?;
        let project = self.require_project(fields.project_id).await?;
        task.apply_update(fields, &*self.clock);
        self.tasks.update(&task).await?;
        tracing::info!(task_id = %id, "task updated");
        Ok(TaskResponse::from_task(&task, project.as_ref()))
    }

    /// Removes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] when the task does not
    /// exist, or a repository error when persistence fails.
    pub async fn delete(&self, id: TaskId) -> TaskServiceResult<()> {
        self.tasks.delete(id).await?;
        tracing::info!(task_id = %id, "task deleted");
        Ok(())
    }

    async fn find_by_id_or_error(&self, id: TaskId) -> TaskServiceResult<Task> {
        self.tasks
            .find_by_id(id)
            .await?
            .ok_or(TaskServiceError::TaskNotFound(id))
    }

    /// Loads a project the request references, failing when it is unknown.
    async fn require_project(
        &self,
        project_id: Option<ProjectId>,
    ) -> TaskServiceResult<Option<Project>> {
        let Some(id) = project_id else {
            return Ok(None);
        };
        self.projects
            .find_by_id(id)
            .await?
            .map(Some)
            .ok_or(TaskServiceError::ProjectNotFound(id))
    }

    /// Loads the project a stored task references; a dangling reference
    /// resolves to `None`.
    async fn resolve_project(&self, task: &Task) -> TaskServiceResult<Option<Project>> {
        match task.project_id() {
            Some(id) => Ok(self.projects.find_by_id(id).await?),
            None => Ok(None),
        }
    }

    async fn resolve_projects(
        &self,
        tasks: &[Task],
    ) -> TaskServiceResult<HashMap<ProjectId, Project>> {
        let ids: Vec<ProjectId> = tasks
            .iter()
            .filter_map(Task::project_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let projects = self.projects.find_by_ids(&ids).await?;
        Ok(projects
            .into_iter()
            .map(|project| (project.id(), project))
            .collect())
    }
}
