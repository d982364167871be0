//! Request payloads for task creation and full-replace updates.

use crate::project::domain::ProjectId;
use crate::task::domain::{TaskFields, TaskPriority, TaskStatus};
use crate::validation::FieldViolations;
use chrono::NaiveDate;
use serde::Deserialize;

/// Request payload for creating a task.
///
/// Omitted `status` and `priority` take their defaults (`OPEN`, `MEDIUM`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    status: Option<TaskStatus>,
    #[serde(default)]
    priority: Option<TaskPriority>,
    #[serde(default)]
    due_date: Option<NaiveDate>,
    #[serde(default)]
    project_id: Option<ProjectId>,
}

impl CreateTaskRequest {
    /// Creates a request with the required title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the initial status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the initial priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Associates the task with a project.
    #[must_use]
    pub const fn with_project_id(mut self, project_id: ProjectId) -> Self {
        self.project_id = Some(project_id);
        self
    }

    pub(super) fn into_fields(self) -> Result<TaskFields, FieldViolations> {
        TaskFields::parse(
            self.title,
            self.description,
            self.status,
            self.priority,
            self.due_date,
            self.project_id,
        )
    }
}

/// Full-replace request payload for an existing task.
///
/// Title, description, due date, and project are always overwritten, so
/// omitting the optional ones clears them. Omitted `status` and `priority`
/// keep their stored values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    status: Option<TaskStatus>,
    #[serde(default)]
    priority: Option<TaskPriority>,
    #[serde(default)]
    due_date: Option<NaiveDate>,
    #[serde(default)]
    project_id: Option<ProjectId>,
}

impl UpdateTaskRequest {
    /// Creates a request with the replacement title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Sets the replacement description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replaces the stored status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Replaces the stored priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets the replacement due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the replacement project association.
    #[must_use]
    pub const fn with_project_id(mut self, project_id: ProjectId) -> Self {
        self.project_id = Some(project_id);
        self
    }

    pub(super) fn into_fields(self) -> Result<TaskFields, FieldViolations> {
        TaskFields::parse(
            self.title,
            self.description,
            self.status,
            self.priority,
            self.due_date,
            self.project_id,
        )
    }
}
