//! Mapping from task aggregates to the response shape exposed to clients.

use crate::project::domain::Project;
use crate::task::domain::{Task, TaskPriority, TaskStatus};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Task as rendered at the API boundary, with its project resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    /// Store-assigned identifier.
    pub id: i64,
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Current status.
    pub status: TaskStatus,
    /// Current priority.
    pub priority: TaskPriority,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Identifier of the associated project, if it resolves.
    pub project_id: Option<i64>,
    /// Name of the associated project, if it resolves.
    pub project_name: Option<String>,
}

impl TaskResponse {
    /// Maps a task together with its already-resolved project.
    ///
    /// `project` is only used when it is the project the task references. A
    /// task without a project, or whose project no longer exists, renders
    /// both project fields as `null`.
    #[must_use]
    pub fn from_task(task: &Task, project: Option<&Project>) -> Self {
        let resolved = project.filter(|candidate| task.project_id() == Some(candidate.id()));
        Self {
            id: task.id().into_inner(),
            title: task.title().as_str().to_owned(),
            description: task.description().map(|text| text.as_str().to_owned()),
            status: task.status(),
            priority: task.priority(),
            due_date: task.due_date(),
            created_at: task.created_at(),
            updated_at: task.updated_at(),
            project_id: resolved.map(|found| found.id().into_inner()),
            project_name: resolved.map(|found| found.name().as_str().to_owned()),
        }
    }
}
