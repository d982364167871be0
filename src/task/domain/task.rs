//! Task aggregate root and related value types.

use super::{ParseTaskPriorityError, ParseTaskStatusError, TaskDescription, TaskId, TaskTitle};
use crate::project::domain::ProjectId;
use crate::validation::{FieldViolations, check};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Task progress state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// Work has not started.
    #[default]
    Open,
    /// Work is under way.
    InProgress,
    /// Work is complete.
    Done,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::InProgress => "IN_PROGRESS",
            Self::Done => "DONE",
        }
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "OPEN" => Ok(Self::Open),
            "IN_PROGRESS" => Ok(Self::InProgress),
            "DONE" => Ok(Self::Done),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

/// Relative importance of a task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskPriority {
    /// Can wait.
    Low,
    /// Normal importance.
    #[default]
    Medium,
    /// Urgent.
    High,
}

impl TaskPriority {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }
}

impl TryFrom<&str> for TaskPriority {
    type Error = ParseTaskPriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "LOW" => Ok(Self::Low),
            "MEDIUM" => Ok(Self::Medium),
            "HIGH" => Ok(Self::High),
            _ => Err(ParseTaskPriorityError(value.to_owned())),
        }
    }
}

/// Validated field values supplied by a create or update request.
///
/// `status` and `priority` stay optional here: creation substitutes the
/// defaults, while an update keeps the stored values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFields {
    /// Task title.
    pub title: TaskTitle,
    /// Optional description.
    pub description: Option<TaskDescription>,
    /// Requested status, if supplied.
    pub status: Option<TaskStatus>,
    /// Requested priority, if supplied.
    pub priority: Option<TaskPriority>,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// Referenced project, if any.
    pub project_id: Option<ProjectId>,
}

impl TaskFields {
    /// Validates raw field values, collecting every violation.
    ///
    /// # Errors
    ///
    /// Returns [`FieldViolations`] naming each invalid field.
    pub fn parse(
        title: String,
        description: Option<String>,
        status: Option<TaskStatus>,
        priority: Option<TaskPriority>,
        due_date: Option<NaiveDate>,
        project_id: Option<ProjectId>,
    ) -> Result<Self, FieldViolations> {
        let mut violations = FieldViolations::new();
        let parsed_title = check(&mut violations, "title", TaskTitle::new(title));
        let parsed_description = check(
            &mut violations,
            "description",
            TaskDescription::parse(description),
        );

        match (parsed_title, parsed_description) {
            (Some(task_title), Some(task_description)) => Ok(Self {
                title: task_title,
                description: task_description,
                status,
                priority,
                due_date,
                project_id,
            }),
            _ => Err(violations),
        }
    }
}

/// Task that has not yet been assigned an identifier by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    title: TaskTitle,
    description: Option<TaskDescription>,
    status: TaskStatus,
    priority: TaskPriority,
    due_date: Option<NaiveDate>,
    project_id: Option<ProjectId>,
    created_at: DateTime<Utc>,
}

impl NewTask {
    /// Creates a task draft, defaulting status to `OPEN` and priority to
    /// `MEDIUM` when the request omits them.
    #[must_use]
    pub fn new(fields: TaskFields, clock: &impl Clock) -> Self {
        Self {
            title: fields.title,
            description: fields.description,
            status: fields.status.unwrap_or_default(),
            priority: fields.priority.unwrap_or_default(),
            due_date: fields.due_date,
            project_id: fields.project_id,
            created_at: clock.utc(),
        }
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub const fn description(&self) -> Option<&TaskDescription> {
        self.description.as_ref()
    }

    /// Returns the initial status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the initial priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    /// Returns the referenced project, if any.
    #[must_use]
    pub const fn project_id(&self) -> Option<ProjectId> {
        self.project_id
    }

    /// Returns the creation timestamp, also used as the first update time.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Materialises the draft with a store-issued identifier.
    #[must_use]
    pub fn assign_id(self, id: TaskId) -> Task {
        Task {
            id,
            title: self.title,
            description: self.description,
            status: self.status,
            priority: self.priority,
            due_date: self.due_date,
            project_id: self.project_id,
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}

/// Task aggregate root.
///
/// The project association is a bare identifier; the project itself is
/// resolved separately when rendering responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: TaskTitle,
    description: Option<TaskDescription>,
    status: TaskStatus,
    priority: TaskPriority,
    due_date: Option<NaiveDate>,
    project_id: Option<ProjectId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description.
    pub description: Option<TaskDescription>,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted priority.
    pub priority: TaskPriority,
    /// Persisted due date.
    pub due_date: Option<NaiveDate>,
    /// Persisted project reference.
    pub project_id: Option<ProjectId>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            status: data.status,
            priority: data.priority,
            due_date: data.due_date,
            project_id: data.project_id,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub const fn description(&self) -> Option<&TaskDescription> {
        self.description.as_ref()
    }

    /// Returns the status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    /// Returns the referenced project, if any.
    #[must_use]
    pub const fn project_id(&self) -> Option<ProjectId> {
        self.project_id
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Applies a full-replace update.
    ///
    /// Title, description, due date, and project reference are overwritten
    /// unconditionally, so omitting description, due date, or project clears
    /// them. Status and priority are only replaced when supplied and keep
    /// their stored values otherwise.
    pub fn apply_update(&mut self, fields: TaskFields, clock: &impl Clock) {
        self.title = fields.title;
        self.description = fields.description;
        if let Some(status) = fields.status {
            self.status = status;
        }
        if let Some(priority) = fields.priority {
            self.priority = priority;
        }
        self.due_date = fields.due_date;
        self.project_id = fields.project_id;
        self.touch(clock);
    }

    /// Drops the project reference after the project itself was deleted.
    ///
    /// Leaves `updated_at` alone, like a `SET NULL` foreign-key action.
    pub const fn detach_project(&mut self) {
        self.project_id = None;
    }

    /// Updates the `updated_at` timestamp, never moving it before `created_at`.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc().max(self.created_at);
    }
}
