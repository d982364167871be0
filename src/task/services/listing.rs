//! Query selector input: raw listing parameters and their normalisation.

use crate::project::domain::ProjectId;
use crate::task::domain::{PageRequest, TaskFilter, TaskPriority, TaskSort, TaskStatus};
use crate::validation::{FieldViolations, check};
use serde::Deserialize;

/// Raw listing parameters as received from a query string.
///
/// Every parameter is optional. [`TaskListQuery::into_selection`] turns them
/// into a [`TaskFilter`] and a normalised [`PageRequest`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskListQuery {
    #[serde(default)]
    page: Option<i64>,
    #[serde(default)]
    size: Option<i64>,
    #[serde(default)]
    sort: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    priority: Option<String>,
    #[serde(default)]
    project_id: Option<i64>,
}

impl TaskListQuery {
    /// Creates an empty query: first page, default size and ordering, no
    /// filters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the zero-based page index.
    #[must_use]
    pub const fn with_page(mut self, page: i64) -> Self {
        self.page = Some(page);
        self
    }

    /// Sets the page size.
    #[must_use]
    pub const fn with_size(mut self, size: i64) -> Self {
        self.size = Some(size);
        self
    }

    /// Sets the ordering as `field` or `field,direction`.
    #[must_use]
    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    /// Filters by status name.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Filters by priority name.
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    /// Filters by project identifier.
    #[must_use]
    pub const fn with_project_id(mut self, project_id: i64) -> Self {
        self.project_id = Some(project_id);
        self
    }

    /// Validates the parameters, collecting every violation.
    ///
    /// Blank status, priority, or sort values count as absent.
    ///
    /// # Errors
    ///
    /// Returns [`FieldViolations`] naming `status`, `priority`, or `sort` when
    /// the value is not recognised.
    pub fn into_selection(self) -> Result<(TaskFilter, PageRequest), FieldViolations> {
        let mut violations = FieldViolations::new();

        let status = non_blank(self.status.as_deref())
            .and_then(|raw| check(&mut violations, "status", TaskStatus::try_from(raw)));
        let priority = non_blank(self.priority.as_deref())
            .and_then(|raw| check(&mut violations, "priority", TaskPriority::try_from(raw)));
        let sort = non_blank(self.sort.as_deref())
            .and_then(|raw| check(&mut violations, "sort", raw.parse::<TaskSort>()))
            .unwrap_or_default();

        let filter = TaskFilter {
            status,
            priority,
            project_id: self.project_id.map(ProjectId::new),
        };
        let page = PageRequest::new(self.page, self.size, sort);
        violations.into_result((filter, page))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|raw| !raw.trim().is_empty())
}
