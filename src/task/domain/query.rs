//! Query vocabulary for task listings: filters, paging, sorting, and pages.

use super::{ParseTaskSortError, Task, TaskPriority, TaskStatus};
use crate::project::domain::ProjectId;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::cmp::Ordering;
use std::str::FromStr;

/// Page size used when a request omits one or supplies a value below 1.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Largest page size a listing will return.
pub const MAX_PAGE_SIZE: u32 = 2000;

/// Largest row offset a page may start at.
const MAX_ROW_OFFSET: u64 = i64::MAX.unsigned_abs();

/// Optional task predicates combined with logical AND.
///
/// Each present field contributes exactly one equality predicate; absent
/// fields contribute nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskFilter {
    /// Required status, if filtering by status.
    pub status: Option<TaskStatus>,
    /// Required priority, if filtering by priority.
    pub priority: Option<TaskPriority>,
    /// Required project, if filtering by project.
    pub project_id: Option<ProjectId>,
}

impl TaskFilter {
    /// Returns a filter that matches every task.
    #[must_use]
    pub const fn unfiltered() -> Self {
        Self {
            status: None,
            priority: None,
            project_id: None,
        }
    }

    /// Restricts the filter to a status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Restricts the filter to a priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Restricts the filter to a project.
    #[must_use]
    pub const fn with_project(mut self, project_id: ProjectId) -> Self {
        self.project_id = Some(project_id);
        self
    }

    /// Returns `true` when `task` satisfies every present predicate.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.status.is_none_or(|status| task.status() == status)
            && self
                .priority
                .is_none_or(|priority| task.priority() == priority)
            && self
                .project_id
                .is_none_or(|project_id| task.project_id() == Some(project_id))
    }

    /// Names the active predicate combination, one of eight.
    #[must_use]
    pub const fn combination(&self) -> &'static str {
        match (
            self.status.is_some(),
            self.priority.is_some(),
            self.project_id.is_some(),
        ) {
            (false, false, false) => "all",
            (true, false, false) => "status",
            (false, true, false) => "priority",
            (true, true, false) => "status+priority",
            (false, false, true) => "project",
            (true, false, true) => "status+project",
            (false, true, true) => "priority+project",
            (true, true, true) => "status+priority+project",
        }
    }
}

/// Normalised zero-based page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    number: u64,
    size: u32,
    sort: TaskSort,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            number: 0,
            size: DEFAULT_PAGE_SIZE,
            sort: TaskSort::default(),
        }
    }
}

impl PageRequest {
    /// Creates a page request, clamping out-of-range values.
    ///
    /// Negative page numbers become 0. A missing size or one below 1 falls
    /// back to [`DEFAULT_PAGE_SIZE`]; sizes above [`MAX_PAGE_SIZE`] are capped.
    #[must_use]
    pub fn new(page: Option<i64>, size: Option<i64>, sort: TaskSort) -> Self {
        let number = page.and_then(|value| u64::try_from(value).ok()).unwrap_or(0);
        let clamped_size = match size {
            Some(value) if value >= 1 => {
                u32::try_from(value.min(i64::from(MAX_PAGE_SIZE))).unwrap_or(MAX_PAGE_SIZE)
            }
            _ => DEFAULT_PAGE_SIZE,
        };
        Self {
            number,
            size: clamped_size,
            sort,
        }
    }

    /// Returns the zero-based page index.
    #[must_use]
    pub const fn number(&self) -> u64 {
        self.number
    }

    /// Returns the page size.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Returns the requested ordering.
    #[must_use]
    pub const fn sort(&self) -> TaskSort {
        self.sort
    }

    /// Returns the number of rows preceding this page.
    ///
    /// Capped at `i64::MAX` so every store can express it as a signed row
    /// offset; such a page is always empty.
    #[must_use]
    pub fn offset(&self) -> u64 {
        self.number
            .saturating_mul(u64::from(self.size))
            .min(MAX_ROW_OFFSET)
    }
}

/// Sortable task properties.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TaskSortField {
    /// Store-assigned identifier.
    Id,
    /// Title text.
    Title,
    /// Status name.
    Status,
    /// Priority name.
    Priority,
    /// Due date; tasks without one sort last in ascending order.
    DueDate,
    /// Creation timestamp.
    #[default]
    CreatedAt,
    /// Latest update timestamp.
    UpdatedAt,
}

impl TaskSortField {
    /// Returns the property name as accepted in `sort` query values.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Title => "title",
            Self::Status => "status",
            Self::Priority => "priority",
            Self::DueDate => "dueDate",
            Self::CreatedAt => "createdAt",
            Self::UpdatedAt => "updatedAt",
        }
    }
}

impl FromStr for TaskSortField {
    type Err = ParseTaskSortError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "id" => Ok(Self::Id),
            "title" => Ok(Self::Title),
            "status" => Ok(Self::Status),
            "priority" => Ok(Self::Priority),
            "dueDate" => Ok(Self::DueDate),
            "createdAt" => Ok(Self::CreatedAt),
            "updatedAt" => Ok(Self::UpdatedAt),
            other => Err(ParseTaskSortError::UnknownField(other.to_owned())),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    /// Smallest first.
    #[default]
    Asc,
    /// Largest first.
    Desc,
}

impl FromStr for SortDirection {
    type Err = ParseTaskSortError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.eq_ignore_ascii_case("asc") {
            Ok(Self::Asc)
        } else if trimmed.eq_ignore_ascii_case("desc") {
            Ok(Self::Desc)
        } else {
            Err(ParseTaskSortError::UnknownDirection(trimmed.to_owned()))
        }
    }
}

/// Listing order. Ties are always broken by ascending id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskSort {
    /// Property to order by.
    pub field: TaskSortField,
    /// Direction of the primary ordering.
    pub direction: SortDirection,
}

impl TaskSort {
    /// Creates a sort specification.
    #[must_use]
    pub const fn new(field: TaskSortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Compares two tasks under this ordering.
    ///
    /// Missing due dates compare greater than any date, which places them
    /// last when ascending and first when descending.
    #[must_use]
    pub fn compare(&self, left: &Task, right: &Task) -> Ordering {
        let primary = match self.field {
            TaskSortField::Id => left.id().cmp(&right.id()),
            TaskSortField::Title => left.title().cmp(right.title()),
            TaskSortField::Status => left.status().as_str().cmp(right.status().as_str()),
            TaskSortField::Priority => left.priority().as_str().cmp(right.priority().as_str()),
            TaskSortField::DueDate => match (left.due_date(), right.due_date()) {
                (Some(a), Some(b)) => a.cmp(&b),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
            TaskSortField::CreatedAt => left.created_at().cmp(&right.created_at()),
            TaskSortField::UpdatedAt => left.updated_at().cmp(&right.updated_at()),
        };
        let directed = match self.direction {
            SortDirection::Asc => primary,
            SortDirection::Desc => primary.reverse(),
        };
        directed.then_with(|| left.id().cmp(&right.id()))
    }
}

impl FromStr for TaskSort {
    type Err = ParseTaskSortError;

    /// Parses `field` or `field,direction`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (field, direction) = match value.split_once(',') {
            Some((raw_field, raw_direction)) => (raw_field.parse()?, raw_direction.parse()?),
            None => (value.parse()?, SortDirection::Asc),
        };
        Ok(Self { field, direction })
    }
}

/// One page of an ordered result set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    content: Vec<T>,
    total_elements: u64,
    number: u64,
    size: u32,
}

impl<T> Page<T> {
    /// Creates a page from its content and the total matching row count.
    #[must_use]
    pub const fn new(content: Vec<T>, total_elements: u64, request: &PageRequest) -> Self {
        Self {
            content,
            total_elements,
            number: request.number(),
            size: request.size(),
        }
    }

    /// Returns the rows on this page.
    #[must_use]
    pub fn content(&self) -> &[T] {
        &self.content
    }

    /// Consumes the page, returning its rows.
    #[must_use]
    pub fn into_content(self) -> Vec<T> {
        self.content
    }

    /// Returns the number of rows matching the query across all pages.
    #[must_use]
    pub const fn total_elements(&self) -> u64 {
        self.total_elements
    }

    /// Returns the zero-based page index.
    #[must_use]
    pub const fn number(&self) -> u64 {
        self.number
    }

    /// Returns the requested page size.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Returns the number of pages needed for every matching row.
    #[must_use]
    pub fn total_pages(&self) -> u64 {
        if self.size == 0 {
            return 0;
        }
        self.total_elements.div_ceil(u64::from(self.size))
    }

    /// Returns `true` for the first page.
    #[must_use]
    pub const fn is_first(&self) -> bool {
        self.number == 0
    }

    /// Returns `true` when no page follows this one.
    #[must_use]
    pub fn is_last(&self) -> bool {
        self.number.saturating_add(1) >= self.total_pages()
    }

    /// Transforms every row while keeping the paging metadata.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            total_elements: self.total_elements,
            number: self.number,
            size: self.size,
        }
    }
}

impl<T: Serialize> Serialize for Page<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut page = serializer.serialize_struct("Page", 8)?;
        page.serialize_field("content", &self.content)?;
        page.serialize_field("totalElements", &self.total_elements)?;
        page.serialize_field("totalPages", &self.total_pages())?;
        page.serialize_field("number", &self.number)?;
        page.serialize_field("size", &self.size)?;
        page.serialize_field("numberOfElements", &self.content.len())?;
        page.serialize_field("first", &self.is_first())?;
        page.serialize_field("last", &self.is_last())?;
        page.end()
    }
}
