//! Domain model for tasks.
//!
//! Tasks hold an optional weak reference to a project by identifier only. The
//! query vocabulary used by listings (filters, paging, ordering, and pages)
//! lives alongside the aggregate so adapters and services share one
//! definition of listing semantics.

mod error;
mod ids;
mod query;
mod task;

pub use error::{ParseTaskPriorityError, ParseTaskSortError, ParseTaskStatusError, TaskDomainError};
pub use ids::{TaskDescription, TaskId, TaskTitle};
pub use query::{
    DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, Page, PageRequest, SortDirection, TaskFilter, TaskSort,
    TaskSortField,
};
pub use task::{NewTask, PersistedTaskData, Task, TaskFields, TaskPriority, TaskStatus};
