//! Application services for task orchestration, listing, and mapping.

mod lifecycle;
mod listing;
mod requests;
mod response;

pub use lifecycle::{TaskService, TaskServiceError, TaskServiceResult};
pub use listing::TaskListQuery;
pub use requests::{CreateTaskRequest, UpdateTaskRequest};
pub use response::TaskResponse;
