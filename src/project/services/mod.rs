//! Application services for project management.

mod catalog;
mod response;

pub use catalog::{
    CreateProjectRequest, ProjectService, ProjectServiceError, ProjectServiceResult,
    UpdateProjectRequest,
};
pub use response::ProjectResponse;
