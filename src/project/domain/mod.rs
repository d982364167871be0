//! Domain model for projects.
//!
//! Projects carry no back-reference to the tasks that point at them; the
//! relationship is navigated from the task side only.

mod error;
mod ids;
mod project;

pub use error::ProjectDomainError;
pub use ids::{ProjectColor, ProjectDescription, ProjectId, ProjectName};
pub use project::{NewProject, PersistedProjectData, Project, ProjectDetails};
