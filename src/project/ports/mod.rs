//! Port contracts for project management.
//!
//! Ports define infrastructure-agnostic interfaces used by project and task
//! services.

pub mod repository;

pub use repository::{ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult};
