//! Task management for the task tracker.
//!
//! Tasks carry a title, optional description, status, priority, due date,
//! and an optional reference to a [`crate::project`]. Listing supports
//! filtering by any combination of status, priority, and project, together
//! with paging and sorting. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
