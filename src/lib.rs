//! Task Tracker: a REST backend for tasks grouped into projects.
//!
//! Tasks carry a status, a priority, an optional due date, and an optional
//! reference to a project. Listings are paginated, sortable, and filtered by
//! any combination of status, priority, and project.
//!
//! # Architecture
//!
//! Each bounded context follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for persistence
//! - **Adapters**: In-memory and `PostgreSQL` implementations of the ports
//! - **Services**: Orchestration, validation, and response mapping
//!
//! # Modules
//!
//! - [`task`]: Task lifecycle and the filtered, paginated listing
//! - [`project`]: Project management
//! - [`api`]: axum routes and error rendering
//! - [`config`]: Layered configuration
//! - [`storage`]: `PostgreSQL` pool and schema bootstrap
//! - [`seed`]: Demo data for an empty store
//! - [`validation`]: Per-field validation messages

pub mod api;
pub mod config;
pub mod project;
pub mod seed;
pub mod storage;
pub mod task;
pub mod validation;
