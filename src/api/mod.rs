//! HTTP boundary built on axum.
//!
//! Routes:
//!
//! - `GET /` plain-text banner
//! - `GET|POST /api/tasks`, `GET|PUT|DELETE /api/tasks/{id}`
//! - `GET|POST /api/projects`, `GET|PUT|DELETE /api/projects/{id}`
//!
//! Every failure, including unknown paths and unsupported methods, is
//! rendered as an [`error::ErrorBody`].

pub mod error;
pub mod extract;
pub mod projects;
pub mod tasks;

use crate::project::{
    adapters::memory::InMemoryProjectRepository, ports::ProjectRepository,
    services::ProjectService,
};
use crate::task::{
    adapters::memory::InMemoryTaskRepository, ports::TaskRepository, services::TaskService,
};
use axum::{Router, http::StatusCode, middleware, routing::get};
use error::ApiError;
use mockable::DefaultClock;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Banner served at `/`.
pub const BANNER: &str = "Task Tracker API is running. See /api/tasks.";

/// Message for requests whose path matches no route.
pub const NO_ROUTE: &str = "No handler found for this path";

/// Message for requests whose path matches but whose method does not.
pub const METHOD_NOT_ALLOWED: &str = "Method not allowed";

/// Task service over type-erased repositories.
pub type SharedTaskService = TaskService<dyn TaskRepository, dyn ProjectRepository, DefaultClock>;

/// Project service over a type-erased repository.
pub type SharedProjectService = ProjectService<dyn ProjectRepository, DefaultClock>;

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    tasks: SharedTaskService,
    projects: SharedProjectService,
    clock: Arc<DefaultClock>,
}

impl AppState {
    /// Wires services over the given repositories.
    #[must_use]
    pub fn new(tasks: Arc<dyn TaskRepository>, projects: Arc<dyn ProjectRepository>) -> Self {
        let clock = Arc::new(DefaultClock);
        Self {
            tasks: TaskService::new(tasks, Arc::clone(&projects), Arc::clone(&clock)),
            projects: ProjectService::new(projects, Arc::clone(&clock)),
            clock,
        }
    }

    /// Wires services over fresh, linked in-memory repositories.
    #[must_use]
    pub fn in_memory() -> Self {
        let tasks = InMemoryTaskRepository::new();
        let projects = InMemoryProjectRepository::with_task_references(tasks.clone());
        Self::new(Arc::new(tasks), Arc::new(projects))
    }

    /// Returns the task service.
    #[must_use]
    pub const fn tasks(&self) -> &SharedTaskService {
        &self.tasks
    }

    /// Returns the project service.
    #[must_use]
    pub const fn projects(&self) -> &SharedProjectService {
        &self.projects
    }

    /// Returns the clock used to timestamp error bodies.
    #[must_use]
    pub fn clock(&self) -> &DefaultClock {
        &self.clock
    }
}

/// Builds the application router with request tracing.
#[must_use]
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { BANNER }))
        .route(
            "/api/tasks",
            get(tasks::list_tasks).post(tasks::create_task),
        )
        .route(
            "/api/tasks/{id}",
            get(tasks::get_task)
                .put(tasks::update_task)
                .delete(tasks::delete_task),
        )
        .route(
            "/api/projects",
            get(projects::list_projects).post(projects::create_project),
        )
        .route(
            "/api/projects/{id}",
            get(projects::get_project)
                .put(projects::update_project)
                .delete(projects::delete_project),
        )
        .fallback(|| async { ApiError::not_found(NO_ROUTE) })
        .method_not_allowed_fallback(|| async {
            ApiError::new(StatusCode::METHOD_NOT_ALLOWED, METHOD_NOT_ALLOWED)
        })
        .layer(middleware::from_fn_with_state(
            state.clone(),
            error::render_error_body,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
