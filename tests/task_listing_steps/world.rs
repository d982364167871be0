//! Shared world state for task listing BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use task_tracker::project::{
    adapters::memory::InMemoryProjectRepository, domain::ProjectId, services::ProjectService,
};
use task_tracker::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::Page,
    services::{TaskResponse, TaskService, TaskServiceError},
};

/// Task service type used by the BDD world.
pub type TestTaskService =
    TaskService<InMemoryTaskRepository, InMemoryProjectRepository, DefaultClock>;

/// Project service type used by the BDD world.
pub type TestProjectService = ProjectService<InMemoryProjectRepository, DefaultClock>;

/// Scenario world for listing behaviour tests.
pub struct ListingWorld {
    pub tasks: TestTaskService,
    pub projects: TestProjectService,
    pub project_ids: HashMap<String, ProjectId>,
    pub last_listing: Option<Result<Page<TaskResponse>, TaskServiceError>>,
}

impl ListingWorld {
    /// Creates a world over fresh in-memory stores.
    #[must_use]
    pub fn new() -> Self {
        let task_store = InMemoryTaskRepository::new();
        let project_store = Arc::new(InMemoryProjectRepository::with_task_references(
            task_store.clone(),
        ));
        let clock = Arc::new(DefaultClock);
        Self {
            tasks: TaskService::new(
                Arc::new(task_store),
                Arc::clone(&project_store),
                Arc::clone(&clock),
            ),
            projects: ProjectService::new(project_store, clock),
            project_ids: HashMap::new(),
            last_listing: None,
        }
    }

    /// Returns the last successful listing.
    pub fn listing(&self) -> Result<&Page<TaskResponse>, eyre::Report> {
        let result = self
            .last_listing
            .as_ref()
            .ok_or_else(|| eyre::eyre!("no listing was requested in this scenario"))?;
        result
            .as_ref()
            .map_err(|err| eyre::eyre!("listing failed unexpectedly: {err}"))
    }
}

impl Default for ListingWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> ListingWorld {
    ListingWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
