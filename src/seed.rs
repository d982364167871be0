//! Demo data seeding for a fresh store.
//!
//! Runs once at start-up through the repository ports. An existing task set
//! is never touched.

use crate::project::{
    domain::{NewProject, Project, ProjectDetails},
    ports::{ProjectRepository, ProjectRepositoryError},
};
use crate::task::{
    domain::{NewTask, TaskFields, TaskPriority, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError},
};
use crate::validation::FieldViolations;
use chrono::{Days, NaiveDate};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

struct DemoProject {
    name: &'static str,
    description: &'static str,
    color: &'static str,
}

struct DemoTask {
    title: &'static str,
    description: &'static str,
    status: TaskStatus,
    priority: TaskPriority,
    due_in_days: Option<u64>,
    project: usize,
}

const DEMO_PROJECTS: [DemoProject; 3] = [
    DemoProject {
        name: "Task Tracker",
        description: "Tasks for this demo application.",
        color: "#3b82f6",
    },
    DemoProject {
        name: "Master Thesis",
        description: "Writing, experiments and evaluations.",
        color: "#a855f7",
    },
    DemoProject {
        name: "Household",
        description: "Recurring chores and to-dos at home.",
        color: "#22c55e",
    },
];

const DEMO_TASKS: [DemoTask; 4] = [
    DemoTask {
        title: "Add project support to Task Tracker",
        description: "Introduce projects as a way to group tasks in the demo app.",
        status: TaskStatus::InProgress,
        priority: TaskPriority::High,
        due_in_days: Some(3),
        project: 0,
    },
    DemoTask {
        title: "Polish frontend styling",
        description: "Refine table layout, sorting and filters for the task list.",
        status: TaskStatus::Open,
        priority: TaskPriority::Medium,
        due_in_days: Some(7),
        project: 0,
    },
    DemoTask {
        title: "Outline thesis chapters",
        description: "Draft the chapter structure and main research questions.",
        status: TaskStatus::Open,
        priority: TaskPriority::High,
        due_in_days: Some(14),
        project: 1,
    },
    DemoTask {
        title: "Deep clean kitchen",
        description: "Do a thorough clean-up including fridge and oven.",
        status: TaskStatus::Open,
        priority: TaskPriority::Low,
        due_in_days: None,
        project: 2,
    },
];

/// What a seeding run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// Seeding is switched off in configuration.
    Disabled,
    /// The store already held tasks.
    Skipped {
        /// Number of tasks found.
        existing_tasks: u64,
    },
    /// Demo records were written.
    Seeded {
        /// Projects created.
        projects: usize,
        /// Tasks created.
        tasks: usize,
    },
}

/// Errors raised while seeding demo data.
#[derive(Debug, Error)]
pub enum SeedError {
    /// Task storage failed.
    #[error(transparent)]
    Tasks(#[from] TaskRepositoryError),
    /// Project storage failed.
    #[error(transparent)]
    Projects(#[from] ProjectRepositoryError),
    /// A demo record failed validation.
    #[error("invalid demo record: {0}")]
    Invalid(#[from] FieldViolations),
}

/// Writes sample projects and tasks into an empty store.
pub struct DemoDataSeeder<T, P, C>
where
    T: TaskRepository + ?Sized,
    P: ProjectRepository + ?Sized,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    projects: Arc<P>,
    clock: Arc<C>,
}

impl<T, P, C> DemoDataSeeder<T, P, C>
where
    T: TaskRepository + ?Sized,
    P: ProjectRepository + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a seeder over the given stores.
    #[must_use]
    pub const fn new(tasks: Arc<T>, projects: Arc<P>, clock: Arc<C>) -> Self {
        Self {
            tasks,
            projects,
            clock,
        }
    }

    /// Seeds demo data when `enabled` and no task exists yet.
    ///
    /// Due dates are relative to the clock's current UTC date.
    ///
    /// # Errors
    ///
    /// Returns [`SeedError`] when a repository call fails.
    pub async fn seed(&self, enabled: bool) -> Result<SeedOutcome, SeedError> {
        if !enabled {
            tracing::info!("demo data seeding disabled via demo_data.enabled=false");
            return Ok(SeedOutcome::Disabled);
        }

        let existing_tasks = self.tasks.count().await?;
        if existing_tasks > 0 {
            tracing::debug!(existing_tasks, "skipping demo data because tasks already exist");
            return Ok(SeedOutcome::Skipped { existing_tasks });
        }

        tracing::info!("no tasks found, creating demo projects and tasks");
        let mut created = Vec::with_capacity(DEMO_PROJECTS.len());
        for demo in &DEMO_PROJECTS {
            created.push(self.store_project(demo).await?);
        }

        let today = self.clock.utc().date_naive();
        for demo in &DEMO_TASKS {
            self.store_task(demo, created.get(demo.project), today)
                .await?;
        }

        tracing::info!(
            projects = self.projects.count().await?,
            tasks = self.tasks.count().await?,
            "demo data seeding finished"
        );
        Ok(SeedOutcome::Seeded {
            projects: created.len(),
            tasks: DEMO_TASKS.len(),
        })
    }

    async fn store_project(&self, demo: &DemoProject) -> Result<Project, SeedError> {
        let details = ProjectDetails::parse(
            demo.name.to_owned(),
            Some(demo.description.to_owned()),
            Some(demo.color.to_owned()),
        )?;
        let draft = NewProject::new(details, &*self.clock);
        Ok(self.projects.store(&draft).await?)
    }

    async fn store_task(
        &self,
        demo: &DemoTask,
        project: Option<&Project>,
        today: NaiveDate,
    ) -> Result<(), SeedError> {
        let due_date = demo
            .due_in_days
            .and_then(|days| today.checked_add_days(Days::new(days)));
        let fields = TaskFields::parse(
            demo.title.to_owned(),
            Some(demo.description.to_owned()),
            Some(demo.status),
            Some(demo.priority),
            due_date,
            project.map(Project::id),
        )?;
        let draft = NewTask::new(fields, &*self.clock);
        self.tasks.store(&draft).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::adapters::memory::InMemoryProjectRepository;
    use crate::task::adapters::memory::InMemoryTaskRepository;
    use crate::task::domain::{PageRequest, SortDirection, TaskFilter, TaskSort, TaskSortField};
    use chrono::{TimeZone, Utc};
    use mockable::MockClock;
    use rstest::{fixture, rstest};

    type MemorySeeder =
        DemoDataSeeder<InMemoryTaskRepository, InMemoryProjectRepository, MockClock>;

    struct Harness {
        tasks: Arc<InMemoryTaskRepository>,
        projects: Arc<InMemoryProjectRepository>,
        seeder: MemorySeeder,
    }

    #[fixture]
    fn harness() -> Harness {
        let mut clock = MockClock::new();
        clock
            .expect_utc()
            .returning(|| Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).single().expect("valid"));
        let tasks = Arc::new(InMemoryTaskRepository::new());
        let projects = Arc::new(InMemoryProjectRepository::new());
        let seeder = DemoDataSeeder::new(Arc::clone(&tasks), Arc::clone(&projects), Arc::new(clock));
        Harness {
            tasks,
            projects,
            seeder,
        }
    }

    #[rstest]
    #[tokio::test(flavor = "multi_thread")]
    async fn seeds_empty_store(harness: Harness) {
        let outcome = harness.seeder.seed(true).await.expect("seeding succeeds");

        assert_eq!(
            outcome,
            SeedOutcome::Seeded {
                projects: 3,
                tasks: 4
            }
        );
        let projects = harness.projects.list_all().await.expect("list projects");
        let names: Vec<_> = projects.iter().map(|p| p.name().as_str()).collect();
        assert_eq!(names, ["Task Tracker", "Master Thesis", "Household"]);

        let page = PageRequest::new(
            None,
            None,
            TaskSort::new(TaskSortField::Id, SortDirection::Asc),
        );
        let tasks = harness
            .tasks
            .find_page(&TaskFilter::unfiltered(), &page)
            .await
            .expect("list tasks");
        let first = tasks.content().first().expect("first demo task");
        assert_eq!(first.status(), TaskStatus::InProgress);
        assert_eq!(first.due_date(), NaiveDate::from_ymd_opt(2026, 3, 4));
        let last = tasks.content().last().expect("last demo task");
        assert_eq!(last.due_date(), None);
        assert_eq!(last.project_id(), projects.last().map(Project::id));
    }

    #[rstest]
    #[tokio::test(flavor = "multi_thread")]
    async fn skips_when_tasks_exist(harness: Harness) {
        harness.seeder.seed(true).await.expect("first run");

        let outcome = harness.seeder.seed(true).await.expect("second run");

        assert_eq!(outcome, SeedOutcome::Skipped { existing_tasks: 4 });
        assert_eq!(harness.projects.count().await.expect("count"), 3);
    }

    #[rstest]
    #[tokio::test(flavor = "multi_thread")]
    async fn does_nothing_when_disabled(harness: Harness) {
        let outcome = harness.seeder.seed(false).await.expect("disabled run");

        assert_eq!(outcome, SeedOutcome::Disabled);
        assert_eq!(harness.tasks.count().await.expect("count"), 0);
        assert_eq!(harness.projects.count().await.expect("count"), 0);
    }
}
