//! Shared helpers for `PostgreSQL` integration tests.
//!
//! Each test gets its own database, created on the server named by
//! [`DATABASE_URL_VAR`] and dropped again when the handle goes out of scope.

use diesel::pg::PgConnection;
use diesel::prelude::*;
use mockable::DefaultClock;
use task_tracker::project::{
    adapters::postgres::PostgresProjectRepository,
    domain::{NewProject, Project, ProjectDetails},
    ports::ProjectRepository,
};
use task_tracker::storage::{self, PgPool};
use task_tracker::task::adapters::postgres::PostgresTaskRepository;
use uuid::Uuid;

/// Environment variable holding an administrative connection URL.
pub const DATABASE_URL_VAR: &str = "TASK_TRACKER_TEST_DATABASE_URL";

/// Database created for a single test and dropped on drop.
pub struct TemporaryDatabase {
    admin_url: String,
    name: String,
    pool: Option<PgPool>,
}

impl TemporaryDatabase {
    /// Returns a repository for tasks in this database.
    #[must_use]
    pub fn tasks(&self) -> PostgresTaskRepository {
        PostgresTaskRepository::new(self.pool().clone())
    }

    /// Returns a repository for projects in this database.
    #[must_use]
    pub fn projects(&self) -> PostgresProjectRepository {
        PostgresProjectRepository::new(self.pool().clone())
    }

    /// Returns the pool connected to this database.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        self.pool.as_ref().expect("pool is present until drop")
    }
}

impl Drop for TemporaryDatabase {
    fn drop(&mut self) {
        drop(self.pool.take());
        let statement = format!(r#"DROP DATABASE IF EXISTS "{}" WITH (FORCE)"#, self.name);
        let outcome = tokio::task::block_in_place(|| {
            PgConnection::establish(&self.admin_url)
                .map_err(|err| err.to_string())
                .and_then(|mut connection| {
                    diesel::sql_query(statement)
                        .execute(&mut connection)
                        .map_err(|err| err.to_string())
                })
        });
        if let Err(err) = outcome {
            tracing::warn!(database = %self.name, error = %err, "failed to drop test database");
        }
    }
}

/// Creates a fresh database with the schema applied.
///
/// Returns `None` when [`DATABASE_URL_VAR`] is unset so the calling test can
/// return early.
pub async fn temporary_database() -> Option<TemporaryDatabase> {
    let Ok(admin_url) = std::env::var(DATABASE_URL_VAR) else {
        tracing::warn!("{DATABASE_URL_VAR} is not set; skipping PostgreSQL test");
        return None;
    };
    let name = format!("task_tracker_test_{}", Uuid::new_v4().simple());

    let create_url = admin_url.clone();
    let create_statement = format!(r#"CREATE DATABASE "{name}""#);
    tokio::task::spawn_blocking(move || {
        let mut connection =
            PgConnection::establish(&create_url).expect("connect to administrative database");
        diesel::sql_query(create_statement)
            .execute(&mut connection)
            .expect("create test database");
    })
    .await
    .expect("database creation task completes");

    let pool = storage::connect(&database_url(&admin_url, &name), 4)
        .await
        .expect("connect to test database");
    storage::apply_schema(&pool)
        .await
        .expect("apply schema to test database");

    Some(TemporaryDatabase {
        admin_url,
        name,
        pool: Some(pool),
    })
}

/// Replaces the database segment of a connection URL.
#[must_use]
pub fn database_url(base: &str, database: &str) -> String {
    let (location, query) = match base.split_once('?') {
        Some((location, query)) => (location, Some(query)),
        None => (base, None),
    };
    let server = location
        .rsplit_once('/')
        .map_or(location, |(server, _)| server);
    match query {
        Some(params) => format!("{server}/{database}?{params}"),
        None => format!("{server}/{database}"),
    }
}

/// Stores a project with only a name.
pub async fn store_project(repository: &impl ProjectRepository, name: &str) -> Project {
    let details = ProjectDetails::parse(name.to_owned(), None, None).expect("valid project");
    repository
        .store(&NewProject::new(details, &DefaultClock))
        .await
        .expect("project stored")
}
