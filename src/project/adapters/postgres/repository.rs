//! `PostgreSQL` repository implementation for project storage.

use super::{
    models::{NewProjectRow, ProjectChangeset, ProjectRow},
    schema::projects,
};
use crate::project::{
    domain::{
        NewProject, PersistedProjectData, Project, ProjectColor, ProjectDescription, ProjectId,
        ProjectName,
    },
    ports::{ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult},
};
use crate::storage::PgPool;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed project repository.
#[derive(Debug, Clone)]
pub struct PostgresProjectRepository {
    pool: PgPool,
}

impl PostgresProjectRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> ProjectRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> ProjectRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(ProjectRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(ProjectRepositoryError::persistence)?
    }
}

#[async_trait]
impl ProjectRepository for PostgresProjectRepository {
    async fn store(&self, project: &NewProject) -> ProjectRepositoryResult<Project> {
        let name = project.details().name.clone();
        let new_row = to_new_row(project);

        self.run_blocking(move |connection| {
            let row = diesel::insert_into(projects::table)
                .values(&new_row)
                .returning(ProjectRow::as_returning())
                .get_result::<ProjectRow>(connection)
                .map_err(|err| map_write_error(err, &name))?;
            row_to_project(row)
        })
        .await
    }

    async fn update(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let id = project.id();
        let name = project.name().clone();
        let changeset = ProjectChangeset {
            name: name.as_str().to_owned(),
            description: project.description().map(|text| text.as_str().to_owned()),
            color: project.color().map(|text| text.as_str().to_owned()),
            updated_at: project.updated_at(),
        };

        self.run_blocking(move |connection| {
            let updated_count = diesel::update(projects::table.find(id.into_inner()))
                .set(&changeset)
                .execute(connection)
                .map_err(|err| map_write_error(err, &name))?;

            if updated_count == 0 {
                return Err(ProjectRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>> {
        self.run_blocking(move |connection| {
            let row = projects::table
                .find(id.into_inner())
                .select(ProjectRow::as_select())
                .first::<ProjectRow>(connection)
                .optional()
                .map_err(ProjectRepositoryError::persistence)?;
            row.map(row_to_project).transpose()
        })
        .await
    }

    async fn find_by_ids(&self, ids: &[ProjectId]) -> ProjectRepositoryResult<Vec<Project>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let raw_ids: Vec<i64> = ids.iter().map(|id| id.into_inner()).collect();

        self.run_blocking(move |connection| {
            let rows = projects::table
                .filter(projects::id.eq_any(raw_ids))
                .select(ProjectRow::as_select())
                .load::<ProjectRow>(connection)
                .map_err(ProjectRepositoryError::persistence)?;
            rows.into_iter().map(row_to_project).collect()
        })
        .await
    }

    async fn list_all(&self) -> ProjectRepositoryResult<Vec<Project>> {
        self.run_blocking(move |connection| {
            let rows = projects::table
                .order(projects::id.asc())
                .select(ProjectRow::as_select())
                .load::<ProjectRow>(connection)
                .map_err(ProjectRepositoryError::persistence)?;
            rows.into_iter().map(row_to_project).collect()
        })
        .await
    }

    async fn delete(&self, id: ProjectId) -> ProjectRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let deleted_count = diesel::delete(projects::table.find(id.into_inner()))
                .execute(connection)
                .map_err(ProjectRepositoryError::persistence)?;
            if deleted_count == 0 {
                return Err(ProjectRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn count(&self) -> ProjectRepositoryResult<u64> {
        self.run_blocking(move |connection| {
            let total = projects::table
                .count()
                .get_result::<i64>(connection)
                .map_err(ProjectRepositoryError::persistence)?;
            u64::try_from(total).map_err(ProjectRepositoryError::persistence)
        })
        .await
    }
}

/// The name column carries the only unique constraint besides the primary key.
fn map_write_error(err: DieselError, name: &ProjectName) -> ProjectRepositoryError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            ProjectRepositoryError::DuplicateName(name.clone())
        }
        _ => ProjectRepositoryError::persistence(err),
    }
}

fn to_new_row(project: &NewProject) -> NewProjectRow {
    let details = project.details();
    NewProjectRow {
        name: details.name.as_str().to_owned(),
        description: details
            .description
            .as_ref()
            .map(|text| text.as_str().to_owned()),
        color: details.color.as_ref().map(|text| text.as_str().to_owned()),
        created_at: project.created_at(),
        updated_at: project.created_at(),
    }
}

fn row_to_project(row: ProjectRow) -> ProjectRepositoryResult<Project> {
    let ProjectRow {
        id,
        name,
        description,
        color,
        created_at,
        updated_at,
    } = row;

    let data = PersistedProjectData {
        id: ProjectId::new(id),
        name: ProjectName::new(name).map_err(ProjectRepositoryError::persistence)?,
        description: ProjectDescription::parse(description)
            .map_err(ProjectRepositoryError::persistence)?,
        color: ProjectColor::parse(color).map_err(ProjectRepositoryError::persistence)?,
        created_at,
        updated_at,
    };
    Ok(Project::from_persisted(data))
}
