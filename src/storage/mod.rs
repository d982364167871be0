//! `PostgreSQL` connection pooling and schema bootstrap.
//!
//! Both Postgres adapters share one r2d2 pool. The schema is the single
//! migration under `migrations/`, applied idempotently at start-up when
//! enabled.

use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use thiserror::Error;

/// `PostgreSQL` connection pool type shared by the Postgres adapters.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// DDL creating the `projects` and `tasks` tables and their indexes.
pub const SCHEMA_SQL: &str =
    include_str!("../../migrations/2026-10-01-000000_create_projects_and_tasks/up.sql");

/// Errors raised while preparing database storage.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The pool could not be built or a connection could not be checked out.
    #[error("failed to obtain a database connection: {0}")]
    Pool(#[from] PoolError),

    /// Schema DDL failed to execute.
    #[error("failed to apply database schema: {0}")]
    Schema(#[from] diesel::result::Error),

    /// The blocking bootstrap task did not complete.
    #[error("database bootstrap task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Builds a connection pool for `database_url` holding at most
/// `max_connections` connections.
///
/// The pool connects eagerly, so an unreachable server fails here rather than
/// on the first request.
///
/// # Errors
///
/// Returns [`StorageError::Pool`] when the pool cannot be established.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<PgPool, StorageError> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    let pool = tokio::task::spawn_blocking(move || {
        Pool::builder().max_size(max_connections).build(manager)
    })
    .await??;
    tracing::info!(max_connections, "database pool ready");
    Ok(pool)
}

/// Creates the tables and indexes if they do not exist yet.
///
/// # Errors
///
/// Returns [`StorageError`] when no connection is available or the DDL fails.
pub async fn apply_schema(pool: &PgPool) -> Result<(), StorageError> {
    let shared = pool.clone();
    tokio::task::spawn_blocking(move || -> Result<(), StorageError> {
        let mut connection = shared.get()?;
        connection.batch_execute(SCHEMA_SQL)?;
        Ok(())
    })
    .await??;
    tracing::info!("database schema applied");
    Ok(())
}
