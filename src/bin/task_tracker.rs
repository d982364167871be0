//! Task Tracker HTTP server.
//!
//! Configuration comes from `task-tracker.toml` and `TASK_TRACKER_*`
//! environment variables (see [`task_tracker::config`]). `RUST_LOG`, when
//! set, overrides the configured log filter.

use std::process::ExitCode;
use std::sync::Arc;

use mockable::DefaultClock;
use task_tracker::api::{self, AppState};
use task_tracker::config::{AppConfig, LogConfig, StorageBackend, StorageConfig};
use task_tracker::project::{
    adapters::{memory::InMemoryProjectRepository, postgres::PostgresProjectRepository},
    ports::ProjectRepository,
};
use task_tracker::seed::DemoDataSeeder;
use task_tracker::storage;
use task_tracker::task::{
    adapters::{memory::InMemoryTaskRepository, postgres::PostgresTaskRepository},
    ports::TaskRepository,
};
use tokio::net::TcpListener;
use tokio::signal;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Boxed error type for start-up failures.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

type Repositories = (Arc<dyn TaskRepository>, Arc<dyn ProjectRepository>);

#[tokio::main]
async fn main() -> ExitCode {
    let loaded = AppConfig::load_with_dotenv();
    let log = loaded
        .as_ref()
        .map(|config| config.log.clone())
        .unwrap_or_default();
    init_tracing(&log);

    let config = match loaded {
        Ok(config) => config,
        Err(error) => {
            tracing::error!(%error, "configuration error");
            return ExitCode::FAILURE;
        }
    };

    match run(&config).await {
        Ok(()) => {
            tracing::info!("server shutdown complete");
            ExitCode::SUCCESS
        }
        Err(error) => {
            tracing::error!(%error, "server failed");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(log: &LogConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.filter));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn run(config: &AppConfig) -> Result<(), BoxError> {
    tracing::info!(
        backend = ?config.storage.backend,
        demo_data = config.demo_data.enabled,
        "configuration loaded"
    );

    let (tasks, projects) = open_repositories(&config.storage).await?;

    let seeder = DemoDataSeeder::new(
        Arc::clone(&tasks),
        Arc::clone(&projects),
        Arc::new(DefaultClock),
    );
    let outcome = seeder.seed(config.demo_data.enabled).await?;
    tracing::debug!(?outcome, "demo data step finished");

    let application = api::router(AppState::new(tasks, projects));

    let listener = TcpListener::bind(config.server.bind_address()).await?;
    match listener.local_addr() {
        Ok(address) => tracing::info!(%address, "listening"),
        Err(error) => tracing::warn!(%error, "could not determine local address"),
    }

    axum::serve(listener, application)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn open_repositories(config: &StorageConfig) -> Result<Repositories, BoxError> {
    match config.backend {
        StorageBackend::Memory => {
            let tasks = InMemoryTaskRepository::new();
            let projects = InMemoryProjectRepository::with_task_references(tasks.clone());
            Ok((Arc::new(tasks), Arc::new(projects)))
        }
        StorageBackend::Postgres => {
            let url = config
                .database_url
                .as_deref()
                .ok_or("storage.database_url is required for the postgres backend")?;
            let pool = storage::connect(url, config.max_connections).await?;
            if config.apply_schema {
                storage::apply_schema(&pool).await?;
            }
            Ok((
                Arc::new(PostgresTaskRepository::new(pool.clone())),
                Arc::new(PostgresProjectRepository::new(pool)),
            ))
        }
    }
}

/// Completes on SIGINT (Ctrl+C) or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::warn!(%error, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(error) => {
                tracing::warn!(%error, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
