//! SOW Engine server binary.

use std::sync::Arc;

use anyhow::Context;
use axum::http::HeaderValue;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use sow_engine::adapters::http::{router, ProposalAppState};
use sow_engine::adapters::{
    HttpTaskTracker, HttpTaskTrackerConfig, InMemoryAssessmentStore, InMemoryCustomerDirectory,
    InMemoryProposalRepository, InMemorySectionRepository, InMemoryVersionRepository,
    PostgresAssessmentStore, PostgresCustomerDirectory, PostgresProposalRepository,
    PostgresSectionRepository, PostgresVersionRepository, TracingEventPublisher,
};
use sow_engine::config::{AppConfig, DatabaseConfig, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    init_tracing(&config.server);
    config.validate().context("invalid configuration")?;

    let task_tracker = HttpTaskTracker::new(HttpTaskTrackerConfig::from(&config.task_tracker))
        .context("failed to build task tracker client")?;

    let state = match &config.database {
        Some(database) => postgres_state(database, Arc::new(task_tracker)).await?,
        None => {
            tracing::warn!("No database configured; proposals are kept in memory only");
            memory_state(Arc::new(task_tracker))
        }
    };

    let app = router(state)
        .layer(TimeoutLayer::new(config.server.request_timeout()))
        .layer(cors_layer(&config.server))
        .layer(TraceLayer::new_for_http());

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    tracing::info!(
        %addr,
        environment = ?config.server.environment,
        "SOW engine listening"
    );

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}

fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    if server.is_production() {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).pretty().init();
    }
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    if origins.is_empty() {
        CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
    } else {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

async fn postgres_state(
    database: &DatabaseConfig,
    task_tracker: Arc<HttpTaskTracker>,
) -> anyhow::Result<ProposalAppState> {
    tracing::info!(url = %database.redacted_url(), "Connecting to database");
    let pool = database
        .pool_options()
        .connect(&database.url)
        .await
        .context("failed to connect to database")?;

    if database.run_migrations {
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("failed to run migrations")?;
        tracing::info!("Database migrations applied");
    }

    Ok(ProposalAppState {
        assessment_store: Arc::new(PostgresAssessmentStore::new(pool.clone())),
        customer_directory: Arc::new(PostgresCustomerDirectory::new(pool.clone())),
        proposal_repository: Arc::new(PostgresProposalRepository::new(pool.clone())),
        section_repository: Arc::new(PostgresSectionRepository::new(pool.clone())),
        version_repository: Arc::new(PostgresVersionRepository::new(pool)),
        task_tracker,
        event_publisher: Arc::new(TracingEventPublisher::new()),
    })
}

fn memory_state(task_tracker: Arc<HttpTaskTracker>) -> ProposalAppState {
    ProposalAppState {
        assessment_store: Arc::new(InMemoryAssessmentStore::new()),
        customer_directory: Arc::new(InMemoryCustomerDirectory::new()),
        proposal_repository: Arc::new(InMemoryProposalRepository::new()),
        section_repository: Arc::new(InMemorySectionRepository::new()),
        version_repository: Arc::new(InMemoryVersionRepository::new()),
        task_tracker,
        event_publisher: Arc::new(TracingEventPublisher::new()),
    }
}
