use kenneldesk::bootstrap;
use kenneldesk::config::Config;
use kenneldesk::infrastructure::http::router::build_router;
use kenneldesk::infrastructure::observability;
use kenneldesk::infrastructure::persistence::Database;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize tracing and the Prometheus exporter
    observability::init(&config)?;
    tracing::info!(service = %config.service_name, "Configuration loaded");

    // Initialize database connection
    let db = Database::connect(&config.database_url).await?;
    tracing::info!("Database connection established");

    // Run migrations
    db.run_migrations().await?;
    tracing::info!("Database migrations applied");

    // Build application state (and start background services)
    let state = bootstrap::build_app_state(db, &config).await?;

    // Build router
    let app = build_router(state);

    // Start server
    let addr = config.server_address();
    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
