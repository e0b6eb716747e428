use bulletproof::bootstrap;
use bulletproof::config::Config;
use bulletproof::infrastructure::http::router::build_router;
use bulletproof::infrastructure::persistence::Database;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bulletproof=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!("Configuration loaded");

    // Initialize database connection
    let db = Database::connect(&config.database_url).await?;
    tracing::info!("Database connection established");

    // Run migrations
    db.run_migrations().await?;
    tracing::info!("Database migrations applied");

    if let Some(seed) = &config.admin {
        bootstrap::initialize_admin(&db, seed).await?;
    }

    let state = bootstrap::build_app_state(db, &config);
    state
        .session_service
        .spawn_cleanup_task(Duration::from_secs(config.session_cleanup_interval_secs));

    let app = build_router(state);

    // Start server
    let addr = config.server_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
