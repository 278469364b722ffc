//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::sync::Arc;

use axum::Router;
use gateway_common::{AppConfig, AppError, JwtService, PasswordService};
use gateway_db::{
    create_pool, run_migrations, PgApplicationRepository, PgAuditLogRepository,
    PgSessionRepository, PgUserRepository,
};
use gateway_service::ServiceContextBuilder;
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::{apply_middleware, gate};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let cors_config = state.config().cors.clone();
    let is_production = state.config().app.env.is_production();

    // The gate layer is added first so it sits innermost, directly in front
    // of routing, and its redirects still flow back out through tracing and
    // CORS.
    let router = create_router()
        .merge(health_routes())
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            gate::access_gate,
        ));
    let router = apply_middleware(router, &cors_config, is_production);

    router.with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    // Create database pool
    info!("Connecting to PostgreSQL...");
    let db_config = gateway_db::DatabaseConfig::new(&config.database.url)
        .with_connections(config.database.max_connections, config.database.min_connections);
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    // Apply pending migrations
    run_migrations(&pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("Database migrations applied");

    // Create token and password services
    let jwt_service = Arc::new(JwtService::new(
        &config.auth.jwt_secret,
        config.auth.access_token_expiry,
    ));
    let password_service = Arc::new(PasswordService::new());

    // Create repositories
    let user_repo = Arc::new(PgUserRepository::new(pool.clone()));
    let session_repo = Arc::new(PgSessionRepository::new(pool.clone()));
    let application_repo = Arc::new(PgApplicationRepository::new(pool.clone()));
    let audit_repo = Arc::new(PgAuditLogRepository::new(pool.clone()));

    // Build service context
    let service_context = ServiceContextBuilder::new()
        .user_repo(user_repo)
        .session_repo(session_repo)
        .application_repo(application_repo)
        .audit_repo(audit_repo)
        .jwt_service(jwt_service)
        .password_service(password_service)
        .refresh_ttl_seconds(config.auth.refresh_token_expiry)
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config, pool))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: &str) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.server.address();

    // Create app state
    let state = create_app_state(config).await?;

    // Build application
    let app = create_app(state);

    // Run server
    run_server(app, &addr).await
}
