//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use murmur_cache::RedisPool;
use murmur_common::{AppConfig, AppError};
use murmur_db::{create_pool, PgPostRepository, PgReactionRepository};
use murmur_service::{RateLimiter, ServiceContextBuilder};
use tokio::net::TcpListener;
use tracing::{debug, info};

use crate::middleware::apply_middleware;
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let router = create_router().merge(health_routes());
    let router = apply_middleware(
        router,
        &state.config().cors,
        state.config().app.env.is_production(),
    );
    router.with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    // Create database pool
    info!("Connecting to PostgreSQL...");
    let db_config = murmur_db::DatabaseConfig::from(&config.database);
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    // Create Redis pool
    info!("Connecting to Redis...");
    let redis_pool = RedisPool::from_config(&config.redis)
        .map_err(|e| AppError::Cache(e.to_string()))?;
    let shared_redis = Arc::new(redis_pool);
    info!("Redis connection established");

    // Create repositories
    let post_repo = Arc::new(PgPostRepository::new(pool.clone()));
    let reaction_repo = Arc::new(PgReactionRepository::new(pool.clone()));

    // Submission rate limiter (injected, swept on an interval - see run())
    let rate_limiter = Arc::new(RateLimiter::from_config(&config.rate_limit));

    // Build service context
    let service_context = ServiceContextBuilder::new()
        .pool(pool)
        .redis_pool(shared_redis)
        .post_repo(post_repo)
        .reaction_repo(reaction_repo)
        .rate_limiter(rate_limiter)
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config))
}

/// Spawn the background sweep that keeps the rate-limit table bounded
pub fn spawn_rate_limit_sweeper(state: &AppState) -> tokio::task::JoinHandle<()> {
    let limiter = state.service_context().shared_rate_limiter();
    let interval = Duration::from_secs(state.config().rate_limit.window_secs.max(1));

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.tick().await; // first tick fires immediately; skip it
        loop {
            ticker.tick().await;
            limiter.purge_expired();
            debug!(origins = limiter.tracked_origins(), "Rate-limit table swept");
        }
    })
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {}: {}", addr, e)))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {}", e)))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.api.port));

    // Create app state
    let state = create_app_state(config).await?;

    // Keep the rate-limit table bounded
    let _sweeper = spawn_rate_limit_sweeper(&state);

    // Build application
    let app = create_app(state);

    // Run server
    run_server(app, addr).await
}
