use axum::{
    extract::DefaultBodyLimit,
    routing::get,
    Router,
};
use configuration::settings::Settings;
use configuration::DatabaseSettings;
use database::DbRepository;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod error;
pub mod handlers;

/// The shared application state that all handlers can access.
#[derive(Clone)]
pub struct AppState {
    pub db_repo: DbRepository,
    /// Connection URL with the password masked, as shown by `/api/debug/db`.
    pub connection_url: String,
}

impl AppState {
    pub fn new(db_repo: DbRepository, database: &DatabaseSettings) -> Self {
        Self {
            db_repo,
            connection_url: database.redacted_url(),
        }
    }
}

/// Builds the application router with all routes and middleware attached.
pub fn build_router(state: Arc<AppState>) -> Router {
    // Any origin, method and header; credentials allowed. Origins are mirrored
    // back because a wildcard cannot be combined with credentials.
    let cors = CorsLayer::very_permissive();

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route(
            "/api/coordinates",
            get(handlers::get_latest_coordinates).post(handlers::add_coordinates),
        )
        .route("/api/coordinates/sara", get(handlers::get_sample_coordinates))
        .route("/api/info/db", get(handlers::get_db_info))
        .route("/api/info/api", get(handlers::get_api_info))
        .route("/api/debug/db", get(handlers::get_db_debug))
        .route(
            "/api/child/coordinates",
            get(handlers::get_child_coordinates).post(handlers::add_child_coordinates),
        )
        .with_state(state)
        .layer(cors)
        // This middleware will automatically log information about every incoming request.
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(1024 * 1024))
}

/// The main function to configure and run the web server.
///
/// Tracing must already be initialized by the caller.
pub async fn run_server(settings: &Settings) -> anyhow::Result<()> {
    let addr = settings.bind_addr()?;
    let db_settings = settings.database()?;
    let db_pool = database::connect(&db_settings)?;
    let app_state = Arc::new(AppState::new(DbRepository::new(db_pool), &db_settings));

    let app = build_router(app_state);

    tracing::info!(database = %db_settings.redacted_url(), "Web server started and listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Web server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for the shutdown signal.");
        std::future::pending::<()>().await;
    }
}
