//! LeadFlow Server - Sales CRM Backend
//!
//! A Rust REST API server for tracking sales leads and daily reports.

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use leadflow_server::{api, config::AppConfig, repository::Repository, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("leadflow_server={},tower_http=debug", config.logging.level).into()
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting LeadFlow Server v{}", env!("CARGO_PKG_VERSION"));

    // Connect to the document store
    let mongo = mongodb::Client::with_uri_str(&config.database.url)
        .await
        .expect("Failed to connect to database");
    let db = mongo.database(&config.database.name);

    tracing::info!("Connected to database '{}'", config.database.name);

    // Create repository and make sure required indexes exist
    let repository = Repository::new(db);
    repository
        .ensure_indexes()
        .await
        .expect("Failed to create database indexes");

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        repository: Arc::new(repository),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(
        server_host.parse().expect("Invalid host address"),
        server_port,
    );

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API routes
    let api_routes = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Client status types
        .route(
            "/client-status-types",
            get(api::status_types::list_client_status_types),
        )
        .route(
            "/client-status-types",
            post(api::status_types::create_client_status_type),
        )
        .route(
            "/client-status-types/:id",
            get(api::status_types::get_client_status_type),
        )
        .route(
            "/client-status-types/:id",
            put(api::status_types::update_client_status_type),
        )
        .route(
            "/client-status-types/:id",
            delete(api::status_types::delete_client_status_type),
        )
        // Action status types
        .route(
            "/action-status-types",
            get(api::status_types::list_action_status_types),
        )
        .route(
            "/action-status-types",
            post(api::status_types::create_action_status_type),
        )
        .route(
            "/action-status-types/:id",
            get(api::status_types::get_action_status_type),
        )
        .route(
            "/action-status-types/:id",
            put(api::status_types::update_action_status_type),
        )
        .route(
            "/action-status-types/:id",
            delete(api::status_types::delete_action_status_type),
        )
        // Clients
        .route("/clients", get(api::clients::list_clients))
        .route("/clients", post(api::clients::create_client))
        .route("/clients/statistics", get(api::clients::get_client_statistics))
        .route("/clients/summary", get(api::clients::get_client_summary))
        .route("/clients/:id", get(api::clients::get_client))
        .route("/clients/:id", put(api::clients::update_client))
        .route("/clients/:id", delete(api::clients::delete_client))
        .route(
            "/clients/:id/comment",
            patch(api::clients::update_client_comment),
        )
        // Daily reports
        .route("/daily-reports", get(api::daily_reports::list_daily_reports))
        .route(
            "/daily-reports",
            post(api::daily_reports::create_daily_report),
        )
        .route(
            "/daily-reports/:id",
            get(api::daily_reports::get_daily_report),
        )
        .route(
            "/daily-reports/:id",
            put(api::daily_reports::update_daily_report),
        )
        .route(
            "/daily-reports/:id",
            delete(api::daily_reports::delete_daily_report),
        )
        .with_state(state);

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api", api_routes)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
