//! Inventra Server - IT Asset Inventory
//!
//! A Rust REST API server for tracking IT assets and their assignments.

use axum::{
    routing::{get, post, put},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use inventra_server::{api, config::AppConfig, repository::Repository, services::Services, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("inventra_server={},tower_http=debug", config.logging.level).into()
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Inventra Server v{}", env!("CARGO_PKG_VERSION"));

    if config.auth.enforce {
        tracing::warn!(
            "auth.enforce is set but enforcement is not implemented; all endpoints remain open"
        );
    } else {
        tracing::warn!("authentication enforcement is disabled; the API is open");
    }

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations completed");

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create repository and services
    let repository = Repository::new(pool);
    let services = Services::new(repository, config.auth.clone());

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(server_host.parse().expect("Invalid host address"), server_port);

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

    let routes = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Authentication placeholder
        .route("/auth/login", post(api::auth::login))
        .route("/auth/me", get(api::auth::me))
        // Users
        .route("/users", get(api::users::list_users))
        .route("/users", post(api::users::create_user))
        .route("/users/:id", get(api::users::get_user))
        .route("/users/:id", put(api::users::update_user))
        // Device types
        .route("/device-types", get(api::device_types::list_device_types))
        .route("/device-types", post(api::device_types::create_device_type))
        .route("/device-types/:id", get(api::device_types::get_device_type))
        .route("/device-types/:id", put(api::device_types::update_device_type))
        // Purchases
        .route("/purchases", get(api::purchases::list_purchases))
        .route("/purchases", post(api::purchases::create_purchase))
        .route("/purchases/:id", get(api::purchases::get_purchase))
        .route("/purchases/:id", put(api::purchases::update_purchase))
        // Devices
        .route("/devices", get(api::devices::list_devices))
        .route("/devices", post(api::devices::create_device))
        .route("/devices/:id", get(api::devices::get_device))
        .route("/devices/:id", put(api::devices::update_device))
        .route("/devices/:id/retire", put(api::devices::retire_device))
        // Assignments
        .route("/assignments", get(api::assignments::list_assignments))
        .route("/assignments", post(api::assignments::create_assignment))
        .route("/assignments/:id", get(api::assignments::get_assignment))
        .route("/assignments/:id", put(api::assignments::update_assignment))
        .route("/assignments/:id/return", put(api::assignments::return_device))
        // Reports
        .route("/reports/devices-by-type", get(api::reports::devices_by_type))
        .route("/reports/device-status", get(api::reports::device_status))
        .route("/reports/user-assignments", get(api::reports::user_assignments))
        .route(
            "/reports/expiring-warranties",
            get(api::reports::expiring_warranties),
        )
        .with_state(state);

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .merge(routes)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
