//! # Server Setup
//!
//! Server initialization, route registration, and HTTP server startup.
//!
//! This module provides the main server setup function that loads the
//! configuration, connects the store, builds the token issuer, creates the
//! Axum router with its middleware stack, and serves it.

// region: --- Imports
use std::sync::Arc;

use axum::{
    http::{header::CONTENT_TYPE, HeaderValue, Method, StatusCode},
    middleware,
    routing::{get, post},
    Router,
};
use lib_auth::TokenIssuer;
use lib_core::{create_pool, AppError, Config, DbPool};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::handlers;
use crate::middleware::{log_requests, map_res, require_auth, stamp_req, RequestStamp, AUTH_TOKEN_HEADER};
// endregion: --- Imports

// region: --- AppState
/// Application state shared across all routes.
///
/// Everything here is read-only after startup; cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub config: Config,
    pub tokens: Arc<TokenIssuer>,
}

impl AppState {
    /// Build the state, deriving the token issuer from the configured secret.
    pub fn new(db: DbPool, config: Config) -> Result<Self, AppError> {
        let tokens = TokenIssuer::new(&config.token_secret, config.jwt_expiration_hours)?;

        Ok(Self {
            db,
            config,
            tokens: Arc::new(tokens),
        })
    }
}

impl axum::extract::FromRef<AppState> for Arc<TokenIssuer> {
    fn from_ref(state: &AppState) -> Self {
        state.tokens.clone()
    }
}
// endregion: --- AppState

// region: --- Server Configuration
/// Server configuration not covered by environment variables.
pub struct ServerConfig {
    /// Allowed CORS origins
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ],
        }
    }
}
// endregion: --- Server Configuration

// region: --- Server Setup
fn init_tracing() -> anyhow::Result<()> {
    let log_level = std::env::var("LOG_LEVEL")
        .unwrap_or_else(|_| "info".to_string())
        .to_lowercase();

    let filter = match log_level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => tracing_subscriber::EnvFilter::new(&log_level),
        _ => tracing_subscriber::EnvFilter::new("info"),
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    info!("Log level: {}", log_level);
    Ok(())
}

/// Initialize and start the HTTP server.
///
/// # Errors
///
/// This function will return an error if:
/// - `DATABASE_URL` or `TOKEN_SECRET` is missing, or configuration is invalid
/// - Database connection or migrations fail
/// - Server binding fails
pub async fn start_server(config: ServerConfig) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing()?;

    info!("AUTH API STARTING");

    info!("Loading configuration...");
    let app_config = Config::from_env()?;
    app_config.validate()?;

    info!("Connecting to database...");
    let pool = create_pool(&app_config.database_url).await?;

    let bind_address = app_config.bind_address.clone();
    let state = AppState::new(pool, app_config)?;

    let app = create_router(state, &config.allowed_origins);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;

    info!("SERVER READY: http://{}", bind_address);
    log_server_info();

    axum::serve(listener, app).await?;
    Ok(())
}

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState, allowed_origins: &[String]) -> Router {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, AUTH_TOKEN_HEADER])
        .expose_headers([AUTH_TOKEN_HEADER]);

    let protected = Router::new()
        .route(
            "/api/posts",
            get(handlers::posts::list_posts).post(handlers::posts::create_post),
        )
        .route(
            "/api/posts/{id}",
            get(handlers::posts::get_post)
                .patch(handlers::posts::update_post)
                .delete(handlers::posts::delete_post),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .route("/api/user/register", post(handlers::auth::register))
        .route("/api/user/login", post(handlers::auth::login))
        .route("/health", get(|| async { "OK" }))
        .merge(protected)
        .fallback(|| async { (StatusCode::NOT_FOUND, "Route not found") })
        .with_state(state)
        .layer(middleware::from_fn(map_res))
        .layer(middleware::from_fn(log_requests))
        .layer(
            tower_http::trace::TraceLayer::new_for_http().make_span_with(
                |request: &axum::http::Request<_>| {
                    let request_id = request
                        .extensions()
                        .get::<RequestStamp>()
                        .map(|s| s.id.clone())
                        .unwrap_or_else(|| "unknown".to_string());
                    tracing::info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = %request.method(),
                        uri = %request.uri(),
                    )
                },
            ),
        )
        // Outermost so the stamp exists for the trace span and the logger
        .layer(middleware::from_fn(stamp_req))
        .layer(cors)
}

/// Log server information
fn log_server_info() {
    info!(" AUTH:");
    info!("   • POST /api/user/register");
    info!("   • POST /api/user/login");
    info!(" POSTS (header auth-token required):");
    info!("   • GET    /api/posts");
    info!("   • POST   /api/posts");
    info!("   • GET    /api/posts/{{id}}");
    info!("   • PATCH  /api/posts/{{id}}");
    info!("   • DELETE /api/posts/{{id}}");
    info!(" HEALTH:");
    info!("   • GET  /health");
}
// endregion: --- Server Setup
