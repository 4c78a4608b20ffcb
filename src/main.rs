// src/main.rs
use axum::{extract::Extension, middleware, Router};
use dotenv::dotenv;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::env;
use std::path::PathBuf;
use std::{net::SocketAddr, str::FromStr, sync::Arc};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod auth;
mod common;
mod entities;
mod logging_middleware;
mod services;

use common::AppState;
use services::google::GoogleConfig;
use services::{GoogleService, OAuthStateService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    // ========================================================================
    // ENVIRONMENT CONFIGURATION
    // ========================================================================

    let database_url =
        env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://linkvault.db".to_string());

    // Misconfigured signing secret must never serve traffic
    let jwt_secret = env::var("JWT_KEY")
        .map_err(|_| anyhow::anyhow!("JWT_KEY environment variable is required"))?;

    let auth_key = env::var("AUTH_KEY").ok();
    if auth_key.is_none() {
        warn!("AUTH_KEY not set; token introspection endpoint disabled");
    }

    let frontend_url =
        env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());

    // ========================================================================
    // DATABASE SETUP
    // ========================================================================

    if let Some(path_part) = database_url.strip_prefix("sqlite://") {
        let path_without_params = path_part.split('?').next().unwrap_or("");
        if !path_without_params.is_empty() && !path_without_params.starts_with(':') {
            let db_path = PathBuf::from(path_without_params);
            if let Some(parent) = db_path.parent() {
                if !parent.as_os_str().is_empty() {
                    tokio::fs::create_dir_all(parent).await?;
                }
            }
        }
    }

    let connect_options = SqliteConnectOptions::from_str(&database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .connect_with(connect_options)
        .await?;

    common::migrations::run_migrations(&pool).await?;

    // ========================================================================
    // SERVICE INITIALIZATION
    // ========================================================================

    let google_service = match GoogleConfig::from_env() {
        Ok(config) => Arc::new(GoogleService::new(config)),
        Err(e) => {
            warn!(error = %e, "Google OAuth not configured; sign-in via Google will fail");
            Arc::new(GoogleService::new(GoogleConfig {
                client_id: String::new(),
                client_secret: String::new(),
                redirect_url: String::new(),
            }))
        }
    };
    info!("GoogleService initialized");

    let oauth_state_service = Arc::new(OAuthStateService::new());
    info!("OAuthStateService initialized");

    // ========================================================================
    // APPLICATION STATE
    // ========================================================================

    let app_state = AppState {
        db: pool,
        jwt_secret,
        auth_key,
        frontend_url,
        google_service,
        oauth_state_service,
    };

    let shared = Arc::new(RwLock::new(app_state));

    // ========================================================================
    // ROUTER COMPOSITION
    // ========================================================================

    let app = Router::new()
        .merge(auth::auth_routes())
        .merge(entities::entities_routes())
        // Add request/response body logging in debug mode
        .layer(middleware::from_fn(logging_middleware::log_request_response))
        .layer(Extension(shared.clone()))
        .layer({
            let cors_origins = std::env::var("CORS_ORIGINS")
                .unwrap_or_else(|_| "http://localhost:3000,http://localhost:5173".to_string());

            let origins: Vec<axum::http::HeaderValue> = cors_origins
                .split(',')
                .filter_map(|origin| origin.trim().parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods([
                    axum::http::Method::GET,
                    axum::http::Method::POST,
                    axum::http::Method::PUT,
                    axum::http::Method::DELETE,
                    axum::http::Method::OPTIONS,
                ])
                .allow_headers([
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::AUTHORIZATION,
                ])
                .allow_credentials(true)
        })
        .layer(TraceLayer::new_for_http());

    // ========================================================================
    // SERVER STARTUP
    // ========================================================================

    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8080);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
