// Application state shared across all modules

use sqlx::SqlitePool;
use std::sync::Arc;

use crate::services::{GoogleService, OAuthStateService};

/// Application state containing database pool, services, and configuration
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub jwt_secret: String,
    pub auth_key: Option<String>,
    pub frontend_url: String,
    pub google_service: Arc<GoogleService>,
    pub oauth_state_service: Arc<OAuthStateService>,
}
