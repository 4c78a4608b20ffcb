//! Authentication routes

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers;

/// Creates and returns the authentication router
///
/// # Routes
/// - `POST /auth/register` - Email/password registration
/// - `POST /auth/login` - Email/password login
/// - `GET /auth/logout` - Clear the auth cookie
/// - `GET /auth/google` - Start Google OAuth flow
/// - `GET /auth/google/callback` - Google OAuth redirect target
/// - `GET /api/user` - Current user info (bearer token)
/// - `GET /api/token` - Token introspection (AUTH_KEY gated)
pub fn auth_routes() -> Router {
    Router::new()
        .route("/auth/register", post(handlers::register))
        .route("/auth/login", post(handlers::login))
        .route("/auth/logout", get(handlers::logout))
        .route("/auth/google", get(handlers::google_sign_in))
        .route("/auth/google/callback", get(handlers::google_callback))
        .route("/api/user", get(handlers::current_user))
        .route("/api/token", get(handlers::token))
}
