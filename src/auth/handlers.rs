//! Authentication handlers

use axum::extract::{Extension, Json, Query};
use axum::http::{header::AUTHORIZATION, HeaderMap, StatusCode};
use axum::response::Redirect;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use super::extractors::AuthedUser;
use super::models::{LoginRequest, RegisterRequest, User};
use super::password::{self, PasswordError};
use super::tokens;
use crate::common::{safe_email_log, ApiError, AppState};

const AUTH_COOKIE: &str = "jwt";
const OAUTH_SESSION_COOKIE: &str = "oauth_session";

/// Login methods stored on the user record
const METHOD_EMAIL: &str = "email";
const METHOD_GOOGLE: &str = "google";

/// Build the auth cookie carrying a freshly issued token
fn auth_cookie(token: String) -> Cookie<'static> {
    Cookie::build((AUTH_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::None)
        .max_age(time::Duration::hours(24))
        .build()
}

/// POST /auth/register
/// Registers a new email/password account
///
/// # Request Body
/// ```json
/// {
///   "fullname": "Ann",
///   "email": "a@x.com",
///   "password": "p1"
/// }
/// ```
pub async fn register(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let state = state_lock.read().await.clone();

    let hashed = password::hash_password(&payload.password).map_err(|e| {
        error!(error = %e, "Password hashing failed during registration");
        ApiError::InternalServer("registration failed".to_string())
    })?;

    if let Err(e) = sqlx::query(
        "INSERT INTO users (full_name, email, password, login_method) VALUES (?, ?, ?, ?)",
    )
    .bind(&payload.fullname)
    .bind(&payload.email)
    .bind(&hashed)
    .bind(METHOD_EMAIL)
    .execute(&state.db)
    .await
    {
        if e.as_database_error()
            .map(|db| db.is_unique_violation())
            .unwrap_or(false)
        {
            warn!(
                email = %safe_email_log(&payload.email),
                "Registration rejected: email already in use"
            );
            return Err(ApiError::BadRequest("This email is already in use".to_string()));
        }
        error!(error = %e, "Database error inserting new user");
        return Err(ApiError::DatabaseError(e));
    }

    info!(
        email = %safe_email_log(&payload.email),
        "New user account registered"
    );

    // Public fields only, never the password hash
    let resp = serde_json::json!({
        "fullname": payload.fullname,
        "email": payload.email,
    });

    Ok(Json(resp))
}

/// POST /auth/login
/// Email/password login
///
/// Each check short-circuits with its own caller-visible error: unknown
/// email, wrong login method, then wrong password. Success responds 202 with
/// the token in both the body and the `jwt` cookie.
pub async fn login(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    jar: CookieJar,
    Json(payload): Json<LoginRequest>,
) -> Result<(StatusCode, CookieJar, Json<serde_json::Value>), ApiError> {
    let state = state_lock.read().await.clone();

    let user: Option<User> = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
        .bind(&payload.email)
        .fetch_optional(&state.db)
        .await
        .map_err(|e| {
            error!(error = %e, "Database error during login lookup");
            ApiError::DatabaseError(e)
        })?;

    let user = match user {
        Some(u) => u,
        None => {
            warn!(
                email = %safe_email_log(&payload.email),
                "Login failed: email not registered"
            );
            return Err(ApiError::Unauthorized("Email is not registered".to_string()));
        }
    };

    if user.login_method != METHOD_EMAIL {
        warn!(
            email = %safe_email_log(&payload.email),
            login_method = %user.login_method,
            "Login failed: wrong login method"
        );
        return Err(ApiError::Unauthorized(
            "This email already registered using Google Authentication. Please use Google to sign in using this email"
                .to_string(),
        ));
    }

    if let Err(e) = password::verify_password(&user.password, &payload.password) {
        return match e {
            PasswordError::Mismatch => {
                warn!(
                    email = %safe_email_log(&payload.email),
                    "Login failed: invalid password"
                );
                Err(ApiError::Unauthorized("Invalid password".to_string()))
            }
            PasswordError::Hash(e) => {
                error!(error = %e, "Password verification failed with non-mismatch error");
                Err(ApiError::BadRequest("Unknown error".to_string()))
            }
        };
    }

    let token = tokens::issue(user.id, &state.jwt_secret)?;

    info!(
        user_id = user.id,
        email = %safe_email_log(&user.email),
        "User login successful"
    );

    let jar = jar.add(auth_cookie(token.clone()));

    let resp = serde_json::json!({
        "message": "authorized",
        "token": token,
    });

    Ok((StatusCode::ACCEPTED, jar, Json(resp)))
}

/// GET /auth/logout
/// Clears the auth cookie. Tokens stay cryptographically valid until natural
/// expiry; only the client-held artifact is discarded.
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<serde_json::Value>) {
    info!("User logout, clearing auth cookie");
    let resp = serde_json::json!({
        "message": "successfully logged out"
    });
    // removal must carry the same attributes as the login cookie or
    // cross-site browsers will not apply it
    let removal = Cookie::build(AUTH_COOKIE)
        .path("/")
        .http_only(true)
        .same_site(SameSite::None);
    (jar.remove(removal), Json(resp))
}

/// GET /api/user
/// Returns the authenticated user's public identity
pub async fn current_user(authed: AuthedUser) -> Json<serde_json::Value> {
    let resp = serde_json::json!({
        "email": authed.email,
        "name": authed.full_name,
    });
    Json(resp)
}

/// GET /api/token
/// Token introspection gated by the static AUTH_KEY shared secret; returns
/// the caller's current `jwt` cookie value
pub async fn token(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    headers: HeaderMap,
    jar: CookieJar,
) -> Result<Json<serde_json::Value>, ApiError> {
    let state = state_lock.read().await.clone();

    let auth_key = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(|s| s.strip_prefix("Bearer ").unwrap_or(s))
        .unwrap_or_default();

    let expected = state
        .auth_key
        .as_deref()
        .ok_or_else(|| ApiError::Unauthorized("not authorized".to_string()))?;

    if auth_key != expected {
        warn!("Token introspection rejected: bad auth key");
        return Err(ApiError::Unauthorized("not authorized".to_string()));
    }

    let cookie = jar
        .get(AUTH_COOKIE)
        .map(|c| c.value().to_string())
        .unwrap_or_default();

    let resp = serde_json::json!({
        "message": "ok",
        "token": cookie,
    });

    Ok(Json(resp))
}

/// GET /auth/google
/// Starts the Google OAuth flow: stores a fresh anti-CSRF nonce server-side,
/// keyed by the client's `oauth_session` cookie, and returns the provider
/// authorization URL carrying that nonce as `state`
pub async fn google_sign_in(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<serde_json::Value>), ApiError> {
    let state = state_lock.read().await.clone();

    let (session_id, jar) = match jar.get(OAUTH_SESSION_COOKIE) {
        Some(c) => (c.value().to_string(), jar),
        None => {
            let session_id = Uuid::new_v4().to_string();
            let cookie = Cookie::build((OAUTH_SESSION_COOKIE, session_id.clone()))
                .path("/")
                .http_only(true)
                .same_site(SameSite::Lax)
                .build();
            (session_id, jar.add(cookie))
        }
    };

    let nonce = Uuid::new_v4().to_string();
    state.oauth_state_service.store(&session_id, &nonce).await;

    let url = state.google_service.authorization_url(&nonce).map_err(|e| {
        error!(error = %e, "Failed to build Google authorization URL");
        ApiError::InternalServer("failed to start Google sign in".to_string())
    })?;

    debug!(session_id = %session_id, "Stored OAuth state nonce for session");

    let resp = serde_json::json!({ "url": url });

    Ok((jar, Json(resp)))
}

/// Query parameters Google sends back on the OAuth redirect
#[derive(Debug, Deserialize)]
pub struct GoogleCallbackQuery {
    pub state: Option<String>,
    pub code: Option<String>,
}

/// GET /auth/google/callback
/// Completes the OAuth flow: validates the state nonce, exchanges the code,
/// fetches the verified email/name pair, resolves or auto-registers the
/// account, then issues a token and redirects to the front end
pub async fn google_callback(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    jar: CookieJar,
    Query(params): Query<GoogleCallbackQuery>,
) -> Result<(CookieJar, Redirect), ApiError> {
    let state = state_lock.read().await.clone();
    let frontend_url = state.frontend_url.clone();

    // Nonce consumption is fetch-and-delete; a replayed callback never matches
    let stored_nonce = match jar.get(OAUTH_SESSION_COOKIE) {
        Some(c) => state.oauth_state_service.consume(c.value()).await,
        None => None,
    };

    let nonce_valid = match (&stored_nonce, &params.state) {
        (Some(stored), Some(query)) => stored == query,
        _ => false,
    };

    if !nonce_valid {
        warn!("OAuth callback state mismatch, aborting without issuing token");
        return Ok((jar, Redirect::to(&frontend_url)));
    }

    let code = params.code.unwrap_or_default();

    let token_response = state.google_service.exchange_code(&code).await.map_err(|e| {
        error!(error = %e, "Google token exchange failed");
        ApiError::InternalServer("token exchange failed".to_string())
    })?;

    let userinfo = state
        .google_service
        .fetch_userinfo(&token_response.access_token)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to fetch Google userinfo");
            ApiError::InternalServer("failed to get user info".to_string())
        })?;

    let existing: Option<User> = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
        .bind(&userinfo.email)
        .fetch_optional(&state.db)
        .await
        .map_err(|e| {
            error!(error = %e, "Database error resolving OAuth account");
            ApiError::DatabaseError(e)
        })?;

    let user_id = match existing {
        None => {
            // Implicit registration: the placeholder password is random and
            // never disclosed, so the account is only reachable via Google
            let placeholder = password::hash_password(&Uuid::new_v4().to_string())
                .map_err(|e| {
                    error!(error = %e, "Password hashing failed during OAuth registration");
                    ApiError::InternalServer("registration failed".to_string())
                })?;

            let result = sqlx::query(
                "INSERT INTO users (full_name, email, password, login_method) VALUES (?, ?, ?, ?)",
            )
            .bind(&userinfo.name)
            .bind(&userinfo.email)
            .bind(&placeholder)
            .bind(METHOD_GOOGLE)
            .execute(&state.db)
            .await
            .map_err(|e| {
                error!(error = %e, "Database error inserting OAuth user");
                ApiError::DatabaseError(e)
            })?;

            info!(
                email = %safe_email_log(&userinfo.email),
                "New user account created via Google OAuth"
            );

            result.last_insert_rowid()
        }
        Some(u) if u.login_method != METHOD_GOOGLE => {
            warn!(
                email = %safe_email_log(&userinfo.email),
                login_method = %u.login_method,
                "OAuth sign-in rejected: account uses email/password"
            );
            let url = format!("{}/auth/wrongMethod", frontend_url);
            return Ok((jar, Redirect::to(&url)));
        }
        Some(u) => u.id,
    };

    let token = tokens::issue(user_id, &state.jwt_secret)?;

    info!(user_id = user_id, "User authentication successful via Google OAuth");

    Ok((jar.add(auth_cookie(token)), Redirect::to(&frontend_url)))
}
