//! Tests for auth module
//!
//! These tests verify core authentication functionality including:
//! - JWT issuance and verification
//! - Token forgery resistance
//! - Claims and model structure
//! - The login handler's credential-check short-circuit order

#[cfg(test)]
mod tests {
    use super::super::*;
    use chrono::Utc;
    use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};

    #[test]
    fn test_claims_structure() {
        let claims = models::Claims {
            authorized: true,
            user: 42,
            exp: 1234567890,
        };

        assert!(claims.authorized);
        assert_eq!(claims.user, 42);
        assert_eq!(claims.exp, 1234567890);
    }

    #[test]
    fn test_issue_and_verify_round_trip() {
        let secret = "test_secret_key";
        let token = tokens::issue(7, secret).expect("Failed to issue token");

        let user_id = tokens::verify(&token, secret).expect("Failed to verify token");
        assert_eq!(user_id, 7);
    }

    #[test]
    fn test_verify_fails_with_wrong_secret() {
        let token = tokens::issue(7, "test_secret_key").expect("Failed to issue token");

        let result = tokens::verify(&token, "wrong_secret_key");
        assert!(
            result.is_err(),
            "Token verification should fail with wrong secret"
        );
    }

    #[test]
    fn test_verify_rejects_expired_token() {
        // Hand-build a token that expired an hour ago
        let secret = "test_secret_key";
        let claims = models::Claims {
            authorized: true,
            user: 7,
            exp: (Utc::now().timestamp() - 3600) as usize,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .expect("Failed to encode token");

        assert!(tokens::verify(&token, secret).is_err());
    }

    #[test]
    fn test_verify_rejects_unsigned_algorithm() {
        // A token whose header claims a different algorithm must not validate
        let secret = "test_secret_key";
        let claims = models::Claims {
            authorized: true,
            user: 7,
            exp: (Utc::now().timestamp() + 3600) as usize,
        };
        let token = encode(
            &Header::new(Algorithm::HS384),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .expect("Failed to encode token");

        assert!(
            tokens::verify(&token, secret).is_err(),
            "Non-HS256 tokens must be rejected"
        );
    }

    #[test]
    fn test_verify_rejects_tampered_token() {
        let secret = "test_secret_key";
        let token = tokens::issue(7, secret).expect("Failed to issue token");

        // Flip a character in the signature segment
        let mut tampered = token.clone();
        let last = tampered.pop().expect("token is not empty");
        tampered.push(if last == 'A' { 'B' } else { 'A' });

        assert!(tokens::verify(&tampered, secret).is_err());
    }

    #[test]
    fn test_user_model_structure() {
        let user = models::User {
            id: 1,
            full_name: "Test User".to_string(),
            email: "test@example.com".to_string(),
            password: "$2b$12$hash".to_string(),
            login_method: "email".to_string(),
            created_at: Some("2024-01-01".to_string()),
        };

        assert_eq!(user.id, 1);
        assert_eq!(user.email, "test@example.com");
        assert_eq!(user.login_method, "email");
    }

    #[test]
    fn test_user_serialization_skips_password() {
        let user = models::User {
            id: 1,
            full_name: "Test User".to_string(),
            email: "test@example.com".to_string(),
            password: "$2b$12$hash".to_string(),
            login_method: "email".to_string(),
            created_at: None,
        };

        let json = serde_json::to_value(&user).expect("Failed to serialize user");
        assert!(json.get("password").is_none());
        assert_eq!(json["email"], "test@example.com");
    }
}

#[cfg(test)]
mod handler_tests {
    use axum::body::{to_bytes, Body};
    use axum::extract::Extension;
    use axum::http::{Request, StatusCode};
    use sqlx::sqlite::SqlitePoolOptions;
    use std::sync::Arc;
    use tokio::sync::RwLock;
    use tower::ServiceExt;

    use super::super::{auth_routes, password, tokens};
    use crate::common::{migrations, AppState};
    use crate::services::google::GoogleConfig;
    use crate::services::{GoogleService, OAuthStateService};

    const TEST_SECRET: &str = "test_secret_key";

    /// Router over an in-memory database seeded with one email-method user
    /// ("a@x.com"/"p1") and one google-method user ("g@x.com")
    async fn test_app() -> axum::Router {
        // one connection so every query sees the same in-memory database
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to open in-memory database");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        let hashed = password::hash_password("p1").expect("Failed to hash password");
        for (name, email, pw, method) in [
            ("Ann", "a@x.com", hashed.as_str(), "email"),
            ("Greta", "g@x.com", "placeholder", "google"),
        ] {
            sqlx::query(
                "INSERT INTO users (full_name, email, password, login_method) VALUES (?, ?, ?, ?)",
            )
            .bind(name)
            .bind(email)
            .bind(pw)
            .bind(method)
            .execute(&pool)
            .await
            .expect("Failed to seed user");
        }

        let state = AppState {
            db: pool,
            jwt_secret: TEST_SECRET.to_string(),
            auth_key: None,
            frontend_url: "http://localhost:3000".to_string(),
            google_service: Arc::new(GoogleService::new(GoogleConfig {
                client_id: String::new(),
                client_secret: String::new(),
                redirect_url: String::new(),
            })),
            oauth_state_service: Arc::new(OAuthStateService::new()),
        };

        auth_routes().layer(Extension(Arc::new(RwLock::new(state))))
    }

    fn login_request(email: &str, password: &str) -> Request<Body> {
        let body = serde_json::json!({ "email": email, "password": password });
        Request::builder()
            .method("POST")
            .uri("/auth/login")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .expect("Failed to build request")
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        serde_json::from_slice(&bytes).expect("Body is not JSON")
    }

    #[tokio::test]
    async fn test_login_success_issues_token_for_stored_user() {
        let app = test_app().await;

        let response = app
            .oneshot(login_request("a@x.com", "p1"))
            .await
            .expect("Request failed");
        assert_eq!(response.status(), StatusCode::ACCEPTED);

        let body = json_body(response).await;
        assert_eq!(body["message"], "authorized");

        // the token's verified subject is the seeded user id
        let token = body["token"].as_str().expect("token missing from body");
        let user_id = tokens::verify(token, TEST_SECRET).expect("Failed to verify issued token");
        assert_eq!(user_id, 1);
    }

    #[tokio::test]
    async fn test_login_unknown_email_is_unauthorized() {
        let app = test_app().await;

        let response = app
            .oneshot(login_request("nobody@x.com", "p1"))
            .await
            .expect("Request failed");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = json_body(response).await;
        assert_eq!(body["error"], "Email is not registered");
        assert!(body.get("token").is_none());
    }

    #[tokio::test]
    async fn test_login_wrong_password_is_unauthorized() {
        let app = test_app().await;

        let response = app
            .oneshot(login_request("a@x.com", "wrong"))
            .await
            .expect("Request failed");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = json_body(response).await;
        assert_eq!(body["error"], "Invalid password");
        assert!(body.get("token").is_none());
    }

    #[tokio::test]
    async fn test_login_google_account_gets_method_guidance() {
        let app = test_app().await;

        // wrong method short-circuits before the password check, so even the
        // stored placeholder value never validates
        let response = app
            .oneshot(login_request("g@x.com", "placeholder"))
            .await
            .expect("Request failed");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = json_body(response).await;
        let message = body["error"].as_str().expect("error missing from body");
        assert!(message.contains("Google"));
        assert!(body.get("token").is_none());
    }

    #[tokio::test]
    async fn test_logout_removal_cookie_keeps_login_attributes() {
        let app = test_app().await;

        let request = Request::builder()
            .method("GET")
            .uri("/auth/logout")
            .body(Body::empty())
            .expect("Failed to build request");
        let response = app.oneshot(request).await.expect("Request failed");
        assert_eq!(response.status(), StatusCode::OK);

        let set_cookie = response
            .headers()
            .get("set-cookie")
            .and_then(|h| h.to_str().ok())
            .expect("logout must set a removal cookie");
        assert!(set_cookie.starts_with("jwt="));
        assert!(set_cookie.contains("SameSite=None"));
        assert!(set_cookie.contains("HttpOnly"));
        assert!(set_cookie.contains("Path=/"));
    }
}
