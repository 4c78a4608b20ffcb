// src/services/google.rs
//
// OAuth exchange adapter for Google. Drives the authorization-code flow:
// builds the consent URL, exchanges the code for an access token and fetches
// the verified email/name pair from the userinfo endpoint.

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, error};

const TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";
const USERINFO_ENDPOINT: &str = "https://www.googleapis.com/oauth2/v2/userinfo";

#[derive(Debug, Error)]
pub enum GoogleError {
    #[error("Google OAuth not configured")]
    NotConfigured,

    #[error("OAuth flow failed: {0}")]
    OAuthFailed(String),

    #[error("HTTP request failed: {0}")]
    RequestFailed(String),

    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),
}

/// OAuth client credentials, loaded from the environment at startup
#[derive(Debug, Clone)]
pub struct GoogleConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_url: String,
}

impl GoogleConfig {
    /// Read GOOGLE_CLIENT_ID / GOOGLE_CLIENT_SECRET / GOOGLE_REDIRECT_URL
    pub fn from_env() -> Result<Self, GoogleError> {
        use std::env;

        let client_id = env::var("GOOGLE_CLIENT_ID").map_err(|_| GoogleError::NotConfigured)?;
        let client_secret =
            env::var("GOOGLE_CLIENT_SECRET").map_err(|_| GoogleError::NotConfigured)?;
        let redirect_url =
            env::var("GOOGLE_REDIRECT_URL").map_err(|_| GoogleError::NotConfigured)?;

        Ok(Self {
            client_id,
            client_secret,
            redirect_url,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub expires_in: Option<i64>,
    pub token_type: Option<String>,
    pub scope: Option<String>,
}

/// Verified identity recovered from the userinfo endpoint
#[derive(Debug, Deserialize)]
pub struct GoogleUserInfo {
    pub email: String,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct GoogleService {
    config: GoogleConfig,
    client: Client,
}

impl GoogleService {
    pub fn new(config: GoogleConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { config, client }
    }

    /// Build the consent-page URL embedding the anti-CSRF state nonce
    pub fn authorization_url(&self, state: &str) -> Result<String, GoogleError> {
        let scopes = ["openid", "email", "profile"];
        let scope_param = scopes.join(" ");

        let auth_url = format!(
            "https://accounts.google.com/o/oauth2/v2/auth?client_id={}&redirect_uri={}&response_type=code&scope={}&state={}",
            urlencoding::encode(&self.config.client_id),
            urlencoding::encode(&self.config.redirect_url),
            urlencoding::encode(&scope_param),
            urlencoding::encode(state)
        );

        debug!("Generated Google OAuth authorization URL");
        Ok(auth_url)
    }

    /// Exchange an authorization code for an access token
    pub async fn exchange_code(&self, code: &str) -> Result<TokenResponse, GoogleError> {
        let params = [
            ("code", code),
            ("client_id", &self.config.client_id),
            ("client_secret", &self.config.client_secret),
            ("redirect_uri", &self.config.redirect_url),
            ("grant_type", "authorization_code"),
        ];

        debug!("Exchanging authorization code for tokens");

        let response = self
            .client
            .post(TOKEN_ENDPOINT)
            .form(&params)
            .send()
            .await
            .map_err(|e| GoogleError::RequestFailed(e.to_string()))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!(status = %status, error = %error_text, "Token exchange failed");
            return Err(GoogleError::OAuthFailed(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        response
            .json::<TokenResponse>()
            .await
            .map_err(|e| GoogleError::MalformedResponse(e.to_string()))
    }

    /// Fetch the token owner's email and display name
    pub async fn fetch_userinfo(&self, access_token: &str) -> Result<GoogleUserInfo, GoogleError> {
        debug!("Fetching Google userinfo");

        let response = self
            .client
            .get(USERINFO_ENDPOINT)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| GoogleError::RequestFailed(e.to_string()))?;

        let status = response.status();

        if !status.is_success() {
            error!(status = %status, "Userinfo fetch failed");
            return Err(GoogleError::OAuthFailed(format!("HTTP {}", status)));
        }

        response
            .json::<GoogleUserInfo>()
            .await
            .map_err(|e| GoogleError::MalformedResponse(e.to_string()))
    }
}
