// src/services/oauth_state.rs
//
// Server-side store for OAuth anti-CSRF state nonces, keyed by the client's
// session cookie. Consumption removes the entry under the write lock, so a
// nonce can never validate twice.

use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Debug, Default)]
pub struct OAuthStateService {
    nonces: RwLock<HashMap<String, String>>,
}

impl OAuthStateService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a nonce for a session, replacing any pending one
    pub async fn store(&self, session_id: &str, nonce: &str) {
        let mut nonces = self.nonces.write().await;
        nonces.insert(session_id.to_string(), nonce.to_string());
        debug!(sessions = nonces.len(), "Stored OAuth state nonce");
    }

    /// Remove and return the nonce stored for a session, if any
    pub async fn consume(&self, session_id: &str) -> Option<String> {
        self.nonces.write().await.remove(session_id)
    }
}
