// src/services/mod.rs
//
// Shared services module containing external collaborators
// used across the domain modules

pub mod google;
pub mod oauth_state;

// Re-export commonly used types for convenience
pub use google::GoogleService;
pub use oauth_state::OAuthStateService;
