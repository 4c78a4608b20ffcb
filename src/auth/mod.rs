//! # Auth Module
//!
//! This module handles all authentication-related functionality including:
//! - Email/password registration and login
//! - Google OAuth sign-in and callback
//! - JWT token issuance and verification
//! - AuthedUser extractor for protected routes

pub mod extractors;
pub mod handlers;
pub mod models;
pub mod password;
pub mod routes;
pub mod tokens;

#[cfg(test)]
mod tests;

pub use extractors::AuthedUser;
pub use models::User;
pub use routes::auth_routes;
