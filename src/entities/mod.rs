//! # Entities Module
//!
//! Generic per-user entity store backing the two collection kinds
//! (tags and categories). All routes require an authenticated user.

pub mod handlers;
pub mod models;
pub mod routes;
pub mod store;

#[cfg(test)]
mod tests;

pub use routes::entities_routes;
