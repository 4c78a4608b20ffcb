// src/entities/routes.rs

use axum::{
    routing::{get, put},
    Router,
};

use super::handlers;

pub fn entities_routes() -> Router {
    Router::new()
        // Tag routes
        .route("/api/tags", get(handlers::get_tags).post(handlers::create_tag))
        .route(
            "/api/tags/:id",
            put(handlers::update_tag).delete(handlers::delete_tag),
        )
        // Category routes
        .route(
            "/api/categories",
            get(handlers::get_categories).post(handlers::create_category),
        )
        .route(
            "/api/categories/:id",
            put(handlers::update_category).delete(handlers::delete_category),
        )
}
