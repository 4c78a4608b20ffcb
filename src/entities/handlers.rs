// src/entities/handlers.rs
//
// Thin CRUD handlers over the generic entity store. All routes sit behind
// the AuthedUser extractor, so every operation is scoped to the caller.

use axum::extract::{Extension, Json, Path};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

use super::models::{CreateEntityRequest, Entity, EntityKind, UpdateEntityRequest};
use super::store;
use crate::auth::AuthedUser;
use crate::common::{ApiError, AppState};

async fn list_entities(
    state_lock: Arc<RwLock<AppState>>,
    authed: AuthedUser,
    kind: EntityKind,
) -> Result<Json<Vec<Entity>>, ApiError> {
    let state = state_lock.read().await.clone();

    let rows = store::list(&state.db, kind, authed.id)
        .await
        .map_err(ApiError::DatabaseError)?;

    Ok(Json(rows))
}

async fn create_entity(
    state_lock: Arc<RwLock<AppState>>,
    authed: AuthedUser,
    kind: EntityKind,
    req: CreateEntityRequest,
) -> Result<Json<Entity>, ApiError> {
    let state = state_lock.read().await.clone();

    let row = store::create(&state.db, kind, authed.id, &req)
        .await
        .map_err(ApiError::DatabaseError)?;

    info!(user_id = authed.id, kind = kind.table(), id = row.id, "Entity created");

    Ok(Json(row))
}

async fn update_entity(
    state_lock: Arc<RwLock<AppState>>,
    authed: AuthedUser,
    kind: EntityKind,
    id: i64,
    req: UpdateEntityRequest,
) -> Result<Json<Entity>, ApiError> {
    let state = state_lock.read().await.clone();

    let row = store::update(&state.db, kind, authed.id, id, &req)
        .await
        .map_err(ApiError::DatabaseError)?
        .ok_or_else(|| ApiError::NotFound(format!("{} not found", kind.table())))?;

    Ok(Json(row))
}

async fn delete_entity(
    state_lock: Arc<RwLock<AppState>>,
    authed: AuthedUser,
    kind: EntityKind,
    id: i64,
) -> Result<Json<serde_json::Value>, ApiError> {
    let state = state_lock.read().await.clone();

    let deleted = store::delete(&state.db, kind, authed.id, id)
        .await
        .map_err(ApiError::DatabaseError)?;

    if !deleted {
        return Err(ApiError::NotFound(format!("{} not found", kind.table())));
    }

    info!(user_id = authed.id, kind = kind.table(), id = id, "Entity deleted");

    Ok(Json(serde_json::json!({ "message": "deleted" })))
}

// ---- Tag handlers ----

pub async fn get_tags(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
) -> Result<Json<Vec<Entity>>, ApiError> {
    list_entities(state_lock, authed, EntityKind::Tag).await
}

pub async fn create_tag(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Json(req): Json<CreateEntityRequest>,
) -> Result<Json<Entity>, ApiError> {
    create_entity(state_lock, authed, EntityKind::Tag, req).await
}

pub async fn update_tag(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Path(id): Path<i64>,
    Json(req): Json<UpdateEntityRequest>,
) -> Result<Json<Entity>, ApiError> {
    update_entity(state_lock, authed, EntityKind::Tag, id, req).await
}

pub async fn delete_tag(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    delete_entity(state_lock, authed, EntityKind::Tag, id).await
}

// ---- Category handlers ----

pub async fn get_categories(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
) -> Result<Json<Vec<Entity>>, ApiError> {
    list_entities(state_lock, authed, EntityKind::Category).await
}

pub async fn create_category(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Json(req): Json<CreateEntityRequest>,
) -> Result<Json<Entity>, ApiError> {
    create_entity(state_lock, authed, EntityKind::Category, req).await
}

pub async fn update_category(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Path(id): Path<i64>,
    Json(req): Json<UpdateEntityRequest>,
) -> Result<Json<Entity>, ApiError> {
    update_entity(state_lock, authed, EntityKind::Category, id, req).await
}

pub async fn delete_category(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    delete_entity(state_lock, authed, EntityKind::Category, id).await
}
