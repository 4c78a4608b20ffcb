// src/entities/store.rs
//
// Generic per-user store over the collection tables. Every statement is
// scoped by user_id, so another user's rows are indistinguishable from
// absent ones.

use sqlx::SqlitePool;

use super::models::{CreateEntityRequest, Entity, EntityKind, UpdateEntityRequest};

pub async fn list(
    pool: &SqlitePool,
    kind: EntityKind,
    user_id: i64,
) -> Result<Vec<Entity>, sqlx::Error> {
    sqlx::query_as::<_, Entity>(&format!(
        "SELECT * FROM {} WHERE user_id = ? ORDER BY created_at DESC",
        kind.table()
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn create(
    pool: &SqlitePool,
    kind: EntityKind,
    user_id: i64,
    req: &CreateEntityRequest,
) -> Result<Entity, sqlx::Error> {
    let result = sqlx::query(&format!(
        "INSERT INTO {} (user_id, name, color) VALUES (?, ?, ?)",
        kind.table()
    ))
    .bind(user_id)
    .bind(&req.name)
    .bind(&req.color)
    .execute(pool)
    .await?;

    sqlx::query_as::<_, Entity>(&format!("SELECT * FROM {} WHERE id = ?", kind.table()))
        .bind(result.last_insert_rowid())
        .fetch_one(pool)
        .await
}

/// Returns None when the row does not exist or belongs to another user
pub async fn update(
    pool: &SqlitePool,
    kind: EntityKind,
    user_id: i64,
    id: i64,
    req: &UpdateEntityRequest,
) -> Result<Option<Entity>, sqlx::Error> {
    let result = sqlx::query(&format!(
        "UPDATE {} SET name = COALESCE(?, name), color = COALESCE(?, color) \
         WHERE id = ? AND user_id = ?",
        kind.table()
    ))
    .bind(&req.name)
    .bind(&req.color)
    .bind(id)
    .bind(user_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    sqlx::query_as::<_, Entity>(&format!("SELECT * FROM {} WHERE id = ?", kind.table()))
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Returns false when the row does not exist or belongs to another user
pub async fn delete(
    pool: &SqlitePool,
    kind: EntityKind,
    user_id: i64,
    id: i64,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(&format!(
        "DELETE FROM {} WHERE id = ? AND user_id = ?",
        kind.table()
    ))
    .bind(id)
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
