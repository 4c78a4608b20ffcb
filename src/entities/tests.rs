//! Tests for entities module
//!
//! These tests verify the generic entity store including:
//! - Entity model structure
//! - Per-user scoping of update/delete
//! - CRUD round trips against an in-memory database

#[cfg(test)]
mod tests {
    use super::super::*;
    use super::super::models::{CreateEntityRequest, EntityKind, UpdateEntityRequest};
    use crate::common::migrations;
    use sqlx::sqlite::SqlitePoolOptions;
    use sqlx::SqlitePool;

    async fn test_pool() -> SqlitePool {
        // one connection so every query sees the same in-memory database
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to open in-memory database");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        // Two users so scoping can be exercised
        for (name, email) in [("Ann", "a@x.com"), ("Bob", "b@x.com")] {
            sqlx::query(
                "INSERT INTO users (full_name, email, password, login_method) VALUES (?, ?, 'hash', 'email')",
            )
            .bind(name)
            .bind(email)
            .execute(&pool)
            .await
            .expect("Failed to seed user");
        }

        pool
    }

    #[test]
    fn test_entity_kind_tables() {
        assert_eq!(EntityKind::Tag.table(), "tags");
        assert_eq!(EntityKind::Category.table(), "categories");
    }

    #[test]
    fn test_entity_model_structure() {
        let entity = models::Entity {
            id: 1,
            user_id: 2,
            name: "rust".to_string(),
            color: Some("#dea584".to_string()),
            created_at: None,
        };

        assert_eq!(entity.name, "rust");
        assert_eq!(entity.color.as_deref(), Some("#dea584"));
    }

    #[tokio::test]
    async fn test_create_and_list_scoped_by_user() {
        let pool = test_pool().await;

        let req = CreateEntityRequest {
            name: "reading".to_string(),
            color: None,
        };
        let created = store::create(&pool, EntityKind::Tag, 1, &req)
            .await
            .expect("Failed to create tag");
        assert_eq!(created.user_id, 1);
        assert_eq!(created.name, "reading");

        let own = store::list(&pool, EntityKind::Tag, 1)
            .await
            .expect("Failed to list tags");
        assert_eq!(own.len(), 1);

        // the other user sees nothing
        let other = store::list(&pool, EntityKind::Tag, 2)
            .await
            .expect("Failed to list tags");
        assert!(other.is_empty());
    }

    #[tokio::test]
    async fn test_update_other_users_row_reports_absence() {
        let pool = test_pool().await;

        let created = store::create(
            &pool,
            EntityKind::Category,
            1,
            &CreateEntityRequest {
                name: "work".to_string(),
                color: None,
            },
        )
        .await
        .expect("Failed to create category");

        let req = UpdateEntityRequest {
            name: Some("hijacked".to_string()),
            color: None,
        };
        let result = store::update(&pool, EntityKind::Category, 2, created.id, &req)
            .await
            .expect("Update query failed");
        assert!(result.is_none());

        // owner still sees the original name
        let rows = store::list(&pool, EntityKind::Category, 1)
            .await
            .expect("Failed to list categories");
        assert_eq!(rows[0].name, "work");
    }

    #[tokio::test]
    async fn test_partial_update_keeps_missing_fields() {
        let pool = test_pool().await;

        let created = store::create(
            &pool,
            EntityKind::Tag,
            1,
            &CreateEntityRequest {
                name: "rust".to_string(),
                color: Some("#dea584".to_string()),
            },
        )
        .await
        .expect("Failed to create tag");

        let updated = store::update(
            &pool,
            EntityKind::Tag,
            1,
            created.id,
            &UpdateEntityRequest {
                name: Some("rust-lang".to_string()),
                color: None,
            },
        )
        .await
        .expect("Update query failed")
        .expect("Row should exist");

        assert_eq!(updated.name, "rust-lang");
        assert_eq!(updated.color.as_deref(), Some("#dea584"));
    }

    #[tokio::test]
    async fn test_delete_scoped_by_user() {
        let pool = test_pool().await;

        let created = store::create(
            &pool,
            EntityKind::Tag,
            1,
            &CreateEntityRequest {
                name: "temp".to_string(),
                color: None,
            },
        )
        .await
        .expect("Failed to create tag");

        // wrong user: nothing deleted
        let deleted = store::delete(&pool, EntityKind::Tag, 2, created.id)
            .await
            .expect("Delete query failed");
        assert!(!deleted);

        // owner: deleted
        let deleted = store::delete(&pool, EntityKind::Tag, 1, created.id)
            .await
            .expect("Delete query failed");
        assert!(deleted);

        let rows = store::list(&pool, EntityKind::Tag, 1)
            .await
            .expect("Failed to list tags");
        assert!(rows.is_empty());
    }
}
