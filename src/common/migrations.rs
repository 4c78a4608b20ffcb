// src/common/migrations.rs
//! Database migration and schema management

use sqlx::SqlitePool;
use std::env;
use tracing::{info, warn};

/// Run all database migrations
///
/// Tables are created if missing. Set RESET_DB=true to drop and recreate the
/// whole schema (development only).
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let should_reset_db = env::var("RESET_DB").unwrap_or_else(|_| "false".to_string()) == "true";

    if should_reset_db {
        warn!("RESET_DB=true - Dropping all tables and recreating schema...");
        drop_all_tables(pool).await?;
        info!("Dropped old tables");
    }

    create_user_tables(pool).await?;
    create_collection_tables(pool).await?;
    create_indexes(pool).await?;

    info!("Database migration completed");

    Ok(())
}

async fn drop_all_tables(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for table in ["tags", "categories", "users"] {
        sqlx::query(&format!("DROP TABLE IF EXISTS {}", table))
            .execute(pool)
            .await?;
    }
    Ok(())
}

async fn create_user_tables(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            full_name TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE,
            password TEXT NOT NULL,
            login_method TEXT NOT NULL CHECK (login_method IN ('email', 'google')),
            created_at TEXT DEFAULT (datetime('now'))
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_collection_tables(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    // tags and categories share one shape, scoped per user
    for table in ["tags", "categories"] {
        sqlx::query(&format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL REFERENCES users(id),
                name TEXT NOT NULL,
                color TEXT,
                created_at TEXT DEFAULT (datetime('now'))
            )
            "#,
            table
        ))
        .execute(pool)
        .await?;
    }

    Ok(())
}

async fn create_indexes(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let indexes = [
        "CREATE INDEX IF NOT EXISTS idx_users_email ON users(email)",
        "CREATE INDEX IF NOT EXISTS idx_tags_user_id ON tags(user_id)",
        "CREATE INDEX IF NOT EXISTS idx_categories_user_id ON categories(user_id)",
    ];

    for index in indexes {
        sqlx::query(index).execute(pool).await?;
    }

    Ok(())
}
