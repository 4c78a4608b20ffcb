// src/entities/models.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The two user-scoped collection kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Tag,
    Category,
}

impl EntityKind {
    /// Backing table name; the set is closed, so this never reaches SQL from
    /// user input
    pub fn table(&self) -> &'static str {
        match self {
            EntityKind::Tag => "tags",
            EntityKind::Category => "categories",
        }
    }
}

/// A tag or category row
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Entity {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub color: Option<String>,
    pub created_at: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateEntityRequest {
    pub name: String,
    pub color: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateEntityRequest {
    pub name: Option<String>,
    pub color: Option<String>,
}
