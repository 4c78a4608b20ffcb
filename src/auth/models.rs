//! Authentication data models

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// JWT claims structure
#[derive(Serialize, Deserialize, Debug)]
pub struct Claims {
    pub authorized: bool,
    pub user: i64,
    pub exp: usize,
}

/// User database model
#[derive(FromRow, Serialize, Deserialize, Debug)]
pub struct User {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub login_method: String,
    pub created_at: Option<String>,
}

/// POST /auth/register request body
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub fullname: String,
    pub email: String,
    pub password: String,
}

/// POST /auth/login request body
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}
