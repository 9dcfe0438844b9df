use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::db::models::{TaskStatus, User};

/// Signup request
#[derive(Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
}

/// Login request
#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Public view of a user, returned next to a session token
#[derive(Serialize, Deserialize)]
pub struct UserInfo {
    pub id: i64,
    pub email: String,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
        }
    }
}

/// Signup/login response
#[derive(Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserInfo,
}

/// Create task request
#[derive(Deserialize)]
pub struct CreateTaskRequest {
    pub title: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub priority: i32,
}

/// Partial task update request
#[derive(Deserialize, Default)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub priority: Option<i32>,
    pub status: Option<TaskStatus>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}

/// Query parameters for task list
#[derive(Deserialize, Default)]
pub struct TaskListQuery {
    pub priority: Option<i32>,
    pub status: Option<TaskStatus>,
    /// Sort column (id, start_time, end_time, priority, created_at)
    pub field: Option<String>,
    /// Sort direction (asc, desc)
    pub order: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}
