use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Task lifecycle state. Finished is terminal and freezes the task's time
/// window at the completion instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum TaskStatus {
    Pending,
    Finished,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Finished => "finished",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id: i64,
    pub owner_id: i64,
    pub title: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub priority: i32,
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Owner-scoped listing filter.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskFilter {
    pub priority: Option<i32>,
    pub status: Option<TaskStatus>,
}

/// Whitelisted sort columns for task listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskSortField {
    Id,
    StartTime,
    EndTime,
    Priority,
    CreatedAt,
}

impl TaskSortField {
    pub fn parse(field: &str) -> Option<Self> {
        match field {
            "id" => Some(TaskSortField::Id),
            "start_time" | "startTime" => Some(TaskSortField::StartTime),
            "end_time" | "endTime" => Some(TaskSortField::EndTime),
            "priority" => Some(TaskSortField::Priority),
            "created_at" | "createdAt" => Some(TaskSortField::CreatedAt),
            _ => None,
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            TaskSortField::Id => "id",
            TaskSortField::StartTime => "start_time",
            TaskSortField::EndTime => "end_time",
            TaskSortField::Priority => "priority",
            TaskSortField::CreatedAt => "created_at",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn parse(order: &str) -> Option<Self> {
        match order {
            "asc" => Some(SortOrder::Asc),
            "desc" => Some(SortOrder::Desc),
            _ => None,
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TaskSort {
    pub field: TaskSortField,
    pub order: SortOrder,
}

impl Default for TaskSort {
    fn default() -> Self {
        Self {
            field: TaskSortField::Id,
            order: SortOrder::Asc,
        }
    }
}

/// Partial update of a task. Absent fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub priority: Option<i32>,
    pub status: Option<TaskStatus>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}

/// One page of an owner's tasks plus the unpaginated total.
#[derive(Debug, Clone, Serialize)]
pub struct PaginatedTasks {
    pub tasks: Vec<Task>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_status_serde_roundtrip() {
        let json = serde_json::to_string(&TaskStatus::Pending).unwrap();
        assert_eq!(json, "\"pending\"");
        let status: TaskStatus = serde_json::from_str("\"finished\"").unwrap();
        assert_eq!(status, TaskStatus::Finished);
    }

    #[test]
    fn test_task_status_rejects_unknown() {
        let result: Result<TaskStatus, _> = serde_json::from_str("\"archived\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_sort_field_parse() {
        assert_eq!(TaskSortField::parse("priority"), Some(TaskSortField::Priority));
        assert_eq!(TaskSortField::parse("startTime"), Some(TaskSortField::StartTime));
        assert_eq!(TaskSortField::parse("start_time"), Some(TaskSortField::StartTime));
        assert_eq!(TaskSortField::parse("owner_id"), None);
        assert_eq!(TaskSortField::parse("priority; DROP TABLE tasks"), None);
    }

    #[test]
    fn test_sort_order_parse() {
        assert_eq!(SortOrder::parse("asc"), Some(SortOrder::Asc));
        assert_eq!(SortOrder::parse("desc"), Some(SortOrder::Desc));
        assert_eq!(SortOrder::parse("DESC"), None);
    }

    #[test]
    fn test_user_password_hash_not_serialized() {
        let user = User {
            id: 1,
            email: "a@example.com".to_string(),
            password_hash: "secret".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("secret"));
        assert!(!json.contains("password_hash"));
    }
}
