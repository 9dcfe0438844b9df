//! Owner-scoped task CRUD and the stats entry point.
//!
//! Every query is scoped by `owner_id`; a task belonging to another user is
//! indistinguishable from a missing one. The end > start invariant is
//! enforced here at write time.

use crate::db::models::{PaginatedTasks, Task, TaskFilter, TaskPatch, TaskSort, TaskStatus};
use crate::error::{Result, TaskPulseError};
use crate::stats::{self, StatsSummary};
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

const DEFAULT_PAGE_LIMIT: i64 = 10;
const MAX_PAGE_LIMIT: i64 = 100;

const TASK_COLUMNS: &str =
    "id, owner_id, title, start_time, end_time, priority, status, created_at, updated_at";

pub struct TaskManager<'a> {
    pool: &'a SqlitePool,
}

impl<'a> TaskManager<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a task for `owner_id`.
    pub async fn add_task(
        &self,
        owner_id: i64,
        title: &str,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        priority: i32,
    ) -> Result<Task> {
        let title = validate_title(title)?;
        validate_priority(priority)?;
        validate_window(start_time, end_time)?;

        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO tasks (owner_id, title, start_time, end_time, priority, status, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, 'pending', ?, ?)
            "#,
        )
        .bind(owner_id)
        .bind(&title)
        .bind(start_time)
        .bind(end_time)
        .bind(priority)
        .bind(now)
        .bind(now)
        .execute(self.pool)
        .await?;

        let task = self.get_task(result.last_insert_rowid(), owner_id).await?;
        tracing::info!(task_id = task.id, owner_id, "task created");
        Ok(task)
    }

    /// Get one of `owner_id`'s tasks by id.
    pub async fn get_task(&self, id: i64, owner_id: i64) -> Result<Task> {
        let sql = format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ? AND owner_id = ?");
        sqlx::query_as::<_, Task>(&sql)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(TaskPulseError::TaskNotFound(id))
    }

    /// One page of `owner_id`'s tasks, filtered and sorted, plus the total
    /// row count for the same filter.
    pub async fn find_tasks(
        &self,
        owner_id: i64,
        filter: &TaskFilter,
        sort: Option<TaskSort>,
        page: Option<i64>,
        limit: Option<i64>,
    ) -> Result<PaginatedTasks> {
        let page = page.unwrap_or(1).max(1);
        let limit = limit.unwrap_or(DEFAULT_PAGE_LIMIT).clamp(1, MAX_PAGE_LIMIT);
        let offset = (page - 1) * limit;
        let sort = sort.unwrap_or_default();

        let mut where_sql = String::from("WHERE owner_id = ?");
        if filter.priority.is_some() {
            where_sql.push_str(" AND priority = ?");
        }
        if filter.status.is_some() {
            where_sql.push_str(" AND status = ?");
        }

        // Sort column and direction come from closed enums, never request text
        let sql = format!(
            "SELECT {TASK_COLUMNS} FROM tasks {where_sql} ORDER BY {} {}, id ASC LIMIT ? OFFSET ?",
            sort.field.column(),
            sort.order.keyword(),
        );

        let mut query = sqlx::query_as::<_, Task>(&sql).bind(owner_id);
        if let Some(priority) = filter.priority {
            query = query.bind(priority);
        }
        if let Some(status) = filter.status {
            query = query.bind(status);
        }
        let tasks = query.bind(limit).bind(offset).fetch_all(self.pool).await?;

        let count_sql = format!("SELECT COUNT(*) FROM tasks {where_sql}");
        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql).bind(owner_id);
        if let Some(priority) = filter.priority {
            count_query = count_query.bind(priority);
        }
        if let Some(status) = filter.status {
            count_query = count_query.bind(status);
        }
        let total = count_query.fetch_one(self.pool).await?;

        Ok(PaginatedTasks {
            tasks,
            total,
            page,
            limit,
        })
    }

    /// Apply a partial update to one of `owner_id`'s tasks.
    ///
    /// Marking a pending task finished stamps `end_time` with the server
    /// clock; the actual completion instant overrides both the planned end
    /// and any end_time carried in the same patch. Finishing a task whose
    /// window has not opened yet stamps `end_time = start_time`, so stored
    /// rows never have `end_time < start_time`.
    pub async fn update_task(&self, id: i64, owner_id: i64, patch: &TaskPatch) -> Result<Task> {
        let existing = self.get_task(id, owner_id).await?;

        let title = match &patch.title {
            Some(t) => validate_title(t)?,
            None => existing.title.clone(),
        };
        if let Some(priority) = patch.priority {
            validate_priority(priority)?;
        }
        if let (Some(start), Some(end)) = (patch.start_time, patch.end_time) {
            validate_window(start, end)?;
        }

        let now = Utc::now();
        let status = patch.status.unwrap_or(existing.status);
        let finishing =
            status == TaskStatus::Finished && existing.status == TaskStatus::Pending;

        let start_time = patch.start_time.unwrap_or(existing.start_time);
        let end_time = if finishing {
            // Finishing before the window opens records a zero-length window
            now.max(start_time)
        } else {
            patch.end_time.unwrap_or(existing.end_time)
        };

        sqlx::query(
            r#"
            UPDATE tasks
            SET title = ?, priority = ?, status = ?, start_time = ?, end_time = ?, updated_at = ?
            WHERE id = ? AND owner_id = ?
            "#,
        )
        .bind(&title)
        .bind(patch.priority.unwrap_or(existing.priority))
        .bind(status)
        .bind(start_time)
        .bind(end_time)
        .bind(now)
        .bind(id)
        .bind(owner_id)
        .execute(self.pool)
        .await?;

        let task = self.get_task(id, owner_id).await?;
        tracing::info!(task_id = id, owner_id, status = status.as_str(), "task updated");
        Ok(task)
    }

    /// Delete one of `owner_id`'s tasks.
    pub async fn delete_task(&self, id: i64, owner_id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ? AND owner_id = ?")
            .bind(id)
            .bind(owner_id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(TaskPulseError::TaskNotFound(id));
        }
        tracing::info!(task_id = id, owner_id, "task deleted");
        Ok(())
    }

    /// All of `owner_id`'s tasks, unpaginated. Input to stats.
    pub async fn list_all(&self, owner_id: i64) -> Result<Vec<Task>> {
        let sql = format!("SELECT {TASK_COLUMNS} FROM tasks WHERE owner_id = ? ORDER BY id ASC");
        Ok(sqlx::query_as::<_, Task>(&sql)
            .bind(owner_id)
            .fetch_all(self.pool)
            .await?)
    }

    /// Summary statistics over `owner_id`'s full task set.
    ///
    /// The `now` snapshot is taken by the caller before the store read so a
    /// slow query cannot skew buckets against totals.
    pub async fn stats(&self, owner_id: i64, now: DateTime<Utc>) -> Result<StatsSummary> {
        let tasks = self.list_all(owner_id).await?;
        Ok(stats::summarize(&tasks, now))
    }
}

fn validate_title(title: &str) -> Result<String> {
    let title = title.trim();
    if title.is_empty() {
        return Err(TaskPulseError::Validation("Title is required".to_string()));
    }
    Ok(title.to_string())
}

fn validate_priority(priority: i32) -> Result<()> {
    if !(1..=5).contains(&priority) {
        return Err(TaskPulseError::Validation(
            "Priority must be between 1 and 5".to_string(),
        ));
    }
    Ok(())
}

fn validate_window(start_time: DateTime<Utc>, end_time: DateTime<Utc>) -> Result<()> {
    if end_time <= start_time {
        return Err(TaskPulseError::Validation(
            "End time must be after start time".to_string(),
        ));
    }
    Ok(())
}
