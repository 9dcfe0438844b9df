use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::Utc;

use super::extract::AuthUser;
use super::models::*;
use super::server::AppState;
use crate::auth::AuthManager;
use crate::db::models::{TaskFilter, TaskPatch, TaskSort, TaskSortField, SortOrder};
use crate::error::{Result, TaskPulseError};
use crate::tasks::TaskManager;

// ─── Auth ─────────────────────────────────────────────────────────────────────

/// Register a new user
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<impl IntoResponse> {
    let auth_mgr = AuthManager::new(&state.db_pool, state.config.token_secret.as_bytes());
    let (token, user) = auth_mgr.signup(&req.email, &req.password).await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: UserInfo::from(&user),
        }),
    ))
}

/// Authenticate an existing user
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse> {
    let auth_mgr = AuthManager::new(&state.db_pool, state.config.token_secret.as_bytes());
    let (token, user) = auth_mgr.login(&req.email, &req.password).await?;

    Ok(Json(AuthResponse {
        token,
        user: UserInfo::from(&user),
    }))
}

// ─── Tasks ────────────────────────────────────────────────────────────────────

/// List the caller's tasks with optional filter, sort, and pagination
pub async fn list_tasks(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Query(query): Query<TaskListQuery>,
) -> Result<impl IntoResponse> {
    let task_mgr = TaskManager::new(&state.db_pool);

    let filter = TaskFilter {
        priority: query.priority,
        status: query.status,
    };
    let sort = parse_sort(query.field.as_deref(), query.order.as_deref())?;

    let page = task_mgr
        .find_tasks(user.id, &filter, sort, query.page, query.limit)
        .await?;
    Ok(Json(page))
}

/// Create a task for the caller
pub async fn create_task(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<CreateTaskRequest>,
) -> Result<impl IntoResponse> {
    let task_mgr = TaskManager::new(&state.db_pool);
    let task = task_mgr
        .add_task(user.id, &req.title, req.start_time, req.end_time, req.priority)
        .await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// Partially update one of the caller's tasks
pub async fn update_task(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateTaskRequest>,
) -> Result<impl IntoResponse> {
    let task_mgr = TaskManager::new(&state.db_pool);
    let patch = TaskPatch {
        title: req.title,
        priority: req.priority,
        status: req.status,
        start_time: req.start_time,
        end_time: req.end_time,
    };
    let task = task_mgr.update_task(id, user.id, &patch).await?;
    Ok(Json(task))
}

/// Delete one of the caller's tasks
pub async fn delete_task(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let task_mgr = TaskManager::new(&state.db_pool);
    task_mgr.delete_task(id, user.id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Summary statistics over the caller's full task set.
///
/// One `now` snapshot is captured here, before the store read, and threaded
/// through the whole aggregation.
pub async fn task_stats(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> Result<impl IntoResponse> {
    let task_mgr = TaskManager::new(&state.db_pool);
    let now = Utc::now();
    let summary = task_mgr.stats(user.id, now).await?;
    Ok(Json(summary))
}

fn parse_sort(field: Option<&str>, order: Option<&str>) -> Result<Option<TaskSort>> {
    let (Some(field), Some(order)) = (field, order) else {
        // Sorting applies only when both parameters are present
        return Ok(None);
    };

    let field = TaskSortField::parse(field)
        .ok_or_else(|| TaskPulseError::Validation(format!("Unknown sort field: {}", field)))?;
    let order = SortOrder::parse(order)
        .ok_or_else(|| TaskPulseError::Validation(format!("Unknown sort order: {}", order)))?;

    Ok(Some(TaskSort { field, order }))
}
