//! Task REST API handlers.
//!
//! All handlers resolve the caller through the `AuthUser` extractor and
//! scope every repository call to that user id; a task id belonging to
//! someone else is indistinguishable from a missing one.

use crate::api::error::{ApiError, Result as ApiResult};
use crate::api::extractors::auth_user::AuthUser;
use crate::api::tasks::create_task_request::CreateTaskRequest;
use crate::api::tasks::list_tasks_query::ListTasksQuery;
use crate::api::tasks::task_dto::TaskDto;
use crate::api::tasks::task_list_response::TaskListResponse;
use crate::api::tasks::task_response::TaskResponse;
use crate::api::tasks::update_task_request::UpdateTaskRequest;
use crate::state::AppState;

use tm_core::{ErrorLocation, TaskItem, TaskStatus};
use tm_db::TaskRepository;

use std::panic::Location;
use std::str::FromStr;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};

/// GET /api/v1/tasks?status=pending|completed|overdue
///
/// List the caller's tasks, optionally filtered by derived status.
pub async fn list_tasks(
    State(state): State<AppState>,
    AuthUser { user_id, .. }: AuthUser,
    Query(query): Query<ListTasksQuery>,
) -> ApiResult<Json<TaskListResponse>> {
    let repo = TaskRepository::new(state.pool.clone());
    let now = Utc::now();

    let tasks = match query.status.as_deref() {
        None => repo.find_all(user_id).await?,
        Some(s) => {
            let status = TaskStatus::from_str(s).map_err(|_| ApiError::Validation {
                message: format!(
                    "Invalid status: {}. Valid values: pending, completed, overdue",
                    s
                ),
                field: Some("status".to_string()),
                location: ErrorLocation::from(Location::caller()),
            })?;
            match status {
                TaskStatus::Completed => repo.find_completed(user_id).await?,
                TaskStatus::Pending => repo.find_pending(user_id, now).await?,
                TaskStatus::Overdue => repo.find_overdue(user_id, now).await?,
            }
        }
    };

    Ok(Json(TaskListResponse {
        tasks: tasks
            .into_iter()
            .map(|t| TaskDto::from_task(t, now))
            .collect(),
    }))
}

/// GET /api/v1/tasks/{id}
pub async fn get_task(
    State(state): State<AppState>,
    AuthUser { user_id, .. }: AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<TaskResponse>> {
    let repo = TaskRepository::new(state.pool.clone());

    let task = find_owned_task(&repo, id, user_id).await?;

    Ok(Json(TaskResponse {
        task: TaskDto::from_task(task, Utc::now()),
    }))
}

/// POST /api/v1/tasks
///
/// Create a task. The title must be non-blank and the due date must not be
/// in the past (same-day is allowed).
pub async fn create_task(
    State(state): State<AppState>,
    AuthUser { user_id, .. }: AuthUser,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<TaskResponse>)> {
    validate_title(&req.title)?;
    validate_due_date(req.due_date)?;

    let repo = TaskRepository::new(state.pool.clone());
    let task = TaskItem::new(
        req.title.trim().to_string(),
        req.description,
        req.due_date,
        user_id,
    );
    let created = repo.add(&task).await?;
    log::debug!("User {} created task {}", user_id, created.id);

    Ok((
        StatusCode::CREATED,
        Json(TaskResponse {
            task: TaskDto::from_task(created, Utc::now()),
        }),
    ))
}

/// PUT /api/v1/tasks/{id}
pub async fn update_task(
    State(state): State<AppState>,
    AuthUser { user_id, .. }: AuthUser,
    Path(id): Path<i64>,
    Json(req): Json<UpdateTaskRequest>,
) -> ApiResult<Json<TaskResponse>> {
    validate_title(&req.title)?;
    validate_due_date(req.due_date)?;

    let repo = TaskRepository::new(state.pool.clone());
    let mut task = find_owned_task(&repo, id, user_id).await?;

    task.update(req.title.trim().to_string(), req.description, req.due_date);
    repo.update(&task).await?;

    Ok(Json(TaskResponse {
        task: TaskDto::from_task(task, Utc::now()),
    }))
}

/// POST /api/v1/tasks/{id}/complete
pub async fn complete_task(
    State(state): State<AppState>,
    AuthUser { user_id, .. }: AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<TaskResponse>> {
    let repo = TaskRepository::new(state.pool.clone());
    let mut task = find_owned_task(&repo, id, user_id).await?;

    task.mark_completed();
    repo.update(&task).await?;

    Ok(Json(TaskResponse {
        task: TaskDto::from_task(task, Utc::now()),
    }))
}

/// POST /api/v1/tasks/{id}/reopen
pub async fn reopen_task(
    State(state): State<AppState>,
    AuthUser { user_id, .. }: AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<TaskResponse>> {
    let repo = TaskRepository::new(state.pool.clone());
    let mut task = find_owned_task(&repo, id, user_id).await?;

    task.mark_incomplete();
    repo.update(&task).await?;

    Ok(Json(TaskResponse {
        task: TaskDto::from_task(task, Utc::now()),
    }))
}

/// DELETE /api/v1/tasks/{id}
pub async fn delete_task(
    State(state): State<AppState>,
    AuthUser { user_id, .. }: AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    let repo = TaskRepository::new(state.pool.clone());

    let deleted = repo.delete(id, user_id).await?;
    if !deleted {
        return Err(not_found(id));
    }

    log::debug!("User {} deleted task {}", user_id, id);
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Helpers
// =============================================================================

async fn find_owned_task(repo: &TaskRepository, id: i64, user_id: i64) -> ApiResult<TaskItem> {
    repo.find_by_id(id, user_id)
        .await?
        .ok_or_else(|| not_found(id))
}

#[track_caller]
fn not_found(id: i64) -> ApiError {
    ApiError::NotFound {
        message: format!("Task {} not found", id),
        location: ErrorLocation::from(Location::caller()),
    }
}

#[track_caller]
fn validate_title(title: &str) -> ApiResult<()> {
    if title.trim().is_empty() {
        return Err(ApiError::Validation {
            message: "title must not be empty".to_string(),
            field: Some("title".to_string()),
            location: ErrorLocation::from(Location::caller()),
        });
    }
    Ok(())
}

#[track_caller]
fn validate_due_date(due_date: DateTime<Utc>) -> ApiResult<()> {
    // Same-day due dates are fine; only dates before today are rejected
    if due_date.date_naive() < Utc::now().date_naive() {
        return Err(ApiError::Validation {
            message: "dueDate must not be in the past".to_string(),
            field: Some("dueDate".to_string()),
            location: ErrorLocation::from(Location::caller()),
        });
    }
    Ok(())
}
