//! Task repository - owner-scoped CRUD and status queries.
//!
//! Every query is filtered by `user_id`; a task id belonging to another user
//! behaves exactly like a missing id.

use crate::{DbError, Result as DbErrorResult};

use tm_core::{ErrorLocation, TaskItem};

use std::panic::Location;

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

pub struct TaskRepository {
    pool: SqlitePool,
}

impl TaskRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new task and return it with the store-assigned id.
    pub async fn add(&self, task: &TaskItem) -> DbErrorResult<TaskItem> {
        let due_date = task.due_date.timestamp();
        let created_at = task.created_at.timestamp();
        let updated_at = task.updated_at.map(|dt| dt.timestamp());

        let result = sqlx::query(
            r#"
                INSERT INTO tasks (title, description, due_date, completed, created_at, updated_at, user_id)
                VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&task.title)
        .bind(&task.description)
        .bind(due_date)
        .bind(task.completed)
        .bind(created_at)
        .bind(updated_at)
        .bind(task.user_id)
        .execute(&self.pool)
        .await?;

        let mut created = task.clone();
        created.id = result.last_insert_rowid();
        Ok(created)
    }

    pub async fn find_by_id(&self, id: i64, user_id: i64) -> DbErrorResult<Option<TaskItem>> {
        let row = sqlx::query(
            r#"
                SELECT id, title, description, due_date, completed, created_at, updated_at, user_id
                FROM tasks
                WHERE id = ? AND user_id = ?
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| map_task_row(&r)).transpose()
    }

    pub async fn find_all(&self, user_id: i64) -> DbErrorResult<Vec<TaskItem>> {
        let rows = sqlx::query(
            r#"
                SELECT id, title, description, due_date, completed, created_at, updated_at, user_id
                FROM tasks
                WHERE user_id = ?
                ORDER BY due_date ASC, id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_task_row).collect()
    }

    pub async fn find_completed(&self, user_id: i64) -> DbErrorResult<Vec<TaskItem>> {
        let rows = sqlx::query(
            r#"
                SELECT id, title, description, due_date, completed, created_at, updated_at, user_id
                FROM tasks
                WHERE user_id = ? AND completed = 1
                ORDER BY due_date ASC, id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_task_row).collect()
    }

    /// Incomplete tasks whose due date has not passed at `now`.
    pub async fn find_pending(&self, user_id: i64, now: DateTime<Utc>) -> DbErrorResult<Vec<TaskItem>> {
        let now_ts = now.timestamp();
        let rows = sqlx::query(
            r#"
                SELECT id, title, description, due_date, completed, created_at, updated_at, user_id
                FROM tasks
                WHERE user_id = ? AND completed = 0 AND due_date >= ?
                ORDER BY due_date ASC, id ASC
            "#,
        )
        .bind(user_id)
        .bind(now_ts)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_task_row).collect()
    }

    /// Incomplete tasks whose due date is strictly in the past at `now`.
    pub async fn find_overdue(&self, user_id: i64, now: DateTime<Utc>) -> DbErrorResult<Vec<TaskItem>> {
        let now_ts = now.timestamp();
        let rows = sqlx::query(
            r#"
                SELECT id, title, description, due_date, completed, created_at, updated_at, user_id
                FROM tasks
                WHERE user_id = ? AND completed = 0 AND due_date < ?
                ORDER BY due_date ASC, id ASC
            "#,
        )
        .bind(user_id)
        .bind(now_ts)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_task_row).collect()
    }

    /// Persist mutations to an existing task. Returns false when no row
    /// matched (missing id or foreign owner).
    pub async fn update(&self, task: &TaskItem) -> DbErrorResult<bool> {
        let due_date = task.due_date.timestamp();
        let updated_at = task.updated_at.map(|dt| dt.timestamp());

        let result = sqlx::query(
            r#"
                UPDATE tasks
                SET title = ?, description = ?, due_date = ?, completed = ?, updated_at = ?
                WHERE id = ? AND user_id = ?
            "#,
        )
        .bind(&task.title)
        .bind(&task.description)
        .bind(due_date)
        .bind(task.completed)
        .bind(updated_at)
        .bind(task.id)
        .bind(task.user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a task. Returns false when no row matched.
    pub async fn delete(&self, id: i64, user_id: i64) -> DbErrorResult<bool> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[track_caller]
fn map_task_row(row: &SqliteRow) -> DbErrorResult<TaskItem> {
    let due_date_ts: i64 = row.try_get("due_date")?;
    let created_at_ts: i64 = row.try_get("created_at")?;
    let updated_at_ts: Option<i64> = row.try_get("updated_at")?;

    Ok(TaskItem {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        due_date: DateTime::from_timestamp(due_date_ts, 0).ok_or_else(|| {
            DbError::Initialization {
                message: "Invalid timestamp in tasks.due_date".to_string(),
                location: ErrorLocation::from(Location::caller()),
            }
        })?,
        completed: row.try_get("completed")?,
        created_at: DateTime::from_timestamp(created_at_ts, 0).ok_or_else(|| {
            DbError::Initialization {
                message: "Invalid timestamp in tasks.created_at".to_string(),
                location: ErrorLocation::from(Location::caller()),
            }
        })?,
        updated_at: updated_at_ts.and_then(|ts| DateTime::from_timestamp(ts, 0)),
        user_id: row.try_get("user_id")?,
    })
}
