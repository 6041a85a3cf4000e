use tm_core::TaskItem;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Wire representation of a task, including its derived status
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDto {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub due_date: DateTime<Utc>,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    /// "pending", "completed", or "overdue" at response time
    pub status: String,
}

impl TaskDto {
    pub fn from_task(task: TaskItem, now: DateTime<Utc>) -> Self {
        let status = task.status(now).as_str().to_string();
        Self {
            id: task.id,
            title: task.title,
            description: task.description,
            due_date: task.due_date,
            is_completed: task.completed,
            created_at: task.created_at,
            updated_at: task.updated_at,
            status,
        }
    }
}
