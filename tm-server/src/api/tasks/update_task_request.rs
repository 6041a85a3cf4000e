use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Request body for updating a task's title, description, and due date
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub due_date: DateTime<Utc>,
}
