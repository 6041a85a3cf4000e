use crate::api::tasks::task_dto::TaskDto;

use serde::Serialize;

/// Response body wrapping a list of tasks
#[derive(Debug, Serialize)]
pub struct TaskListResponse {
    pub tasks: Vec<TaskDto>,
}
