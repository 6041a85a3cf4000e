use crate::api::tasks::task_dto::TaskDto;

use serde::Serialize;

/// Response body wrapping a single task
#[derive(Debug, Serialize)]
pub struct TaskResponse {
    pub task: TaskDto,
}
