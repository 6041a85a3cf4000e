use serde::Deserialize;

/// Query parameters for listing tasks
#[derive(Debug, Default, Deserialize)]
pub struct ListTasksQuery {
    /// Optional status filter: pending, completed, or overdue
    #[serde(default)]
    pub status: Option<String>,
}
