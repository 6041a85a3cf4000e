use clap::Subcommand;

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Create a task
    Add {
        /// Task title
        title: String,
        /// Optional description
        #[arg(long)]
        description: Option<String>,
        /// Due date: RFC3339 or YYYY-MM-DD
        #[arg(long)]
        due: String,
    },
    /// List tasks, optionally filtered by status
    List {
        /// pending, completed, or overdue
        #[arg(long)]
        status: Option<String>,
    },
    /// Get a task by ID
    Get { id: i64 },
    /// Update a task's title, description, and due date
    Update {
        id: i64,
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
        /// Due date: RFC3339 or YYYY-MM-DD
        #[arg(long)]
        due: String,
    },
    /// Mark a task completed
    Done { id: i64 },
    /// Mark a completed task as pending again
    Reopen { id: i64 },
    /// Delete a task
    Delete { id: i64 },
}
