//! Task entity - a single to-do item owned by one user.

use crate::TaskStatus;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskItem {
    /// Assigned by the store on creation; 0 until persisted.
    pub id: i64,
    pub title: String,
    pub description: String,
    pub due_date: DateTime<Utc>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    /// Owning user; tasks are never visible across users.
    pub user_id: i64,
}

impl TaskItem {
    pub fn new(title: String, description: Option<String>, due_date: DateTime<Utc>, user_id: i64) -> Self {
        Self {
            id: 0,
            title,
            description: description.unwrap_or_default(),
            due_date,
            completed: false,
            created_at: Utc::now(),
            updated_at: None,
            user_id,
        }
    }

    pub fn update(&mut self, title: String, description: Option<String>, due_date: DateTime<Utc>) {
        self.title = title;
        self.description = description.unwrap_or_default();
        self.due_date = due_date;
        self.updated_at = Some(Utc::now());
    }

    pub fn mark_completed(&mut self) {
        if !self.completed {
            self.completed = true;
            self.updated_at = Some(Utc::now());
        }
    }

    pub fn mark_incomplete(&mut self) {
        if self.completed {
            self.completed = false;
            self.updated_at = Some(Utc::now());
        }
    }

    /// Overdue means not completed and past the due date.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        !self.completed && self.due_date < now
    }

    /// Derived status at `now`.
    pub fn status(&self, now: DateTime<Utc>) -> TaskStatus {
        if self.completed {
            TaskStatus::Completed
        } else if self.is_overdue(now) {
            TaskStatus::Overdue
        } else {
            TaskStatus::Pending
        }
    }
}
