use crate::{TaskItem, TaskStatus};

use chrono::{Duration, Utc};

fn future_task() -> TaskItem {
    TaskItem::new(
        "Write report".to_string(),
        Some("Quarterly summary".to_string()),
        Utc::now() + Duration::days(3),
        1,
    )
}

#[test]
fn test_new_task_starts_incomplete() {
    let task = future_task();
    assert!(!task.completed);
    assert_eq!(task.updated_at, None);
    assert_eq!(task.status(Utc::now()), TaskStatus::Pending);
}

#[test]
fn test_missing_description_becomes_empty() {
    let task = TaskItem::new("t".to_string(), None, Utc::now() + Duration::days(1), 1);
    assert_eq!(task.description, "");
}

#[test]
fn test_mark_completed_is_idempotent() {
    let mut task = future_task();
    task.mark_completed();
    assert!(task.completed);
    let first_update = task.updated_at;

    task.mark_completed();
    assert_eq!(task.updated_at, first_update);
}

#[test]
fn test_mark_incomplete_reverts_completion() {
    let mut task = future_task();
    task.mark_completed();
    task.mark_incomplete();
    assert!(!task.completed);
}

#[test]
fn test_overdue_requires_incomplete_and_past_due() {
    let now = Utc::now();
    let mut task = future_task();
    assert!(!task.is_overdue(now));

    task.due_date = now - Duration::hours(1);
    assert!(task.is_overdue(now));
    assert_eq!(task.status(now), TaskStatus::Overdue);

    task.mark_completed();
    assert!(!task.is_overdue(now));
    assert_eq!(task.status(now), TaskStatus::Completed);
}

#[test]
fn test_update_replaces_fields_and_stamps_updated_at() {
    let mut task = future_task();
    let new_due = Utc::now() + Duration::days(10);

    task.update("New title".to_string(), None, new_due);

    assert_eq!(task.title, "New title");
    assert_eq!(task.description, "");
    assert_eq!(task.due_date, new_due);
    assert!(task.updated_at.is_some());
}
