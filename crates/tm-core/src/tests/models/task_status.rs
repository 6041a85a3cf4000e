use crate::TaskStatus;

use std::str::FromStr;

#[test]
fn test_task_status_as_str() {
    assert_eq!(TaskStatus::Pending.as_str(), "pending");
    assert_eq!(TaskStatus::Completed.as_str(), "completed");
    assert_eq!(TaskStatus::Overdue.as_str(), "overdue");
}

#[test]
fn test_task_status_from_str() {
    assert_eq!(TaskStatus::from_str("pending").unwrap(), TaskStatus::Pending);
    assert_eq!(
        TaskStatus::from_str("completed").unwrap(),
        TaskStatus::Completed
    );
    assert_eq!(TaskStatus::from_str("overdue").unwrap(), TaskStatus::Overdue);
    assert!(TaskStatus::from_str("done").is_err());
    assert!(TaskStatus::from_str("").is_err());
}

#[test]
fn test_task_status_round_trips_through_display() {
    for status in [TaskStatus::Pending, TaskStatus::Completed, TaskStatus::Overdue] {
        assert_eq!(TaskStatus::from_str(&status.to_string()).unwrap(), status);
    }
}
