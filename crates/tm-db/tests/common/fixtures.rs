use tm_core::{TaskItem, User};

use chrono::{Duration, Utc};

/// Creates a test User with placeholder password material
pub fn create_test_user(email: &str) -> User {
    User::new(
        "testuser".to_string(),
        email.to_string(),
        "dGVzdC1oYXNo".to_string(),
        "dGVzdC1zYWx0".to_string(),
    )
}

/// Creates a test TaskItem due in three days
pub fn create_test_task(user_id: i64) -> TaskItem {
    TaskItem::new(
        "Test Task".to_string(),
        Some("Test description".to_string()),
        Utc::now() + Duration::days(3),
        user_id,
    )
}

/// Creates a test TaskItem already past its due date
pub fn create_overdue_task(user_id: i64) -> TaskItem {
    TaskItem::new(
        "Overdue Task".to_string(),
        None,
        Utc::now() - Duration::days(1),
        user_id,
    )
}
