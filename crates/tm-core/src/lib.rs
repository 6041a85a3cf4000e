pub mod error;
pub mod models;

pub use error::error_location::ErrorLocation;
pub use error::{CoreError, Result};
pub use models::session_state::SessionState;
pub use models::task_item::TaskItem;
pub use models::task_status::TaskStatus;
pub use models::user::User;

#[cfg(test)]
mod tests;
