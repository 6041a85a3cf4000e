pub mod api;
pub mod error;
pub mod health;
pub mod logger;
pub mod routes;
pub mod state;

#[cfg(test)]
mod tests;

pub use api::{
    auth::{
        auth::{login, logout, refresh, register},
        auth_response::AuthResponse,
        login_request::LoginRequest,
        refresh_request::RefreshRequest,
        register_request::RegisterRequest,
        user_dto::UserDto,
    },
    error::ApiError,
    error::Result as ApiResult,
    extractors::auth_user::AuthUser,
    message_response::MessageResponse,
    tasks::{
        create_task_request::CreateTaskRequest,
        list_tasks_query::ListTasksQuery,
        task_dto::TaskDto,
        task_list_response::TaskListResponse,
        task_response::TaskResponse,
        tasks::{
            complete_task, create_task, delete_task, get_task, list_tasks, reopen_task,
            update_task,
        },
        update_task_request::UpdateTaskRequest,
    },
};

pub use crate::routes::build_router;
pub use crate::state::AppState;
