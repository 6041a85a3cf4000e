use crate::api::auth::user_dto::UserDto;

use serde::Serialize;

/// Response body for successful login and refresh
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: UserDto,
}
