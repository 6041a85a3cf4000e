use tm_core::User;

use serde::Serialize;

/// Public view of a user identity; never carries credential material
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: i64,
    pub user_name: String,
    pub email: String,
}

impl UserDto {
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id,
            user_name: user.user_name.clone(),
            email: user.email.clone(),
        }
    }
}
