use serde::Deserialize;

/// Request body for user registration.
///
/// Fields default to empty so a missing field surfaces as a validation
/// error rather than a deserialization rejection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterRequest {
    pub user_name: String,
    pub email: String,
    pub password: String,
}

impl Default for RegisterRequest {
    fn default() -> Self {
        Self {
            user_name: String::new(),
            email: String::new(),
            password: String::new(),
        }
    }
}
