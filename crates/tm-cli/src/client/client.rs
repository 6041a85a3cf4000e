//! HTTP client for the tm-server REST API.
//!
//! Authenticated calls carry the stored bearer token. On a 401 the client
//! exchanges the stored refresh token for a new pair once and retries the
//! original call; if the refresh is rejected too, the stored credentials are
//! dropped and the caller is asked to log in again.

use crate::client::error::ClientError;
use crate::client::CliClientResult;
use crate::credentials::{Credentials, CredentialsStore};

use tm_core::ErrorLocation;

use std::panic::Location;

use reqwest::{Client as ReqwestClient, Method, StatusCode};
use serde_json::{json, Value};

pub struct Client {
    pub base_url: String,
    client: ReqwestClient,
    credentials: CredentialsStore,
}

impl Client {
    /// Create a new client
    ///
    /// # Arguments
    /// * `base_url` - Server URL (e.g., "http://127.0.0.1:8000")
    /// * `credentials` - Local token storage
    pub fn new(base_url: &str, credentials: CredentialsStore) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: ReqwestClient::new(),
            credentials,
        }
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client.request(method, &url)
    }

    /// Execute request and decode the error envelope on failure
    async fn execute(&self, req: reqwest::RequestBuilder) -> CliClientResult<Value> {
        let response = req.send().await?;
        Self::decode(response).await
    }

    async fn decode(response: reqwest::Response) -> CliClientResult<Value> {
        let status = response.status();
        let bytes = response.bytes().await?;

        let body: Value = if bytes.is_empty() {
            json!({})
        } else {
            serde_json::from_slice(&bytes)?
        };

        if !status.is_success() {
            let (code, message) = decode_error_envelope(&body, status);
            return Err(ClientError::Api {
                code,
                message,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(body)
    }

    /// Execute an authenticated request; on 401, refresh once and retry.
    async fn execute_authed(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> CliClientResult<Value> {
        let credentials = self
            .credentials
            .load()?
            .ok_or_else(ClientError::not_logged_in)?;

        let response = self
            .build(method.clone(), path, &credentials.access_token, body)
            .send()
            .await?;

        if response.status() != StatusCode::UNAUTHORIZED {
            return Self::decode(response).await;
        }

        // Access token rejected: rotate via the refresh token and replay
        // the original call once.
        let refreshed = match self.refresh(&credentials.refresh_token).await {
            Ok(refreshed) => refreshed,
            Err(_) => {
                self.credentials.clear()?;
                return Err(ClientError::not_logged_in());
            }
        };

        let response = self
            .build(method, path, &refreshed.access_token, body)
            .send()
            .await?;
        Self::decode(response).await
    }

    fn build(
        &self,
        method: Method,
        path: &str,
        access_token: &str,
        body: Option<&Value>,
    ) -> reqwest::RequestBuilder {
        let mut req = self
            .request(method, path)
            .header("Authorization", format!("Bearer {}", access_token));
        if let Some(body) = body {
            req = req.json(body);
        }
        req
    }

    /// Exchange a refresh token for a new pair and persist it.
    async fn refresh(&self, refresh_token: &str) -> CliClientResult<Credentials> {
        let req = self
            .request(Method::POST, "/api/v1/auth/refresh")
            .json(&json!({ "refreshToken": refresh_token }));
        let body = self.execute(req).await?;

        let credentials = extract_credentials(&body)?;
        self.credentials.save(&credentials)?;
        Ok(credentials)
    }

    // =========================================================================
    // Auth Operations
    // =========================================================================

    /// Register a new account
    pub async fn register(
        &self,
        user_name: &str,
        email: &str,
        password: &str,
    ) -> CliClientResult<Value> {
        let req = self.request(Method::POST, "/api/v1/auth/register").json(&json!({
            "userName": user_name,
            "email": email,
            "password": password,
        }));
        self.execute(req).await
    }

    /// Log in and persist the returned token pair
    pub async fn login(&self, email: &str, password: &str) -> CliClientResult<Value> {
        let req = self.request(Method::POST, "/api/v1/auth/login").json(&json!({
            "email": email,
            "password": password,
        }));
        let body = self.execute(req).await?;

        let credentials = extract_credentials(&body)?;
        self.credentials.save(&credentials)?;

        Ok(body)
    }

    /// End the server session and drop the stored pair
    pub async fn logout(&self) -> CliClientResult<Value> {
        let result = self
            .execute_authed(Method::POST, "/api/v1/auth/logout", None)
            .await;
        // The local copy goes away regardless of what the server said
        self.credentials.clear()?;
        result
    }

    // =========================================================================
    // Task Operations
    // =========================================================================

    /// List tasks, optionally filtered by status
    pub async fn list_tasks(&self, status: Option<&str>) -> CliClientResult<Value> {
        let path = match status {
            Some(s) => format!("/api/v1/tasks?status={}", s),
            None => "/api/v1/tasks".to_string(),
        };
        self.execute_authed(Method::GET, &path, None).await
    }

    /// Get a task by ID
    pub async fn get_task(&self, id: i64) -> CliClientResult<Value> {
        self.execute_authed(Method::GET, &format!("/api/v1/tasks/{}", id), None)
            .await
    }

    /// Create a new task
    pub async fn create_task(
        &self,
        title: &str,
        description: Option<&str>,
        due_date: &str,
    ) -> CliClientResult<Value> {
        let body = json!({
            "title": title,
            "description": description,
            "dueDate": due_date,
        });
        self.execute_authed(Method::POST, "/api/v1/tasks", Some(&body))
            .await
    }

    /// Update a task
    pub async fn update_task(
        &self,
        id: i64,
        title: &str,
        description: Option<&str>,
        due_date: &str,
    ) -> CliClientResult<Value> {
        let body = json!({
            "title": title,
            "description": description,
            "dueDate": due_date,
        });
        self.execute_authed(Method::PUT, &format!("/api/v1/tasks/{}", id), Some(&body))
            .await
    }

    /// Mark a task completed
    pub async fn complete_task(&self, id: i64) -> CliClientResult<Value> {
        self.execute_authed(
            Method::POST,
            &format!("/api/v1/tasks/{}/complete", id),
            None,
        )
        .await
    }

    /// Mark a task as pending again
    pub async fn reopen_task(&self, id: i64) -> CliClientResult<Value> {
        self.execute_authed(Method::POST, &format!("/api/v1/tasks/{}/reopen", id), None)
            .await
    }

    /// Delete a task
    pub async fn delete_task(&self, id: i64) -> CliClientResult<Value> {
        let result = self
            .execute_authed(Method::DELETE, &format!("/api/v1/tasks/{}", id), None)
            .await?;
        if result == json!({}) {
            return Ok(json!({ "message": format!("Task {} deleted", id) }));
        }
        Ok(result)
    }
}

/// Pull the token pair out of a login/refresh response body.
#[track_caller]
fn extract_credentials(body: &Value) -> CliClientResult<Credentials> {
    let access_token = body
        .get("accessToken")
        .and_then(|v| v.as_str())
        .ok_or_else(|| missing_token("accessToken"))?;
    let refresh_token = body
        .get("refreshToken")
        .and_then(|v| v.as_str())
        .ok_or_else(|| missing_token("refreshToken"))?;

    Ok(Credentials {
        access_token: access_token.to_string(),
        refresh_token: refresh_token.to_string(),
    })
}

#[track_caller]
fn missing_token(field: &str) -> ClientError {
    ClientError::Api {
        code: "MALFORMED_RESPONSE".to_string(),
        message: format!("Response is missing {}", field),
        location: ErrorLocation::from(Location::caller()),
    }
}

fn decode_error_envelope(body: &Value, status: StatusCode) -> (String, String) {
    match body.get("error") {
        Some(error) => {
            let code = error
                .get("code")
                .and_then(|v| v.as_str())
                .unwrap_or("UNKNOWN")
                .to_string();
            let message = error
                .get("message")
                .and_then(|v| v.as_str())
                .unwrap_or("Unknown error")
                .to_string();
            (code, message)
        }
        None => ("UNKNOWN".to_string(), format!("HTTP {}", status)),
    }
}
