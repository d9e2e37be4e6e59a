//! GitLab API client.
//!
//! Provides HTTP client for GitLab API v4 with authentication, covering the
//! project search, project access token and project variable endpoints.

use crate::error::AppError;
use crate::models::{
    GitLabProject, NewAccessToken, ProjectAccessToken, ProjectVariable, VariablePayload,
};
use reqwest::{header, Client, Response, StatusCode};
use serde::de::DeserializeOwned;

/// GitLab API client configuration.
#[derive(Clone)]
pub struct GitLabClientConfig {
    /// Base URL of the GitLab instance (e.g., `https://gitlab.com`).
    pub base_url: String,

    /// Personal access token for authentication.
    pub token: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// Verify the server's TLS certificate.
    pub verify_tls: bool,
}

impl Default for GitLabClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            token: String::new(),
            timeout_secs: 30,
            verify_tls: true,
        }
    }
}

impl std::fmt::Debug for GitLabClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitLabClientConfig")
            .field("base_url", &self.base_url)
            .field("token", &"[redacted]")
            .field("timeout_secs", &self.timeout_secs)
            .field("verify_tls", &self.verify_tls)
            .finish()
    }
}

/// GitLab API client.
#[derive(Debug, Clone)]
pub struct GitLabClient {
    client: Client,
    config: GitLabClientConfig,
}

impl GitLabClient {
    /// Create a new GitLab client.
    pub fn new(config: GitLabClientConfig) -> Result<Self, AppError> {
        let mut headers = header::HeaderMap::new();

        let mut token_value = header::HeaderValue::from_str(&config.token)
            .map_err(|_| AppError::configuration("Invalid token format"))?;
        token_value.set_sensitive(true);
        headers.insert("PRIVATE-TOKEN", token_value);

        if !config.verify_tls {
            log::warn!("TLS certificate verification is disabled");
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .danger_accept_invalid_certs(!config.verify_tls)
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Get the base URL for API requests.
    fn api_url(&self, path: &str) -> String {
        format!(
            "{}/api/v4{}",
            self.config.base_url.trim_end_matches('/'),
            path
        )
    }

    /// Build the error for a non-success response.
    async fn error_for(response: Response, endpoint: &str) -> AppError {
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            return AppError::authentication_expired(
                "GitLab token expired or revoked. Please check the credential.",
            );
        }

        let status_code = status.as_u16();
        let body = response.text().await.unwrap_or_default();
        let body_message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| {
                // GitLab returns errors as {"message": "..."} or {"error": "..."}
                v.get("message").or_else(|| v.get("error")).map(|m| match m.as_str() {
                    Some(s) => s.to_string(),
                    // Sometimes "message" is an object like {"value":["is invalid"]}
                    None => m.to_string(),
                })
            });

        let message = match (status, body_message) {
            (StatusCode::FORBIDDEN, _) => "Access denied".to_string(),
            (StatusCode::NOT_FOUND, _) => "Resource not found".to_string(),
            (StatusCode::TOO_MANY_REQUESTS, _) => "Rate limit exceeded".to_string(),
            (_, Some(msg)) => msg,
            _ => format!("Request failed ({}): {}", status_code, body),
        };

        AppError::gitlab_api_full(message, status_code, endpoint)
    }

    /// Handle API response errors and decode the JSON body.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: Response,
        endpoint: &str,
    ) -> Result<T, AppError> {
        if response.status().is_success() {
            response
                .json::<T>()
                .await
                .map_err(|e| AppError::internal(format!("Failed to parse response: {}", e)))
        } else {
            Err(Self::error_for(response, endpoint).await)
        }
    }

    /// Check a response that carries no body of interest.
    async fn expect_success(&self, response: Response, endpoint: &str) -> Result<(), AppError> {
        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::error_for(response, endpoint).await)
        }
    }

    /// Search for projects by name (`GET /search?scope=projects`).
    pub async fn search_projects(&self, name: &str) -> Result<Vec<GitLabProject>, AppError> {
        let endpoint = "/search";
        let url = self.api_url(endpoint);
        let response = self
            .client
            .get(&url)
            .query(&[("scope", "projects"), ("search", name)])
            .send()
            .await?;
        self.handle_response(response, endpoint).await
    }

    /// List the access tokens of a project.
    pub async fn list_access_tokens(
        &self,
        project_id: i64,
    ) -> Result<Vec<ProjectAccessToken>, AppError> {
        let endpoint = format!("/projects/{}/access_tokens", project_id);
        let url = self.api_url(&endpoint);
        let response = self.client.get(&url).send().await?;
        self.handle_response(response, &endpoint).await
    }

    /// Revoke a project access token.
    pub async fn delete_access_token(&self, project_id: i64, token_id: i64) -> Result<(), AppError> {
        let endpoint = format!("/projects/{}/access_tokens/{}", project_id, token_id);
        let url = self.api_url(&endpoint);
        let response = self.client.delete(&url).send().await?;
        self.expect_success(response, &endpoint).await
    }

    /// Create a project access token. The response carries the secret value.
    pub async fn create_access_token(
        &self,
        project_id: i64,
        request: &NewAccessToken<'_>,
    ) -> Result<ProjectAccessToken, AppError> {
        let endpoint = format!("/projects/{}/access_tokens", project_id);
        let url = self.api_url(&endpoint);
        let response = self.client.post(&url).json(request).send().await?;
        self.handle_response(response, &endpoint).await
    }

    /// Get a project variable.
    ///
    /// # Returns
    /// The variable, or `None` if GitLab answers 404.
    pub async fn get_variable(
        &self,
        project_id: i64,
        key: &str,
    ) -> Result<Option<ProjectVariable>, AppError> {
        let endpoint = format!(
            "/projects/{}/variables/{}",
            project_id,
            urlencoding::encode(key)
        );
        let url = self.api_url(&endpoint);
        let response = self.client.get(&url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        self.handle_response(response, &endpoint).await.map(Some)
    }

    /// Update an existing project variable.
    pub async fn update_variable(
        &self,
        project_id: i64,
        payload: &VariablePayload<'_>,
    ) -> Result<ProjectVariable, AppError> {
        let endpoint = format!(
            "/projects/{}/variables/{}",
            project_id,
            urlencoding::encode(payload.key)
        );
        let url = self.api_url(&endpoint);
        let response = self.client.put(&url).json(payload).send().await?;
        self.handle_response(response, &endpoint).await
    }

    /// Create a new project variable.
    pub async fn create_variable(
        &self,
        project_id: i64,
        payload: &VariablePayload<'_>,
    ) -> Result<ProjectVariable, AppError> {
        let endpoint = format!("/projects/{}/variables", project_id);
        let url = self.api_url(&endpoint);
        let response = self.client.post(&url).json(payload).send().await?;
        self.handle_response(response, &endpoint).await
    }
}
