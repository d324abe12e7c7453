use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::error::{Result, TaskboardError};
use crate::types::{Issue, IssueDraft, IssuePatch, Project, ProjectDraft, User};

/// Everything the CLI asks of the remote tracker, behind one seam so
/// tests can swap in a fake.
#[async_trait]
pub trait ApiService: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> Result<TokenResponse>;
    async fn signup(&self, email: &str, password: &str) -> Result<User>;

    async fn list_projects(&self, token: &str) -> Result<Vec<Project>>;
    async fn create_project(&self, token: &str, draft: &ProjectDraft) -> Result<Project>;
    async fn get_project(&self, token: &str, id: i64) -> Result<Project>;
    async fn delete_project(&self, token: &str, id: i64) -> Result<()>;

    async fn list_issues(&self, token: &str, project_id: i64) -> Result<Vec<Issue>>;
    async fn create_issue(&self, token: &str, project_id: i64, draft: &IssueDraft)
        -> Result<Issue>;
    async fn update_issue(&self, token: &str, id: i64, patch: &IssuePatch) -> Result<Issue>;
    async fn delete_issue(&self, token: &str, id: i64) -> Result<()>;
}

pub struct ApiClient {
    http: Client,
    base_url: Url,
}

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

/// Body of `POST /login`.
#[derive(Deserialize, Debug, Clone)]
pub struct TokenResponse {
    pub access_token: String,
    #[allow(dead_code)]
    pub token_type: String,
}

/// Error payloads come back as `{"detail": ...}`.
#[derive(Deserialize)]
struct ApiErrorBody {
    detail: serde_json::Value,
}

fn api_error(status: StatusCode, body: &str) -> TaskboardError {
    let message = serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .map(|parsed| match parsed.detail {
            serde_json::Value::String(detail) => detail,
            other => other.to_string(),
        })
        .unwrap_or_else(|| {
            if body.trim().is_empty() {
                format!("server returned {status}")
            } else {
                body.trim().to_string()
            }
        });

    if status == StatusCode::UNAUTHORIZED {
        return TaskboardError::Auth { message };
    }

    TaskboardError::Api {
        status: status.as_u16(),
        message,
    }
}

impl ApiClient {
    pub fn new(base_url: Url) -> Self {
        Self {
            http: Client::new(),
            base_url,
        }
    }

    fn url(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|_| TaskboardError::InvalidUrl(format!("{}{}", self.base_url, path)))
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(api_error(status, &body));
        }

        serde_json::from_str(&body).map_err(TaskboardError::from)
    }

    /// For endpoints whose response body carries nothing we use.
    async fn send_ignore_body(&self, request: RequestBuilder) -> Result<()> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await?;
            return Err(api_error(status, &body));
        }

        Ok(())
    }
}

#[async_trait]
impl ApiService for ApiClient {
    async fn login(&self, email: &str, password: &str) -> Result<TokenResponse> {
        debug!("POST /login for {email}");
        let request = self
            .http
            .post(self.url("login")?)
            .json(&Credentials { email, password });
        self.send(request).await
    }

    async fn signup(&self, email: &str, password: &str) -> Result<User> {
        debug!("POST /signup for {email}");
        let request = self
            .http
            .post(self.url("signup")?)
            .json(&Credentials { email, password });
        self.send(request).await
    }

    async fn list_projects(&self, token: &str) -> Result<Vec<Project>> {
        debug!("GET /projects");
        let request = self.http.get(self.url("projects")?).bearer_auth(token);
        self.send(request).await
    }

    async fn create_project(&self, token: &str, draft: &ProjectDraft) -> Result<Project> {
        debug!("POST /projects");
        let request = self
            .http
            .post(self.url("projects")?)
            .bearer_auth(token)
            .json(draft);
        self.send(request).await
    }

    async fn get_project(&self, token: &str, id: i64) -> Result<Project> {
        debug!("GET /projects/{id}");
        let request = self
            .http
            .get(self.url(&format!("projects/{id}"))?)
            .bearer_auth(token);
        self.send(request).await
    }

    async fn delete_project(&self, token: &str, id: i64) -> Result<()> {
        debug!("DELETE /projects/{id}");
        let request = self
            .http
            .delete(self.url(&format!("projects/{id}"))?)
            .bearer_auth(token);
        self.send_ignore_body(request).await
    }

    async fn list_issues(&self, token: &str, project_id: i64) -> Result<Vec<Issue>> {
        debug!("GET /projects/{project_id}/issues");
        let request = self
            .http
            .get(self.url(&format!("projects/{project_id}/issues"))?)
            .bearer_auth(token);
        self.send(request).await
    }

    async fn create_issue(
        &self,
        token: &str,
        project_id: i64,
        draft: &IssueDraft,
    ) -> Result<Issue> {
        debug!("POST /projects/{project_id}/issues");
        let request = self
            .http
            .post(self.url(&format!("projects/{project_id}/issues"))?)
            .bearer_auth(token)
            .json(draft);
        self.send(request).await
    }

    async fn update_issue(&self, token: &str, id: i64, patch: &IssuePatch) -> Result<Issue> {
        debug!("PUT /issues/{id}");
        let request = self
            .http
            .put(self.url(&format!("issues/{id}"))?)
            .bearer_auth(token)
            .json(patch);
        self.send(request).await
    }

    async fn delete_issue(&self, token: &str, id: i64) -> Result<()> {
        debug!("DELETE /issues/{id}");
        let request = self
            .http
            .delete(self.url(&format!("issues/{id}"))?)
            .bearer_auth(token);
        self.send_ignore_body(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_extracts_detail() {
        let err = api_error(StatusCode::NOT_FOUND, r#"{"detail": "Project not found"}"#);
        match err {
            TaskboardError::Api { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "Project not found");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_api_error_maps_401_to_auth() {
        let err = api_error(
            StatusCode::UNAUTHORIZED,
            r#"{"detail": "Invalid credentials"}"#,
        );
        match err {
            TaskboardError::Auth { message } => assert_eq!(message, "Invalid credentials"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_api_error_keeps_raw_body_when_not_json() {
        let err = api_error(StatusCode::BAD_GATEWAY, "upstream exploded");
        match err {
            TaskboardError::Api { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, "upstream exploded");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_api_error_empty_body_falls_back_to_status() {
        let err = api_error(StatusCode::INTERNAL_SERVER_ERROR, "");
        match err {
            TaskboardError::Api { message, .. } => assert!(message.contains("500")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
