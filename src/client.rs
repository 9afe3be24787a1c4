//! Typed calls for the admin surfaces the browser and job screens use
//!
//! The test harness sends whatever the catalog describes and keeps the raw
//! response; these helpers instead decode known wire shapes and classify
//! failures so the screens can show the right message.

use crate::auth::Role;
use crate::types::{Job, PageResult, TableDescriptor};
use serde::Deserialize;
use std::fmt;

/// Failure classes surfaced to the operator. Each maps to one message; the
/// screens decide how much context to wrap around it.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Pre-flight: the required token slot is empty. No network attempted.
    MissingCredentials(Role),

    /// HTTP 401 from the backend.
    Unauthorized,

    /// Any other non-2xx, with whatever error message the body carried.
    Backend { status: u16, message: String },

    /// The request never completed.
    Transport(String),

    /// The response arrived but its body did not decode.
    Parse(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::MissingCredentials(role) => {
                write!(f, "No {} token found. Please login first.", role.label())
            }
            ApiError::Unauthorized => write!(f, "Authentication failed. Please login again."),
            ApiError::Backend { message, .. } => write!(f, "{}", message),
            ApiError::Transport(_) => write!(
                f,
                "Cannot connect to backend server. Please ensure the server is running."
            ),
            ApiError::Parse(detail) => write!(f, "Invalid response from server: {}", detail),
        }
    }
}

impl std::error::Error for ApiError {}

/// Error payload the backend sends on non-2xx responses.
#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Pull the backend's message out of an error body, falling back when the
/// body is not the expected shape.
pub fn parse_error_body(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .map(|e| e.error)
        .unwrap_or_else(|_| "Unknown error".to_string())
}

#[derive(Deserialize)]
struct JobListBody {
    #[serde(default)]
    jobs: Vec<Job>,
}

/// HTTP client bound to one backend origin. Cheap to clone; each background
/// task takes its own copy.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    pub async fn fetch_tables(&self, token: &str) -> Result<Vec<TableDescriptor>, ApiError> {
        let response = self
            .http
            .get(self.url("/api/admin/data-explorer/tables"))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        if status.as_u16() == 401 {
            return Err(ApiError::Unauthorized);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Backend {
                status: status.as_u16(),
                message: parse_error_body(&body),
            });
        }

        response
            .json::<Vec<TableDescriptor>>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    pub async fn fetch_table_page(
        &self,
        token: &str,
        table: &str,
        page: u32,
        limit: u32,
    ) -> Result<PageResult, ApiError> {
        let path = format!("/api/admin/data-explorer/tables/{}/data", table);
        let response = self
            .http
            .get(self.url(&path))
            .query(&[("page", page), ("limit", limit)])
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        if status.as_u16() == 401 {
            return Err(ApiError::Unauthorized);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Backend {
                status: status.as_u16(),
                message: parse_error_body(&body),
            });
        }

        response
            .json::<PageResult>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    pub async fn fetch_jobs(&self, token: &str) -> Result<Vec<Job>, ApiError> {
        let response = self
            .http
            .get(self.url("/api/admin/jobs"))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        if status.as_u16() == 401 {
            return Err(ApiError::Unauthorized);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Backend {
                status: status.as_u16(),
                message: parse_error_body(&body),
            });
        }

        response
            .json::<JobListBody>()
            .await
            .map(|b| b.jobs)
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    pub async fn delete_job(&self, token: &str, id: i64) -> Result<(), ApiError> {
        let path = format!("/api/admin/jobs/{}", id);
        let response = self
            .http
            .delete(self.url(&path))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        if status.as_u16() == 401 {
            return Err(ApiError::Unauthorized);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Backend {
                status: status.as_u16(),
                message: parse_error_body(&body),
            });
        }

        Ok(())
    }
}
