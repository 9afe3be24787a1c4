use crate::auth::Role;
use serde::Deserialize;
use std::time::Duration;

/// One callable backend operation in the static catalog.
#[derive(Debug, Clone)]
pub struct ApiEndpoint {
    /// Which registry section the endpoint is documented under.
    pub role: Role,
    pub method: String,
    pub path: String,
    pub name: String,
    pub description: String,

    /// Which token slot a call must use; `None` for public endpoints.
    pub auth_role: Option<Role>,

    /// Seed for the request-body editor, sent as JSON when no edit was made.
    pub sample_body: Option<serde_json::Value>,

    /// What a successful response carries; drives login token capture.
    pub response_kind: ResponseKind,

    /// Multipart endpoints cannot be exercised from here; execution refuses
    /// them with a pointer to external tooling.
    pub file_upload: bool,
}

impl ApiEndpoint {
    pub fn new(role: Role, method: &str, path: &str, name: &str, description: &str) -> Self {
        Self {
            role,
            method: method.to_string(),
            path: path.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            auth_role: None,
            sample_body: None,
            response_kind: ResponseKind::Generic,
            file_upload: false,
        }
    }

    pub fn auth(mut self, role: Role) -> Self {
        self.auth_role = Some(role);
        self
    }

    pub fn body(mut self, sample: serde_json::Value) -> Self {
        self.sample_body = Some(sample);
        self
    }

    pub fn kind(mut self, kind: ResponseKind) -> Self {
        self.response_kind = kind;
        self
    }

    pub fn upload(mut self) -> Self {
        self.file_upload = true;
        self
    }

    pub fn requires_auth(&self) -> bool {
        self.auth_role.is_some()
    }

    /// Check if this endpoint supports a request body (POST/PUT/PATCH)
    pub fn supports_body(&self) -> bool {
        matches!(
            self.method.to_uppercase().as_str(),
            "POST" | "PUT" | "PATCH"
        )
    }
}

/// Declared per catalog entry so the executor never has to guess from the
/// URL whether a response carries a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    Generic,

    // Successful body is `{ token: ... }`; token goes to the admin slot.
    AdminLogin,

    // Successful body is `{ data: { access_token: ... } }`; user slot.
    UserLogin,
}

/// Represents an HTTP response from a backend endpoint
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// HTTP status code (200, 404, etc.)
    pub status: u16,

    /// Human-readable status text ("OK", "Not Found", etc.)
    pub status_text: String,

    /// Raw response body (could be JSON, HTML, plain text, etc.)
    pub body: String,

    /// Time taken from request start to body read completion
    pub duration: Duration,

    /// True if the request never produced an HTTP response
    /// (pre-flight failure, connection refused, read failure)
    pub is_error: bool,

    /// Error message for failures (only set when is_error = true)
    pub error_message: Option<String>,
}

impl ApiResponse {
    /// Creates an error response with the given error message
    pub fn error(error_message: String) -> Self {
        Self {
            status: 0,
            status_text: String::new(),
            body: String::new(),
            duration: Duration::from_secs(0),
            is_error: true,
            error_message: Some(error_message),
        }
    }
}

/// One entry in the bounded execution history (most-recent-first, max 10).
#[derive(Debug, Clone)]
pub struct TestRecord {
    pub endpoint: ApiEndpoint,

    /// None when execution failed before an HTTP status existed.
    pub status: Option<u16>,
    pub status_text: String,
    pub body: String,
    pub elapsed: Duration,
    pub succeeded: bool,

    /// The body text actually sent, if any.
    pub request_body: Option<String>,

    /// Local wall-clock time of the attempt, "%H:%M:%S".
    pub timestamp: String,
    pub error_message: Option<String>,
}

impl TestRecord {
    /// Record for an attempt that never reached an HTTP response.
    pub fn failure(
        endpoint: ApiEndpoint,
        request_body: Option<String>,
        elapsed: Duration,
        message: String,
        timestamp: String,
    ) -> Self {
        Self {
            endpoint,
            status: None,
            status_text: String::new(),
            body: String::new(),
            elapsed,
            succeeded: false,
            request_body,
            timestamp,
            error_message: Some(message),
        }
    }
}

/// One browsable table as reported by the data-explorer endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TableDescriptor {
    pub name: String,

    #[serde(rename = "rows")]
    pub row_count: i64,

    pub size_mb: f64,

    #[serde(default)]
    pub description: String,
}

/// Column metadata for the currently browsed table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ColumnDescriptor {
    pub name: String,

    #[serde(rename = "type")]
    pub column_type: String,
}

/// One page of table rows. Held whole and replaced whole, so rows, columns
/// and page counters can never disagree with each other.
#[derive(Debug, Clone, Deserialize)]
pub struct PageResult {
    #[serde(rename = "data", default)]
    pub rows: Vec<serde_json::Map<String, serde_json::Value>>,

    #[serde(default)]
    pub columns: Vec<ColumnDescriptor>,

    #[serde(default = "first_page")]
    pub page: u32,

    #[serde(default = "first_page")]
    pub total_pages: u32,

    #[serde(default)]
    pub total: i64,
}

fn first_page() -> u32 {
    1
}

/// An asynchronous job record. This UI reads and deletes; creation and
/// execution happen server-side.
#[derive(Debug, Clone, Deserialize)]
pub struct Job {
    pub id: i64,
    pub job_type: String,
    pub status: JobStatus,

    #[serde(default)]
    pub user: Option<JobOwner>,

    #[serde(default)]
    pub input_data: Option<String>,

    #[serde(default)]
    pub output_data: Option<String>,

    #[serde(default)]
    pub error_msg: Option<String>,

    #[serde(default)]
    pub created_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JobOwner {
    pub username: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Pending,
    InProgress,
    Completed,
    Failed,

    #[serde(other)]
    Unknown,
}

impl JobStatus {
    pub fn label(&self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::InProgress => "in_progress",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
            JobStatus::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadingState {
    Idle,
    Fetching,
    Complete,
    Error(String),
}

impl LoadingState {
    pub fn is_fetching(&self) -> bool {
        matches!(self, LoadingState::Fetching)
    }
}

/// Top-level screens, selected with the number keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Tester,
    Explorer,
    Jobs,
}

impl Screen {
    pub fn title(&self) -> &'static str {
        match self {
            Screen::Tester => "API Tester",
            Screen::Explorer => "Data Explorer",
            Screen::Jobs => "Jobs",
        }
    }
}

/// Flattened rows of the catalog list: two header levels plus endpoints.
#[derive(Debug, Clone)]
pub enum RenderItem {
    RoleHeader {
        role: Role,
        count: usize,
        collapsed: bool,
    },
    CategoryHeader {
        role: Role,
        name: String,
        count: usize,
        collapsed: bool,
    },
    Endpoint {
        endpoint: ApiEndpoint,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputMode {
    Normal,
    EnteringToken,
    EnteringUrl,
    Searching,
    EnteringBody,
    ConfirmDeleteJob,
}

/// Tracks which main panel has focus
#[derive(Debug, Clone, PartialEq)]
pub enum PanelFocus {
    List,   // Left panel
    Detail, // Right panel
}

/// Tracks which tab is active in the tester's detail panel
#[derive(Debug, Clone, PartialEq)]
pub enum DetailTab {
    Endpoint,
    Response,
    History,
}
