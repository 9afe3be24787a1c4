use crate::auth::Role;
use crate::client::ApiError;
use crate::state::AppState;
use crate::types::{ApiEndpoint, ApiResponse, ResponseKind, TestRecord};
use std::sync::{Arc, RwLock};
use std::time::Instant;

/// Run one catalog endpoint against the backend in the background.
///
/// Pre-flight failures (multipart endpoints, missing tokens) resolve here,
/// synchronously, with no network call and no HTTP status on the record.
/// Everything else happens in a spawned task that writes the outcome back
/// into state when it completes.
pub fn execute_endpoint_background(
    state: Arc<RwLock<AppState>>,
    endpoint: ApiEndpoint,
    base_url: String,
) {
    let start = Instant::now();

    // Pre-flight, under one write lock.
    let (token, request_body) = {
        let mut s = state.write().unwrap();
        s.tester.error = None;

        if endpoint.file_upload {
            let message =
                "File upload endpoints need multipart form data. Test them with curl or a dedicated client."
                    .to_string();
            s.tester.error = Some(message.clone());
            let record =
                TestRecord::failure(endpoint, None, start.elapsed(), message, now_timestamp());
            s.tester.push_record(record);
            return;
        }

        let token = match endpoint.auth_role {
            Some(role) => match s.tokens.get(role) {
                Some(token) => Some(token.to_string()),
                None => {
                    let message = ApiError::MissingCredentials(role).to_string();
                    s.tester.error = Some(message.clone());
                    let record = TestRecord::failure(
                        endpoint,
                        None,
                        start.elapsed(),
                        message,
                        now_timestamp(),
                    );
                    s.tester.push_record(record);
                    return;
                }
            },
            None => None,
        };

        let body = pick_request_body(
            &endpoint.method,
            s.tester.body_editor.content(),
            endpoint.sample_body.as_ref(),
        );

        s.tester.executing = Some(endpoint.path.clone());
        (token, body)
    };

    let method = match endpoint.method.to_uppercase().as_str() {
        "POST" => reqwest::Method::POST,
        "PUT" => reqwest::Method::PUT,
        "PATCH" => reqwest::Method::PATCH,
        "DELETE" => reqwest::Method::DELETE,
        _ => reqwest::Method::GET,
    };
    let url = join_url(&base_url, &endpoint.path);

    tokio::spawn(async move {
        let response = execute_request(&url, method, token, request_body.clone()).await;

        let mut s = state.write().unwrap();
        s.tester.executing = None;

        if response.is_error {
            s.tester.error = response.error_message.clone();
        } else if let Some((role, value)) =
            extract_login_token(endpoint.response_kind, response.status, &response.body)
        {
            s.tokens.set(role, value);
        }

        let record = record_from_response(endpoint, request_body, response, now_timestamp());
        s.tester.push_record(record);
    });
}

/// Send the request and read the body, timing from call start to body read
/// completion.
async fn execute_request(
    url: &str,
    method: reqwest::Method,
    token: Option<String>,
    body: Option<String>,
) -> ApiResponse {
    let client = reqwest::Client::new();
    let mut request_builder = client
        .request(method, url)
        .header("Content-Type", "application/json");

    if let Some(token) = token {
        request_builder = request_builder.bearer_auth(token);
    }
    if let Some(body) = body {
        request_builder = request_builder.body(body);
    }

    let start = Instant::now();

    match request_builder.send().await {
        Ok(response) => {
            let status = response.status().as_u16();
            let status_text = response
                .status()
                .canonical_reason()
                .unwrap_or("Unknown")
                .to_string();

            match response.text().await {
                Ok(body) => ApiResponse {
                    status,
                    status_text,
                    body,
                    duration: start.elapsed(),
                    is_error: false,
                    error_message: None,
                },
                Err(e) => ApiResponse {
                    status: 0,
                    status_text: String::new(),
                    body: String::new(),
                    duration: start.elapsed(),
                    is_error: true,
                    error_message: Some(format!("Failed to read response body: {}", e)),
                },
            }
        }
        Err(e) => ApiResponse {
            status: 0,
            status_text: String::new(),
            body: String::new(),
            duration: start.elapsed(),
            is_error: true,
            error_message: Some(format!("Request failed: {}", e)),
        },
    }
}

/// What to send for a body: nothing for GET; the edited buffer when the
/// operator typed one; otherwise the catalog's sample, serialized compact.
fn pick_request_body(
    method: &str,
    edited: &str,
    sample: Option<&serde_json::Value>,
) -> Option<String> {
    if method.to_uppercase() == "GET" {
        return None;
    }
    if !edited.is_empty() {
        return Some(edited.to_string());
    }
    sample.map(|body| body.to_string())
}

/// Token capture, driven by the catalog's response-kind tag. Only login
/// entries ever return Some, and only on a successful status.
fn extract_login_token(kind: ResponseKind, status: u16, body: &str) -> Option<(Role, String)> {
    if !(200..300).contains(&status) {
        return None;
    }

    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match kind {
        ResponseKind::Generic => None,
        ResponseKind::AdminLogin => value
            .get("token")
            .and_then(|t| t.as_str())
            .map(|t| (Role::Admin, t.to_string())),
        ResponseKind::UserLogin => value
            .get("data")
            .and_then(|d| d.get("access_token"))
            .and_then(|t| t.as_str())
            .map(|t| (Role::User, t.to_string())),
    }
}

fn record_from_response(
    endpoint: ApiEndpoint,
    request_body: Option<String>,
    response: ApiResponse,
    timestamp: String,
) -> TestRecord {
    if response.is_error {
        return TestRecord::failure(
            endpoint,
            request_body,
            response.duration,
            response.error_message.unwrap_or_default(),
            timestamp,
        );
    }

    let succeeded = (200..300).contains(&response.status);
    TestRecord {
        endpoint,
        status: Some(response.status),
        status_text: response.status_text,
        body: response.body,
        elapsed: response.duration,
        succeeded,
        request_body,
        timestamp,
        error_message: None,
    }
}

fn now_timestamp() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}

pub(crate) fn join_url(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;

    // The pre-flight failure paths return before anything is spawned, so
    // they are observable without a runtime or a server.

    #[test]
    fn test_execute_without_required_token_fails_before_the_network() {
        let state = Arc::new(RwLock::new(AppState::new()));
        let endpoint = ApiEndpoint::new(Role::User, "GET", "/api/vf/v1/profile", "Get Profile", "")
            .auth(Role::User);

        execute_endpoint_background(
            Arc::clone(&state),
            endpoint,
            "http://localhost:8080".to_string(),
        );

        let s = state.read().unwrap();
        assert!(s.tester.executing.is_none());
        assert_eq!(
            s.tester.error.as_deref(),
            Some("No user token found. Please login first.")
        );

        let record = &s.tester.history[0];
        assert_eq!(record.status, None);
        assert!(!record.succeeded);
    }

    #[test]
    fn test_execute_refuses_multipart_endpoints() {
        let state = Arc::new(RwLock::new(AppState::new()));
        let endpoint = ApiEndpoint::new(
            Role::User,
            "POST",
            "/api/vf/v1/files/upload",
            "Upload File",
            "",
        )
        .auth(Role::User)
        .upload();

        {
            let mut s = state.write().unwrap();
            s.tokens.set(Role::User, "u-token".to_string());
        }

        execute_endpoint_background(
            Arc::clone(&state),
            endpoint,
            "http://localhost:8080".to_string(),
        );

        let s = state.read().unwrap();
        assert!(s.tester.executing.is_none());
        assert!(s.tester.error.as_deref().unwrap().contains("multipart"));
        assert_eq!(s.tester.history[0].status, None);
    }

    #[test]
    fn test_join_url_trims_trailing_slash() {
        assert_eq!(
            join_url("http://localhost:8080/", "/api/admin/login"),
            "http://localhost:8080/api/admin/login"
        );
        assert_eq!(
            join_url("http://localhost:8080", "/api/vf/v1/ping"),
            "http://localhost:8080/api/vf/v1/ping"
        );
    }

    #[test]
    fn test_pick_request_body_never_for_get() {
        let sample = json!({"email": "x"});
        assert_eq!(pick_request_body("GET", "typed", Some(&sample)), None);
        assert_eq!(pick_request_body("get", "", Some(&sample)), None);
    }

    #[test]
    fn test_pick_request_body_prefers_edited_buffer() {
        let sample = json!({"email": "x"});
        assert_eq!(
            pick_request_body("POST", "{\"a\":1}", Some(&sample)),
            Some("{\"a\":1}".to_string())
        );
    }

    #[test]
    fn test_pick_request_body_falls_back_to_compact_sample() {
        let sample = json!({"email": "admin@example.com", "password": "admin123"});
        let body = pick_request_body("POST", "", Some(&sample)).unwrap();
        assert_eq!(body, sample.to_string());
        assert!(!body.contains('\n'));
    }

    #[test]
    fn test_pick_request_body_none_when_nothing_to_send() {
        assert_eq!(pick_request_body("DELETE", "", None), None);
    }

    #[test]
    fn test_admin_login_token_lands_in_admin_slot() {
        let captured = extract_login_token(ResponseKind::AdminLogin, 200, r#"{"token": "abc"}"#);
        assert_eq!(captured, Some((Role::Admin, "abc".to_string())));
    }

    #[test]
    fn test_user_login_token_comes_from_nested_data() {
        let body = r#"{"data": {"access_token": "xyz", "refresh_token": "r"}}"#;
        let captured = extract_login_token(ResponseKind::UserLogin, 200, body);
        assert_eq!(captured, Some((Role::User, "xyz".to_string())));
    }

    #[test]
    fn test_no_capture_on_failed_status() {
        let captured = extract_login_token(ResponseKind::AdminLogin, 401, r#"{"token": "abc"}"#);
        assert_eq!(captured, None);
    }

    #[test]
    fn test_no_capture_for_generic_responses() {
        let captured = extract_login_token(ResponseKind::Generic, 200, r#"{"token": "abc"}"#);
        assert_eq!(captured, None);
    }

    #[test]
    fn test_no_capture_when_shape_is_wrong() {
        assert_eq!(
            extract_login_token(ResponseKind::AdminLogin, 200, r#"{"jwt": "abc"}"#),
            None
        );
        assert_eq!(extract_login_token(ResponseKind::UserLogin, 200, "not json"), None);
    }

    #[test]
    fn test_record_from_http_response_keeps_status() {
        let endpoint = ApiEndpoint::new(Role::Admin, "GET", "/api/admin/jobs", "List Jobs", "");
        let response = ApiResponse {
            status: 404,
            status_text: "Not Found".to_string(),
            body: r#"{"error": "missing"}"#.to_string(),
            duration: Duration::from_millis(31),
            is_error: false,
            error_message: None,
        };

        let record = record_from_response(endpoint, None, response, "09:00:00".to_string());

        assert_eq!(record.status, Some(404));
        assert!(!record.succeeded);
        assert_eq!(record.elapsed, Duration::from_millis(31));
    }

    #[test]
    fn test_record_from_transport_failure_has_no_status() {
        let endpoint = ApiEndpoint::new(Role::Admin, "GET", "/api/admin/jobs", "List Jobs", "");
        let response = ApiResponse::error("Request failed: connection refused".to_string());

        let record = record_from_response(endpoint, None, response, "09:00:00".to_string());

        assert_eq!(record.status, None);
        assert!(!record.succeeded);
        assert!(record.error_message.unwrap().contains("connection refused"));
    }

    #[test]
    fn test_record_success_range() {
        let endpoint = ApiEndpoint::new(Role::User, "GET", "/api/vf/v1/ping", "Ping", "");
        let mut response = ApiResponse {
            status: 204,
            status_text: "No Content".to_string(),
            body: String::new(),
            duration: Duration::from_millis(3),
            is_error: false,
            error_message: None,
        };

        let record =
            record_from_response(endpoint.clone(), None, response.clone(), "t".to_string());
        assert!(record.succeeded);

        response.status = 500;
        let record = record_from_response(endpoint, None, response, "t".to_string());
        assert!(!record.succeeded);
    }
}
