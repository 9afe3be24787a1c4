//! Job manager operations
//!
//! Lists jobs for the admin account and deletes individual jobs. The
//! screen renders exactly one of loading, error, empty, or the job list,
//! so every outcome here lands in `JobsState.loading`.

use crate::auth::Role;
use crate::client::{ApiClient, ApiError};
use crate::state::{AppState, JobsState};
use crate::types::{Job, LoadingState};
use std::sync::{Arc, RwLock};

/// Fetch the job list in the background. Without an admin token no
/// request is made and the screen shows the login hint instead.
pub fn fetch_jobs_background(state: Arc<RwLock<AppState>>, client: ApiClient) {
    let token = {
        let mut s = state.write().unwrap();
        s.jobs.loading = LoadingState::Fetching;

        match s.tokens.get(Role::Admin) {
            Some(token) => token.to_string(),
            None => {
                let message = ApiError::MissingCredentials(Role::Admin).to_string();
                s.jobs.loading = LoadingState::Error(message);
                return;
            }
        }
    };

    tokio::spawn(async move {
        let result = client.fetch_jobs(&token).await;

        let mut s = state.write().unwrap();
        apply_jobs_result(&mut s.jobs, result);
    });
}

/// Delete one job in the background. The list only changes if the server
/// confirms the delete.
pub fn delete_job_background(state: Arc<RwLock<AppState>>, client: ApiClient, id: i64) {
    let token = {
        let mut s = state.write().unwrap();
        s.jobs.deleting = Some(id);

        match s.tokens.get(Role::Admin) {
            Some(token) => token.to_string(),
            None => {
                s.jobs.deleting = None;
                let message = ApiError::MissingCredentials(Role::Admin).to_string();
                s.jobs.loading = LoadingState::Error(message);
                return;
            }
        }
    };

    tokio::spawn(async move {
        let result = client.delete_job(&token, id).await;

        let mut s = state.write().unwrap();
        apply_delete_result(&mut s.jobs, id, result);
    });
}

/// Write a list-fetch outcome into the job state.
pub(crate) fn apply_jobs_result(jobs: &mut JobsState, result: Result<Vec<Job>, ApiError>) {
    match result {
        Ok(list) => {
            if jobs.selected >= list.len() && !list.is_empty() {
                jobs.selected = list.len() - 1;
            }
            jobs.jobs = list;
            jobs.loading = LoadingState::Complete;
        }
        Err(err) => {
            let message = match err {
                ApiError::Backend { message, .. } => format!("Failed to fetch jobs: {}", message),
                other => other.to_string(),
            };
            jobs.loading = LoadingState::Error(message);
        }
    }
}

/// Write a delete outcome into the job state. Failures leave the list
/// untouched.
pub(crate) fn apply_delete_result(jobs: &mut JobsState, id: i64, result: Result<(), ApiError>) {
    jobs.deleting = None;

    match result {
        Ok(()) => {
            jobs.remove_job(id);
        }
        Err(_) => {
            jobs.loading = LoadingState::Error("Failed to delete job".to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn job(id: i64) -> Job {
        serde_json::from_value(json!({
            "id": id,
            "job_type": "export",
            "status": "completed",
            "created_at": "2025-01-01T00:00:00Z"
        }))
        .unwrap()
    }

    fn error_message(jobs: &JobsState) -> &str {
        match &jobs.loading {
            LoadingState::Error(message) => message,
            other => panic!("expected error state, got {:?}", other),
        }
    }

    #[test]
    fn test_fetch_jobs_without_token_never_reaches_the_network() {
        let state = Arc::new(RwLock::new(AppState::new()));
        let client = ApiClient::new("http://localhost:8080".to_string());

        fetch_jobs_background(Arc::clone(&state), client);

        let s = state.read().unwrap();
        assert_eq!(
            s.jobs.loading,
            LoadingState::Error("No admin token found. Please login first.".to_string())
        );
        assert!(s.jobs.jobs.is_empty());
    }

    #[test]
    fn test_apply_jobs_result_success_replaces_list() {
        let mut jobs = JobsState::new();
        apply_jobs_result(&mut jobs, Ok(vec![job(1), job(2)]));

        assert_eq!(jobs.jobs.len(), 2);
        assert_eq!(jobs.loading, LoadingState::Complete);
    }

    #[test]
    fn test_apply_jobs_result_success_clamps_selection() {
        let mut jobs = JobsState::new();
        jobs.selected = 5;
        apply_jobs_result(&mut jobs, Ok(vec![job(1), job(2)]));

        assert_eq!(jobs.selected, 1);
    }

    #[test]
    fn test_apply_jobs_result_unauthorized_message() {
        let mut jobs = JobsState::new();
        apply_jobs_result(&mut jobs, Err(ApiError::Unauthorized));

        assert_eq!(error_message(&jobs), "Authentication failed. Please login again.");
    }

    #[test]
    fn test_apply_jobs_result_backend_message_is_wrapped() {
        let mut jobs = JobsState::new();
        apply_jobs_result(
            &mut jobs,
            Err(ApiError::Backend {
                status: 500,
                message: "database offline".to_string(),
            }),
        );

        assert_eq!(error_message(&jobs), "Failed to fetch jobs: database offline");
    }

    #[test]
    fn test_apply_jobs_result_transport_message() {
        let mut jobs = JobsState::new();
        apply_jobs_result(
            &mut jobs,
            Err(ApiError::Transport("connection refused".to_string())),
        );

        assert_eq!(
            error_message(&jobs),
            "Cannot connect to backend server. Please ensure the server is running."
        );
    }

    #[test]
    fn test_apply_jobs_result_parse_message() {
        let mut jobs = JobsState::new();
        apply_jobs_result(
            &mut jobs,
            Err(ApiError::Parse("expected value at line 1".to_string())),
        );

        assert_eq!(
            error_message(&jobs),
            "Invalid response from server: expected value at line 1"
        );
    }

    #[test]
    fn test_apply_delete_result_success_removes_only_that_job() {
        let mut jobs = JobsState::new();
        jobs.jobs = vec![job(1), job(2), job(3)];
        jobs.deleting = Some(2);

        apply_delete_result(&mut jobs, 2, Ok(()));

        let ids: Vec<i64> = jobs.jobs.iter().map(|j| j.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(jobs.deleting, None);
    }

    #[test]
    fn test_apply_delete_result_failure_keeps_list() {
        let mut jobs = JobsState::new();
        jobs.jobs = vec![job(1), job(2), job(3)];
        jobs.deleting = Some(2);

        apply_delete_result(
            &mut jobs,
            2,
            Err(ApiError::Backend {
                status: 500,
                message: "busy".to_string(),
            }),
        );

        assert_eq!(jobs.jobs.len(), 3);
        assert_eq!(error_message(&jobs), "Failed to delete job");
        assert_eq!(jobs.deleting, None);
    }
}
