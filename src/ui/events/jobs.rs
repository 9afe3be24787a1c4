//! Job manager handlers: refresh and the delete flow up to the
//! confirmation modal.

use super::helpers::{apply, log_debug};
use crate::actions::AppAction;
use crate::client::ApiClient;
use crate::jobs::fetch_jobs_background;
use crate::state::AppState;
use std::sync::{Arc, RwLock};

/// Reload the job list.
pub fn handle_refresh(state: Arc<RwLock<AppState>>, client: &ApiClient) {
    {
        let s = state.read().unwrap();
        if s.jobs.loading.is_fetching() {
            return;
        }
    }
    log_debug("Refreshing job list");
    fetch_jobs_background(state, client.clone());
}

/// Ask for confirmation before deleting the highlighted job. Ignored while
/// another delete is still in flight.
pub fn handle_delete_request(state: Arc<RwLock<AppState>>) {
    let id = {
        let s = state.read().unwrap();
        if s.jobs.deleting.is_some() {
            log_debug("Delete already in progress");
            return;
        }
        s.jobs.selected_job().map(|j| j.id)
    };

    if let Some(id) = id {
        apply(state, AppAction::RequestDeleteJob(id));
    }
}
