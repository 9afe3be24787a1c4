//! Execution handlers for the test harness: running the selected endpoint
//! and the one-key logins.

use super::helpers::log_debug;
use crate::actions::select_endpoint;
use crate::auth::Role;
use crate::catalog::find_login;
use crate::request::execute_endpoint_background;
use crate::state::AppState;
use std::sync::{Arc, RwLock};

/// Run the currently selected endpoint. One request at a time; a second
/// Space while something is in flight does nothing.
pub fn handle_execute(state: Arc<RwLock<AppState>>, base_url: &str) {
    let endpoint = {
        let s = state.read().unwrap();
        if s.tester.executing.is_some() {
            log_debug("Request already in progress");
            return;
        }
        s.tester.selected_endpoint.clone()
    };

    match endpoint {
        Some(endpoint) => {
            log_debug(&format!("Executing: {} {}", endpoint.method, endpoint.path));
            execute_endpoint_background(state, endpoint, base_url.to_string());
        }
        None => log_debug("No endpoint selected"),
    }
}

/// Select the catalog's login entry for `role` and run it with its sample
/// credentials. On success the background task drops the token into the
/// matching slot.
pub fn handle_quick_login(state: Arc<RwLock<AppState>>, base_url: &str, role: Role) {
    let endpoint = {
        let s = state.read().unwrap();
        if s.tester.executing.is_some() {
            log_debug("Request already in progress");
            return;
        }
        find_login(&s.tester.catalog, role).cloned()
    };

    if let Some(endpoint) = endpoint {
        {
            let mut s = state.write().unwrap();
            select_endpoint(&mut s.tester, endpoint.clone());
        }
        log_debug(&format!("Quick login as {}", role.label()));
        execute_endpoint_background(state, endpoint, base_url.to_string());
    }
}
