//! Table browser handlers: picking a table, paging and refreshing.

use super::helpers::log_debug;
use crate::client::ApiClient;
use crate::explorer::{fetch_page_background, fetch_tables_background, select_table_background};
use crate::state::AppState;
use crate::types::PanelFocus;
use std::sync::{Arc, RwLock};

/// Enter on the table list: load page one of the highlighted table.
pub fn handle_table_select(state: Arc<RwLock<AppState>>, client: &ApiClient) {
    let table = {
        let s = state.read().unwrap();
        if s.explorer.panel_focus != PanelFocus::List {
            return;
        }
        s.explorer
            .tables
            .get(s.explorer.selected_table_index)
            .map(|t| t.name.clone())
    };

    if let Some(table) = table {
        log_debug(&format!("Browsing table: {}", table));
        select_table_background(state, client.clone(), table);
    }
}

/// Step one page forward. At the last page this is a no-op, no request.
pub fn handle_page_next(state: Arc<RwLock<AppState>>, client: &ApiClient) {
    let target = {
        let s = state.read().unwrap();
        match &s.explorer.selected_table {
            Some(table) if s.explorer.current_page < s.explorer.total_pages => {
                Some((table.clone(), s.explorer.current_page + 1))
            }
            _ => None,
        }
    };

    if let Some((table, page)) = target {
        fetch_page_background(state, client.clone(), table, page);
    }
}

/// Step one page back. At page one this is a no-op, no request.
pub fn handle_page_prev(state: Arc<RwLock<AppState>>, client: &ApiClient) {
    let target = {
        let s = state.read().unwrap();
        match &s.explorer.selected_table {
            Some(table) if s.explorer.current_page > 1 => {
                Some((table.clone(), s.explorer.current_page - 1))
            }
            _ => None,
        }
    };

    if let Some((table, page)) = target {
        fetch_page_background(state, client.clone(), table, page);
    }
}

/// Reload the table list.
pub fn handle_refresh(state: Arc<RwLock<AppState>>, client: &ApiClient) {
    {
        let s = state.read().unwrap();
        if s.explorer.tables_loading.is_fetching() {
            return;
        }
    }
    log_debug("Refreshing table list");
    fetch_tables_background(state, client.clone());
}
