//! Table browser operations
//!
//! Fetches the table list (with an offline fallback) and pages of rows.
//! Page responses carry the sequence number of the fetch that asked for
//! them; anything superseded by a newer fetch is dropped instead of
//! clobbering fresher rows.

use crate::auth::Role;
use crate::client::{ApiClient, ApiError};
use crate::state::{AppState, ExplorerState};
use crate::types::{ColumnDescriptor, LoadingState, PageResult, TableDescriptor};
use std::ops::RangeInclusive;
use std::sync::{Arc, RwLock};

/// Rows requested per page.
pub const PAGE_SIZE: u32 = 20;

/// At most this many numbered page buttons render at once.
pub const PAGE_WINDOW: u32 = 5;

/// Placeholder catalog shown whenever the table list cannot be fetched, so
/// the screen stays browsable against a dead backend.
pub fn fallback_tables() -> Vec<TableDescriptor> {
    let placeholders = [
        ("users", "User account information"),
        ("jobs", "Job processing records"),
        ("files", "File upload records"),
        ("sessions", "User session data"),
        ("permissions", "Permission configuration"),
        ("email_logs", "Email delivery log"),
        ("audit_logs", "System audit log"),
    ];

    placeholders
        .iter()
        .map(|(name, description)| TableDescriptor {
            name: name.to_string(),
            row_count: 0,
            size_mb: 0.1,
            description: description.to_string(),
        })
        .collect()
}

/// Fetch the table catalog in the background. Any failure, including a
/// missing admin token, swaps in the fallback list.
pub fn fetch_tables_background(state: Arc<RwLock<AppState>>, client: ApiClient) {
    let token = {
        let mut s = state.write().unwrap();
        s.explorer.tables_loading = LoadingState::Fetching;
        s.tokens.get(Role::Admin).map(|t| t.to_string())
    };

    tokio::spawn(async move {
        let tables = match token {
            Some(token) => client
                .fetch_tables(&token)
                .await
                .unwrap_or_else(|_| fallback_tables()),
            None => fallback_tables(),
        };

        let mut s = state.write().unwrap();
        s.explorer.tables = tables;
        s.explorer.tables_loading = LoadingState::Complete;
    });
}

/// Select a table: selection sticks immediately, browsing restarts at
/// page 1.
pub fn select_table_background(state: Arc<RwLock<AppState>>, client: ApiClient, table: String) {
    {
        let mut s = state.write().unwrap();
        s.explorer.selected_table = Some(table.clone());
    }
    fetch_page_background(state, client, table, 1);
}

/// Fetch one page of rows in the background.
pub fn fetch_page_background(
    state: Arc<RwLock<AppState>>,
    client: ApiClient,
    table: String,
    page: u32,
) {
    let (token, seq) = {
        let mut s = state.write().unwrap();
        s.explorer.fetch_seq += 1;
        let seq = s.explorer.fetch_seq;
        s.explorer.page_loading = LoadingState::Fetching;

        match s.tokens.get(Role::Admin) {
            Some(token) => (token.to_string(), seq),
            None => {
                let message = ApiError::MissingCredentials(Role::Admin).to_string();
                s.explorer.clear_page();
                s.explorer.page_loading = LoadingState::Error(message);
                return;
            }
        }
    };

    tokio::spawn(async move {
        let result = client.fetch_table_page(&token, &table, page, PAGE_SIZE).await;

        let mut s = state.write().unwrap();
        apply_page_result(&mut s.explorer, seq, result);
    });
}

/// Write one page-fetch outcome into the browser state, unless a newer
/// fetch has been issued since.
pub(crate) fn apply_page_result(
    explorer: &mut ExplorerState,
    seq: u64,
    result: Result<PageResult, ApiError>,
) {
    if explorer.fetch_seq != seq {
        return;
    }

    match result {
        Ok(page) => {
            explorer.apply_page(page);
            explorer.page_loading = LoadingState::Complete;
        }
        Err(err) => {
            let message = match err {
                ApiError::Backend { message, .. } => {
                    format!("Failed to fetch table data: {}", message)
                }
                other => other.to_string(),
            };
            explorer.clear_page();
            explorer.page_loading = LoadingState::Error(message);
        }
    }
}

/// The numbered page buttons to show. Up to PAGE_WINDOW buttons centered
/// on the current page, clamped to the valid range.
pub fn page_window(current_page: u32, total_pages: u32) -> RangeInclusive<u32> {
    if total_pages <= PAGE_WINDOW {
        return 1..=total_pages;
    }

    let start = current_page.saturating_sub(2).max(1);
    let end = (start + PAGE_WINDOW - 1).min(total_pages);
    start..=end
}

/// Display text for one grid cell. None means null or absent, which the
/// grid renders as its own placeholder marker rather than a value.
pub fn cell_text(
    row: &serde_json::Map<String, serde_json::Value>,
    column: &str,
) -> Option<String> {
    match row.get(column) {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s.clone()),
        Some(other) => Some(other.to_string()),
    }
}

/// Widest cell per column on the current page, capped so one long value
/// cannot push every other column off screen. Never narrower than the
/// column name or the null placeholder.
pub fn column_widths(
    columns: &[ColumnDescriptor],
    rows: &[serde_json::Map<String, serde_json::Value>],
) -> Vec<usize> {
    const MAX_CELL_WIDTH: usize = 24;
    const NULL_WIDTH: usize = 4;

    columns
        .iter()
        .map(|column| {
            let mut width = column.name.chars().count().max(NULL_WIDTH);
            for row in rows {
                if let Some(text) = cell_text(row, &column.name) {
                    width = width.max(text.chars().count());
                }
            }
            width.min(MAX_CELL_WIDTH)
        })
        .collect()
}

/// Pad or truncate one cell to its column width. Truncation keeps the
/// leading characters and marks the cut with an ellipsis.
pub fn fit_cell(text: &str, width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= width {
        return format!("{:<width$}", text);
    }

    let kept: String = chars[..width.saturating_sub(1)].iter().collect();
    format!("{kept}…")
}
