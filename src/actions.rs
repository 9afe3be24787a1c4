use crate::auth::Role;
use crate::catalog::{category_key, role_key};
use crate::state::{AppState, TesterState};
use crate::types::{ApiEndpoint, DetailTab, InputMode, LoadingState, PanelFocus, RenderItem, Screen};

/// Represents all possible synchronous state changes in the application.
/// Input handling translates key events into actions; anything that needs
/// the network goes through the background fetch functions instead.
#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    // Screen and panel navigation
    SwitchScreen(Screen),
    NavigateUp,
    NavigateDown,
    NavigateTabForward,
    NavigateTabBackward,

    // Activation of the focused row: toggles headers, selects endpoints,
    // opens history records
    ActivateSelection,

    // Catalog search
    EnterSearchMode,
    ExitSearchMode,
    AppendToSearchQuery(String),
    BackspaceSearchQuery,
    ClearSearchQuery,

    // Token modal
    EnterTokenInputMode(Role),
    ExitTokenInputMode,
    ToggleTokenRole,
    AppendToTokenInput(String),
    BackspaceTokenInput,
    ClearTokenInput,
    SubmitToken,

    // Base URL modal
    EnterUrlInputMode { base_url: String },
    ExitUrlInputMode,
    AppendToUrlInput(String),
    BackspaceUrlInput,
    ClearUrlInput,

    // Body editor modal
    EnterBodyEditMode,
    ExitBodyEditMode,

    // Test history
    ClearHistory,
    SetYankFlash(bool),

    // Job deletion
    RequestDeleteJob(i64),
    CancelDeleteJob,

    // Error dismissal
    DismissError,
}

/// Apply an action to the application state.
/// This is a pure state transformation function; all synchronous mutations
/// go through here so behavior stays testable without a terminal.
pub fn apply_action(action: AppAction, state: &mut AppState) {
    match action {
        // Screens and panels
        AppAction::SwitchScreen(screen) => {
            state.screen = screen;
        }
        AppAction::NavigateUp => match state.screen {
            Screen::Tester => match (&state.tester.panel_focus, &state.tester.detail_tab) {
                (PanelFocus::List, _) => {
                    state.tester.selected_item = state.tester.selected_item.saturating_sub(1);
                }
                (PanelFocus::Detail, DetailTab::Response) => {
                    response_line_up(&mut state.tester);
                }
                (PanelFocus::Detail, DetailTab::History) => {
                    state.tester.history_selected = state.tester.history_selected.saturating_sub(1);
                }
                (PanelFocus::Detail, DetailTab::Endpoint) => {}
            },
            Screen::Explorer => match state.explorer.panel_focus {
                PanelFocus::List => {
                    state.explorer.selected_table_index =
                        state.explorer.selected_table_index.saturating_sub(1);
                }
                PanelFocus::Detail => {
                    state.explorer.selected_row = state.explorer.selected_row.saturating_sub(1);
                }
            },
            Screen::Jobs => {
                state.jobs.selected = state.jobs.selected.saturating_sub(1);
            }
        },
        AppAction::NavigateDown => match state.screen {
            Screen::Tester => match (&state.tester.panel_focus, &state.tester.detail_tab) {
                (PanelFocus::List, _) => {
                    let max = state.tester.render_items.len().saturating_sub(1);
                    if state.tester.selected_item < max {
                        state.tester.selected_item += 1;
                    }
                }
                (PanelFocus::Detail, DetailTab::Response) => {
                    response_line_down(&mut state.tester);
                }
                (PanelFocus::Detail, DetailTab::History) => {
                    let max = state.tester.history.len().saturating_sub(1);
                    if state.tester.history_selected < max {
                        state.tester.history_selected += 1;
                    }
                }
                (PanelFocus::Detail, DetailTab::Endpoint) => {}
            },
            Screen::Explorer => match state.explorer.panel_focus {
                PanelFocus::List => {
                    let max = state.explorer.tables.len().saturating_sub(1);
                    if state.explorer.selected_table_index < max {
                        state.explorer.selected_table_index += 1;
                    }
                }
                PanelFocus::Detail => {
                    let max = state.explorer.rows.len().saturating_sub(1);
                    if state.explorer.selected_row < max {
                        state.explorer.selected_row += 1;
                    }
                }
            },
            Screen::Jobs => {
                let max = state.jobs.jobs.len().saturating_sub(1);
                if state.jobs.selected < max {
                    state.jobs.selected += 1;
                }
            }
        },
        AppAction::NavigateTabForward => match state.screen {
            Screen::Tester => {
                use DetailTab::*;
                match (&state.tester.panel_focus, &state.tester.detail_tab) {
                    (PanelFocus::List, _) => {
                        state.tester.panel_focus = PanelFocus::Detail;
                        state.tester.detail_tab = Endpoint;
                    }
                    (PanelFocus::Detail, Endpoint) => {
                        state.tester.detail_tab = Response;
                    }
                    (PanelFocus::Detail, Response) => {
                        state.tester.detail_tab = History;
                    }
                    (PanelFocus::Detail, History) => {
                        state.tester.panel_focus = PanelFocus::List;
                        state.tester.detail_tab = Endpoint;
                    }
                }
            }
            Screen::Explorer => toggle_explorer_panel(state),
            Screen::Jobs => {}
        },
        AppAction::NavigateTabBackward => match state.screen {
            Screen::Tester => {
                use DetailTab::*;
                match (&state.tester.panel_focus, &state.tester.detail_tab) {
                    (PanelFocus::List, _) => {
                        state.tester.panel_focus = PanelFocus::Detail;
                        state.tester.detail_tab = History;
                    }
                    (PanelFocus::Detail, History) => {
                        state.tester.detail_tab = Response;
                    }
                    (PanelFocus::Detail, Response) => {
                        state.tester.detail_tab = Endpoint;
                    }
                    (PanelFocus::Detail, Endpoint) => {
                        state.tester.panel_focus = PanelFocus::List;
                    }
                }
            }
            Screen::Explorer => toggle_explorer_panel(state),
            Screen::Jobs => {}
        },

        // Activation
        AppAction::ActivateSelection => {
            if state.screen != Screen::Tester {
                return;
            }
            match state.tester.panel_focus {
                PanelFocus::List => {
                    let item = state
                        .tester
                        .render_items
                        .get(state.tester.selected_item)
                        .cloned();
                    match item {
                        Some(RenderItem::RoleHeader { role, .. }) => {
                            toggle_collapse(&mut state.tester, role_key(role));
                        }
                        Some(RenderItem::CategoryHeader { role, name, .. }) => {
                            toggle_collapse(&mut state.tester, category_key(role, &name));
                        }
                        Some(RenderItem::Endpoint { endpoint }) => {
                            select_endpoint(&mut state.tester, endpoint);
                        }
                        None => {}
                    }
                }
                PanelFocus::Detail => {
                    // Opening a history record replays it into the response view
                    if state.tester.detail_tab == DetailTab::History
                        && state.tester.history_selected < state.tester.history.len()
                    {
                        state.tester.response_view = Some(state.tester.history_selected);
                        state.tester.detail_tab = DetailTab::Response;
                        state.tester.response_selected_line = 0;
                        state.tester.response_scroll = 0;
                    }
                }
            }
        }

        // Search
        AppAction::EnterSearchMode => {
            state.input_mode = InputMode::Searching;
            state.tester.search_query.clear();
            state.tester.update_filtered();
            state.tester.selected_item = 0;
        }
        AppAction::ExitSearchMode => {
            state.input_mode = InputMode::Normal;
        }
        AppAction::AppendToSearchQuery(text) => {
            state.tester.search_query.push_str(&text);
            state.tester.update_filtered();
            state.tester.selected_item = 0;
        }
        AppAction::BackspaceSearchQuery => {
            state.tester.search_query.pop();
            state.tester.update_filtered();
            state.tester.selected_item = 0;
        }
        AppAction::ClearSearchQuery => {
            state.tester.search_query.clear();
            state.tester.update_filtered();
            state.tester.selected_item = 0;
        }

        // Token modal
        AppAction::EnterTokenInputMode(role) => {
            state.input_mode = InputMode::EnteringToken;
            state.token_input_role = role;
            state.token_input = state
                .tokens
                .get(role)
                .map(str::to_string)
                .unwrap_or_default();
        }
        AppAction::ExitTokenInputMode => {
            state.input_mode = InputMode::Normal;
            state.token_input.clear();
        }
        AppAction::ToggleTokenRole => {
            let role = state.token_input_role.other();
            state.token_input_role = role;
            state.token_input = state
                .tokens
                .get(role)
                .map(str::to_string)
                .unwrap_or_default();
        }
        AppAction::AppendToTokenInput(text) => {
            state.token_input.push_str(&text);
        }
        AppAction::BackspaceTokenInput => {
            state.token_input.pop();
        }
        AppAction::ClearTokenInput => {
            state.token_input.clear();
        }
        AppAction::SubmitToken => {
            let token = state.token_input.trim().to_string();
            if token.is_empty() {
                // An empty submit logs the role out
                state.tokens.clear(state.token_input_role);
            } else {
                state.tokens.set(state.token_input_role, token);
            }
            state.input_mode = InputMode::Normal;
            state.token_input.clear();
        }

        // Base URL modal
        AppAction::EnterUrlInputMode { base_url } => {
            state.input_mode = InputMode::EnteringUrl;
            state.url_input = base_url;
        }
        AppAction::ExitUrlInputMode => {
            state.input_mode = InputMode::Normal;
            state.url_input.clear();
        }
        AppAction::AppendToUrlInput(text) => {
            state.url_input.push_str(&text);
        }
        AppAction::BackspaceUrlInput => {
            state.url_input.pop();
        }
        AppAction::ClearUrlInput => {
            state.url_input.clear();
        }

        // Body editor modal
        AppAction::EnterBodyEditMode => {
            let editable = state
                .tester
                .selected_endpoint
                .as_ref()
                .is_some_and(|e| e.supports_body() && !e.file_upload);
            if editable {
                state.input_mode = InputMode::EnteringBody;
                state.body_error = None;
            }
        }
        AppAction::ExitBodyEditMode => {
            state.input_mode = InputMode::Normal;
            state.body_error = None;
        }

        // Test history
        AppAction::ClearHistory => {
            state.tester.history.clear();
            state.tester.response_view = None;
            state.tester.history_selected = 0;
            state.tester.response_selected_line = 0;
            state.tester.response_scroll = 0;
        }
        AppAction::SetYankFlash(on) => {
            state.tester.yank_flash = on;
        }

        // Job deletion
        AppAction::RequestDeleteJob(id) => {
            state.jobs.pending_delete = Some(id);
            state.input_mode = InputMode::ConfirmDeleteJob;
        }
        AppAction::CancelDeleteJob => {
            state.jobs.pending_delete = None;
            state.input_mode = InputMode::Normal;
        }

        // Error dismissal, scoped to the visible screen
        AppAction::DismissError => match state.screen {
            Screen::Tester => {
                state.tester.error = None;
            }
            Screen::Explorer => {
                if matches!(state.explorer.page_loading, LoadingState::Error(_)) {
                    state.explorer.page_loading = LoadingState::Complete;
                }
            }
            Screen::Jobs => {
                if matches!(state.jobs.loading, LoadingState::Error(_)) {
                    state.jobs.loading = LoadingState::Complete;
                }
            }
        },
    }
}

fn toggle_explorer_panel(state: &mut AppState) {
    state.explorer.panel_focus = match state.explorer.panel_focus {
        PanelFocus::List => PanelFocus::Detail,
        PanelFocus::Detail => PanelFocus::List,
    };
}

/// Flip one collapse key, rebuild the tree and keep the cursor in bounds.
fn toggle_collapse(tester: &mut TesterState, key: String) {
    if !tester.collapsed.remove(&key) {
        tester.collapsed.insert(key);
    }
    tester.rebuild_render_items();
    if tester.selected_item >= tester.render_items.len() {
        tester.selected_item = tester.render_items.len().saturating_sub(1);
    }
}

/// Make an endpoint the current one. The body buffer is reseeded from the
/// endpoint's sample every time, and the previous selection's response,
/// error and timing no longer show.
pub(crate) fn select_endpoint(tester: &mut TesterState, endpoint: ApiEndpoint) {
    let seeded = endpoint
        .sample_body
        .as_ref()
        .and_then(|body| serde_json::to_string_pretty(body).ok())
        .unwrap_or_default();
    tester.body_editor.set_content(seeded);
    tester.error = None;
    tester.response_view = None;
    tester.response_selected_line = 0;
    tester.response_scroll = 0;
    tester.selected_endpoint = Some(endpoint);
}

fn response_line_up(tester: &mut TesterState) {
    if tester.response_selected_line > 0 {
        tester.response_selected_line -= 1;

        // Keep the selection inside the viewport
        if tester.response_selected_line < tester.response_scroll {
            tester.response_scroll = tester.response_selected_line;
        }
    }
}

fn response_line_down(tester: &mut TesterState) {
    let total_lines = tester.response_line_count();
    if total_lines > 0 && tester.response_selected_line < total_lines - 1 {
        tester.response_selected_line += 1;

        // Assume a 20 line viewport and scroll to keep the selection visible
        let viewport_height = 20;
        let scroll_bottom = tester.response_scroll + viewport_height;
        if tester.response_selected_line >= scroll_bottom {
            tester.response_scroll = tester
                .response_selected_line
                .saturating_sub(viewport_height - 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ResponseKind, TestRecord};
    use std::time::Duration;

    fn create_test_state() -> AppState {
        AppState::new()
    }

    fn record_with_body(name: &str, body: &str) -> TestRecord {
        let endpoint = ApiEndpoint::new(Role::Admin, "GET", "/api/admin/jobs", name, "");
        TestRecord {
            endpoint,
            status: Some(200),
            status_text: "OK".to_string(),
            body: body.to_string(),
            elapsed: Duration::from_millis(5),
            succeeded: true,
            request_body: None,
            timestamp: "10:00:00".to_string(),
            error_message: None,
        }
    }

    fn endpoint_position(state: &AppState, predicate: impl Fn(&ApiEndpoint) -> bool) -> usize {
        state
            .tester
            .render_items
            .iter()
            .position(|item| matches!(item, RenderItem::Endpoint { endpoint } if predicate(endpoint)))
            .unwrap()
    }

    #[test]
    fn test_switch_screen_keeps_other_screens_untouched() {
        let mut state = create_test_state();
        state.tester.selected_item = 4;

        apply_action(AppAction::SwitchScreen(Screen::Jobs), &mut state);
        assert_eq!(state.screen, Screen::Jobs);

        apply_action(AppAction::SwitchScreen(Screen::Tester), &mut state);
        assert_eq!(state.tester.selected_item, 4);
    }

    #[test]
    fn test_navigate_catalog_saturates_at_both_ends() {
        let mut state = create_test_state();

        apply_action(AppAction::NavigateUp, &mut state);
        assert_eq!(state.tester.selected_item, 0);

        apply_action(AppAction::NavigateDown, &mut state);
        apply_action(AppAction::NavigateDown, &mut state);
        assert_eq!(state.tester.selected_item, 2);

        state.tester.selected_item = state.tester.render_items.len() - 1;
        apply_action(AppAction::NavigateDown, &mut state);
        assert_eq!(state.tester.selected_item, state.tester.render_items.len() - 1);
    }

    #[test]
    fn test_navigate_jobs_clamps_to_list() {
        let mut state = create_test_state();
        state.screen = Screen::Jobs;
        state.jobs.jobs = vec![
            serde_json::from_value(serde_json::json!({"id": 1, "job_type": "a", "status": "pending"}))
                .unwrap(),
            serde_json::from_value(serde_json::json!({"id": 2, "job_type": "b", "status": "pending"}))
                .unwrap(),
        ];

        for _ in 0..5 {
            apply_action(AppAction::NavigateDown, &mut state);
        }
        assert_eq!(state.jobs.selected, 1);

        for _ in 0..5 {
            apply_action(AppAction::NavigateUp, &mut state);
        }
        assert_eq!(state.jobs.selected, 0);
    }

    #[test]
    fn test_tab_cycle_forward_wraps_through_detail_tabs() {
        let mut state = create_test_state();
        assert_eq!(state.tester.panel_focus, PanelFocus::List);

        apply_action(AppAction::NavigateTabForward, &mut state);
        assert_eq!(state.tester.panel_focus, PanelFocus::Detail);
        assert_eq!(state.tester.detail_tab, DetailTab::Endpoint);

        apply_action(AppAction::NavigateTabForward, &mut state);
        assert_eq!(state.tester.detail_tab, DetailTab::Response);

        apply_action(AppAction::NavigateTabForward, &mut state);
        assert_eq!(state.tester.detail_tab, DetailTab::History);

        apply_action(AppAction::NavigateTabForward, &mut state);
        assert_eq!(state.tester.panel_focus, PanelFocus::List);
        assert_eq!(state.tester.detail_tab, DetailTab::Endpoint);
    }

    #[test]
    fn test_tab_cycle_backward_reverses_the_loop() {
        let mut state = create_test_state();

        apply_action(AppAction::NavigateTabBackward, &mut state);
        assert_eq!(state.tester.panel_focus, PanelFocus::Detail);
        assert_eq!(state.tester.detail_tab, DetailTab::History);

        apply_action(AppAction::NavigateTabBackward, &mut state);
        assert_eq!(state.tester.detail_tab, DetailTab::Response);

        apply_action(AppAction::NavigateTabBackward, &mut state);
        assert_eq!(state.tester.detail_tab, DetailTab::Endpoint);

        apply_action(AppAction::NavigateTabBackward, &mut state);
        assert_eq!(state.tester.panel_focus, PanelFocus::List);
    }

    #[test]
    fn test_tab_toggles_explorer_panel() {
        let mut state = create_test_state();
        state.screen = Screen::Explorer;

        apply_action(AppAction::NavigateTabForward, &mut state);
        assert_eq!(state.explorer.panel_focus, PanelFocus::Detail);

        apply_action(AppAction::NavigateTabForward, &mut state);
        assert_eq!(state.explorer.panel_focus, PanelFocus::List);
    }

    #[test]
    fn test_activate_role_header_collapses_and_restores() {
        let mut state = create_test_state();
        let full = state.tester.render_items.len();

        apply_action(AppAction::ActivateSelection, &mut state);
        assert!(state.tester.collapsed.contains("admin"));
        assert!(state.tester.render_items.len() < full);

        apply_action(AppAction::ActivateSelection, &mut state);
        assert!(!state.tester.collapsed.contains("admin"));
        assert_eq!(state.tester.render_items.len(), full);
    }

    #[test]
    fn test_activate_category_header_collapses_category() {
        let mut state = create_test_state();
        state.tester.selected_item = 1;
        assert!(matches!(
            state.tester.render_items[1],
            RenderItem::CategoryHeader { .. }
        ));

        apply_action(AppAction::ActivateSelection, &mut state);
        assert_eq!(state.tester.collapsed.len(), 1);
        assert!(state.tester.collapsed.iter().all(|k| k.starts_with("admin.")));
    }

    #[test]
    fn test_activate_endpoint_seeds_body_from_sample() {
        let mut state = create_test_state();
        state.tester.error = Some("old failure".to_string());
        state.tester.selected_item = endpoint_position(&state, |e| {
            e.response_kind == ResponseKind::AdminLogin
        });

        apply_action(AppAction::ActivateSelection, &mut state);

        let selected = state.tester.selected_endpoint.as_ref().unwrap();
        assert_eq!(selected.response_kind, ResponseKind::AdminLogin);
        assert!(state.tester.body_editor.content().contains("admin@example.com"));
        assert!(state.tester.body_editor.content().contains('\n'));
        assert_eq!(state.tester.error, None);
    }

    #[test]
    fn test_activate_endpoint_hides_previous_response() {
        let mut state = create_test_state();
        state.tester.push_record(record_with_body("earlier", "{\"ok\": true}"));
        assert_eq!(state.tester.response_view, Some(0));

        state.tester.selected_item = endpoint_position(&state, |e| e.method == "GET");
        apply_action(AppAction::ActivateSelection, &mut state);

        // History keeps the record, the Response tab no longer shows it.
        assert_eq!(state.tester.history.len(), 1);
        assert_eq!(state.tester.response_view, None);
        assert!(state.tester.viewed_record().is_none());
    }

    #[test]
    fn test_activate_endpoint_without_sample_empties_buffer() {
        let mut state = create_test_state();
        state.tester.selected_item = endpoint_position(&state, |e| {
            e.response_kind == ResponseKind::AdminLogin
        });
        apply_action(AppAction::ActivateSelection, &mut state);
        assert!(!state.tester.body_editor.content().is_empty());

        state.tester.selected_item =
            endpoint_position(&state, |e| e.method == "GET" && e.sample_body.is_none());
        apply_action(AppAction::ActivateSelection, &mut state);

        assert!(state.tester.body_editor.content().is_empty());
    }

    #[test]
    fn test_activate_history_row_opens_response_view() {
        let mut state = create_test_state();
        state.tester.history.push(record_with_body("newest", "{}"));
        state.tester.history.push(record_with_body("older", "{}"));
        state.tester.panel_focus = PanelFocus::Detail;
        state.tester.detail_tab = DetailTab::History;
        state.tester.history_selected = 1;
        state.tester.response_selected_line = 3;

        apply_action(AppAction::ActivateSelection, &mut state);

        assert_eq!(state.tester.detail_tab, DetailTab::Response);
        assert_eq!(state.tester.response_view, Some(1));
        assert_eq!(state.tester.response_selected_line, 0);
        assert_eq!(state.tester.viewed_record().unwrap().endpoint.name, "older");
    }

    #[test]
    fn test_search_edits_refilter_and_reset_cursor() {
        let mut state = create_test_state();
        let full = state.tester.render_items.len();
        state.tester.selected_item = 10;

        apply_action(AppAction::EnterSearchMode, &mut state);
        assert_eq!(state.input_mode, InputMode::Searching);
        assert_eq!(state.tester.selected_item, 0);

        apply_action(AppAction::AppendToSearchQuery("llm".to_string()), &mut state);
        assert_eq!(state.tester.filtered.len(), 3);
        assert!(state.tester.render_items.len() < full);

        apply_action(AppAction::ClearSearchQuery, &mut state);
        assert_eq!(state.tester.render_items.len(), full);
    }

    #[test]
    fn test_exit_search_keeps_the_filter() {
        let mut state = create_test_state();

        apply_action(AppAction::EnterSearchMode, &mut state);
        apply_action(AppAction::AppendToSearchQuery("export".to_string()), &mut state);
        apply_action(AppAction::ExitSearchMode, &mut state);

        assert_eq!(state.input_mode, InputMode::Normal);
        assert_eq!(state.tester.search_query, "export");
        assert_eq!(state.tester.filtered.len(), 4);
    }

    #[test]
    fn test_token_submit_fills_only_that_role_slot() {
        let mut state = create_test_state();

        apply_action(AppAction::EnterTokenInputMode(Role::Admin), &mut state);
        assert_eq!(state.input_mode, InputMode::EnteringToken);
        assert_eq!(state.token_input, "");

        apply_action(AppAction::AppendToTokenInput("abc".to_string()), &mut state);
        apply_action(AppAction::SubmitToken, &mut state);

        assert_eq!(state.tokens.get(Role::Admin), Some("abc"));
        assert_eq!(state.tokens.get(Role::User), None);
        assert_eq!(state.input_mode, InputMode::Normal);
        assert_eq!(state.token_input, "");
    }

    #[test]
    fn test_token_submit_trims_whitespace() {
        let mut state = create_test_state();

        apply_action(AppAction::EnterTokenInputMode(Role::User), &mut state);
        apply_action(
            AppAction::AppendToTokenInput("  spaced-token  ".to_string()),
            &mut state,
        );
        apply_action(AppAction::SubmitToken, &mut state);

        assert_eq!(state.tokens.get(Role::User), Some("spaced-token"));
    }

    #[test]
    fn test_empty_token_submit_logs_the_role_out() {
        let mut state = create_test_state();
        state.tokens.set(Role::Admin, "stale".to_string());

        apply_action(AppAction::EnterTokenInputMode(Role::Admin), &mut state);
        assert_eq!(state.token_input, "stale");

        apply_action(AppAction::ClearTokenInput, &mut state);
        apply_action(AppAction::SubmitToken, &mut state);

        assert_eq!(state.tokens.get(Role::Admin), None);
    }

    #[test]
    fn test_toggle_token_role_reseeds_buffer() {
        let mut state = create_test_state();
        state.tokens.set(Role::User, "u-token".to_string());

        apply_action(AppAction::EnterTokenInputMode(Role::Admin), &mut state);
        assert_eq!(state.token_input, "");

        apply_action(AppAction::ToggleTokenRole, &mut state);
        assert_eq!(state.token_input_role, Role::User);
        assert_eq!(state.token_input, "u-token");

        apply_action(AppAction::ToggleTokenRole, &mut state);
        assert_eq!(state.token_input_role, Role::Admin);
        assert_eq!(state.token_input, "");
    }

    #[test]
    fn test_url_modal_buffer_round_trip() {
        let mut state = create_test_state();

        apply_action(
            AppAction::EnterUrlInputMode {
                base_url: "http://localhost:8080".to_string(),
            },
            &mut state,
        );
        assert_eq!(state.input_mode, InputMode::EnteringUrl);
        assert_eq!(state.url_input, "http://localhost:8080");

        for _ in 0..4 {
            apply_action(AppAction::BackspaceUrlInput, &mut state);
        }
        apply_action(AppAction::AppendToUrlInput("9090".to_string()), &mut state);
        assert_eq!(state.url_input, "http://localhost:9090");

        apply_action(AppAction::ExitUrlInputMode, &mut state);
        assert_eq!(state.input_mode, InputMode::Normal);
        assert_eq!(state.url_input, "");
    }

    #[test]
    fn test_body_edit_mode_needs_a_body_endpoint() {
        let mut state = create_test_state();

        apply_action(AppAction::EnterBodyEditMode, &mut state);
        assert_eq!(state.input_mode, InputMode::Normal);

        state.tester.selected_item =
            endpoint_position(&state, |e| e.method == "GET" && e.sample_body.is_none());
        apply_action(AppAction::ActivateSelection, &mut state);
        apply_action(AppAction::EnterBodyEditMode, &mut state);
        assert_eq!(state.input_mode, InputMode::Normal);

        state.tester.selected_item = endpoint_position(&state, |e| {
            e.response_kind == ResponseKind::AdminLogin
        });
        apply_action(AppAction::ActivateSelection, &mut state);
        apply_action(AppAction::EnterBodyEditMode, &mut state);
        assert_eq!(state.input_mode, InputMode::EnteringBody);
    }

    #[test]
    fn test_clear_history_resets_view_indices() {
        let mut state = create_test_state();
        state.tester.history.push(record_with_body("a", "{}"));
        state.tester.history.push(record_with_body("b", "{}"));
        state.tester.history_selected = 1;
        state.tester.response_view = Some(1);

        apply_action(AppAction::ClearHistory, &mut state);

        assert!(state.tester.history.is_empty());
        assert_eq!(state.tester.history_selected, 0);
        assert_eq!(state.tester.response_view, None);
    }

    #[test]
    fn test_delete_confirmation_flow() {
        let mut state = create_test_state();
        state.screen = Screen::Jobs;

        apply_action(AppAction::RequestDeleteJob(7), &mut state);
        assert_eq!(state.jobs.pending_delete, Some(7));
        assert_eq!(state.input_mode, InputMode::ConfirmDeleteJob);

        apply_action(AppAction::CancelDeleteJob, &mut state);
        assert_eq!(state.jobs.pending_delete, None);
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_dismiss_error_is_screen_scoped() {
        let mut state = create_test_state();
        state.tester.error = Some("boom".to_string());
        state.explorer.page_loading = LoadingState::Error("page".to_string());
        state.jobs.loading = LoadingState::Error("jobs".to_string());

        apply_action(AppAction::DismissError, &mut state);
        assert_eq!(state.tester.error, None);
        assert!(matches!(state.explorer.page_loading, LoadingState::Error(_)));

        state.screen = Screen::Explorer;
        apply_action(AppAction::DismissError, &mut state);
        assert_eq!(state.explorer.page_loading, LoadingState::Complete);
        assert!(matches!(state.jobs.loading, LoadingState::Error(_)));

        state.screen = Screen::Jobs;
        apply_action(AppAction::DismissError, &mut state);
        assert_eq!(state.jobs.loading, LoadingState::Complete);
    }

    #[test]
    fn test_response_line_navigation_tracks_viewport() {
        let mut state = create_test_state();
        let numbers: Vec<u32> = (0..30).collect();
        let body = serde_json::to_string(&numbers).unwrap();
        state.tester.push_record(record_with_body("big", &body));
        state.tester.panel_focus = PanelFocus::Detail;
        state.tester.detail_tab = DetailTab::Response;

        let total = state.tester.response_line_count();
        assert_eq!(total, 2 + 32);

        for _ in 0..100 {
            apply_action(AppAction::NavigateDown, &mut state);
        }
        assert_eq!(state.tester.response_selected_line, total - 1);
        assert!(state.tester.response_scroll > 0);

        for _ in 0..100 {
            apply_action(AppAction::NavigateUp, &mut state);
        }
        assert_eq!(state.tester.response_selected_line, 0);
        assert_eq!(state.tester.response_scroll, 0);
    }
}
