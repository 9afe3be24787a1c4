//! Event handling for lazy-admin-tui.
//!
//! Input is processed in two layers. Modal input modes (URL, token, body
//! editor, delete confirmation, search) capture the keyboard completely and
//! are dispatched first. Normal mode translates keys into `AppAction`s for
//! the pure state transitions and calls the background fetch functions for
//! anything that needs the network.
//!
//! Handlers lock the shared `Arc<RwLock<AppState>>` briefly to read what
//! they need, drop the lock, then apply mutations under a separate write
//! lock. Nothing holds a lock across an await.

mod execution;
mod explorer;
mod helpers;
mod jobs;
mod modals;
mod search;
mod yank;

use crate::actions::AppAction;
use crate::auth::Role;
use crate::client::ApiClient;
use crate::state::AppState;
use crate::types::{DetailTab, InputMode, PanelFocus, Screen};
use color_eyre::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent};
use helpers::apply;
use std::sync::{Arc, RwLock};

/// Event handler for managing user input and state updates
#[derive(Debug, Default)]
pub struct EventHandler {
    pub should_quit: bool,
}

impl EventHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Poll for one input event and dispatch it. Returns the new base URL
    /// when the URL modal was submitted; the caller owns persisting it.
    pub fn handle_events(
        &mut self,
        state: Arc<RwLock<AppState>>,
        client: &ApiClient,
        base_url: &str,
    ) -> Result<Option<String>> {
        let mut url_submitted = None;

        if event::poll(std::time::Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                let input_mode = state.read().unwrap().input_mode.clone();

                match input_mode {
                    InputMode::EnteringUrl => {
                        url_submitted = modals::handle_url_input(key, state.clone())?;
                    }
                    InputMode::EnteringToken => {
                        modals::handle_token_input(key, state.clone())?;
                    }
                    InputMode::EnteringBody => {
                        modals::handle_body_input(key, state.clone())?;
                    }
                    InputMode::ConfirmDeleteJob => {
                        modals::handle_delete_confirmation(key, state.clone(), client)?;
                    }
                    InputMode::Searching => {
                        search::handle_search_input(key, state.clone())?;
                    }
                    InputMode::Normal => {
                        self.handle_normal_key(key, state, client, base_url);
                    }
                }
            }
        }

        Ok(url_submitted)
    }

    fn handle_normal_key(
        &mut self,
        key: KeyEvent,
        state: Arc<RwLock<AppState>>,
        client: &ApiClient,
        base_url: &str,
    ) {
        let screen = state.read().unwrap().screen;

        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
            }

            // Screen switching
            KeyCode::Char('1') => apply(state, AppAction::SwitchScreen(Screen::Tester)),
            KeyCode::Char('2') => apply(state, AppAction::SwitchScreen(Screen::Explorer)),
            KeyCode::Char('3') => apply(state, AppAction::SwitchScreen(Screen::Jobs)),

            // Navigation
            KeyCode::Char('j') | KeyCode::Down => apply(state, AppAction::NavigateDown),
            KeyCode::Char('k') | KeyCode::Up => apply(state, AppAction::NavigateUp),
            KeyCode::Tab => apply(state, AppAction::NavigateTabForward),
            KeyCode::BackTab => apply(state, AppAction::NavigateTabBackward),

            KeyCode::Enter => match screen {
                Screen::Tester => apply(state, AppAction::ActivateSelection),
                Screen::Explorer => explorer::handle_table_select(state, client),
                Screen::Jobs => {}
            },

            // Test harness
            KeyCode::Char(' ') if screen == Screen::Tester => {
                execution::handle_execute(state, base_url);
            }
            KeyCode::Char('e') if screen == Screen::Tester => {
                apply(state, AppAction::EnterBodyEditMode);
            }
            KeyCode::Char('/') if screen == Screen::Tester => {
                apply(state, AppAction::EnterSearchMode);
            }
            KeyCode::Char('L') if screen == Screen::Tester => {
                execution::handle_quick_login(state, base_url, Role::Admin);
            }
            KeyCode::Char('U') if screen == Screen::Tester => {
                execution::handle_quick_login(state, base_url, Role::User);
            }
            KeyCode::Char('C') if screen == Screen::Tester => {
                apply(state, AppAction::ClearHistory);
            }
            KeyCode::Char('y') if screen == Screen::Tester => {
                let on_response_tab = {
                    let s = state.read().unwrap();
                    s.tester.panel_focus == PanelFocus::Detail
                        && s.tester.detail_tab == DetailTab::Response
                };
                if on_response_tab {
                    yank::handle_yank_response_line(state);
                }
            }

            // Table browser paging
            KeyCode::Char('h') | KeyCode::Left if screen == Screen::Explorer => {
                explorer::handle_page_prev(state, client);
            }
            KeyCode::Char('l') | KeyCode::Right if screen == Screen::Explorer => {
                explorer::handle_page_next(state, client);
            }

            // Refresh whichever screen has something to refetch
            KeyCode::Char('r') => match screen {
                Screen::Explorer => explorer::handle_refresh(state, client),
                Screen::Jobs => jobs::handle_refresh(state, client),
                Screen::Tester => {}
            },

            KeyCode::Char('d') if screen == Screen::Jobs => {
                jobs::handle_delete_request(state);
            }

            // Modals available everywhere
            KeyCode::Char('a') => {
                apply(state, AppAction::EnterTokenInputMode(Role::Admin));
            }
            KeyCode::Char(',') => {
                apply(
                    state,
                    AppAction::EnterUrlInputMode {
                        base_url: base_url.to_string(),
                    },
                );
            }

            KeyCode::Esc => apply(state, AppAction::DismissError),

            _ => {}
        }
    }
}
