//! UI drawing module
//!
//! This module is organized into focused submodules:
//! - `components`: Reusable UI components (header, footer, search bar, spinners)
//! - `modals`: Modal dialogs (token, base URL, body editor, delete confirmation)
//! - `tester`, `explorer`, `jobs`: One module per screen
//! - `styling`: Color schemes and style constants
//!
//! `draw` lays out the frame and dispatches to the active screen. The caller
//! owns the `ScreenLists` so list scroll offsets survive between frames.

mod components;
mod explorer;
mod jobs;
mod modals;
mod styling;
mod tester;

pub use components::SPINNER_FRAMES;

use crate::state::AppState;
use crate::types::{InputMode, Screen};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    widgets::ListState,
};

/// Widget state for every selectable list in the UI.
#[derive(Debug, Default)]
pub struct ScreenLists {
    pub catalog: ListState,
    pub history: ListState,
    pub tables: ListState,
    pub rows: ListState,
    pub jobs: ListState,
}

impl ScreenLists {
    /// Mirror the cursor fields out of app state so the lists highlight the
    /// same rows the key handlers move.
    fn sync(&mut self, state: &AppState) {
        self.catalog.select(clamped(
            state.tester.selected_item,
            state.tester.render_items.len(),
        ));
        self.history.select(clamped(
            state.tester.history_selected,
            state.tester.history.len(),
        ));
        self.tables.select(clamped(
            state.explorer.selected_table_index,
            state.explorer.tables.len(),
        ));
        self.rows.select(clamped(
            state.explorer.selected_row,
            state.explorer.rows.len(),
        ));
        self.jobs
            .select(clamped(state.jobs.selected, state.jobs.jobs.len()));
    }
}

fn clamped(index: usize, len: usize) -> Option<usize> {
    if len == 0 {
        None
    } else {
        Some(index.min(len - 1))
    }
}

/// Top-level draw: chrome, the active screen, then any open modal on top
pub fn draw(
    frame: &mut Frame,
    state: &AppState,
    base_url: &str,
    spinner_index: usize,
    lists: &mut ScreenLists,
) {
    lists.sync(state);

    match state.screen {
        Screen::Tester => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(3), // Header
                    Constraint::Length(3), // Search bar
                    Constraint::Min(0),    // Main content
                    Constraint::Length(3), // Footer
                ])
                .split(frame.area());

            components::render_header(frame, chunks[0], state, base_url);
            components::render_search_bar(frame, chunks[1], state);
            tester::render(
                frame,
                chunks[2],
                state,
                spinner_index,
                &mut lists.catalog,
                &mut lists.history,
            );
            components::render_footer(frame, chunks[3], state);
        }
        Screen::Explorer => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(3),
                    Constraint::Min(0),
                    Constraint::Length(3),
                ])
                .split(frame.area());

            components::render_header(frame, chunks[0], state, base_url);
            explorer::render(
                frame,
                chunks[1],
                state,
                spinner_index,
                &mut lists.tables,
                &mut lists.rows,
            );
            components::render_footer(frame, chunks[2], state);
        }
        Screen::Jobs => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(3),
                    Constraint::Min(0),
                    Constraint::Length(3),
                ])
                .split(frame.area());

            components::render_header(frame, chunks[0], state, base_url);
            jobs::render(frame, chunks[1], state, spinner_index, &mut lists.jobs);
            components::render_footer(frame, chunks[2], state);
        }
    }

    match state.input_mode {
        InputMode::EnteringToken => modals::render_token_input_modal(frame, state),
        InputMode::EnteringUrl => modals::render_url_input_modal(frame, state),
        InputMode::EnteringBody => modals::render_body_input_modal(frame, state),
        InputMode::ConfirmDeleteJob => modals::render_delete_confirmation_modal(frame, state),
        InputMode::Normal | InputMode::Searching => {}
    }
}
