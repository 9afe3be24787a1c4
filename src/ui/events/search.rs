//! Catalog search handlers. Edits refilter on every keystroke; Enter keeps
//! the filter, Esc discards it.

use super::helpers::{apply, apply_many, log_debug};
use crate::actions::AppAction;
use crate::state::AppState;
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::{Arc, RwLock};

pub fn handle_search_input(key: KeyEvent, state: Arc<RwLock<AppState>>) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            apply(state, AppAction::ExitSearchMode);
            log_debug("Exiting search mode (keeping filter)");
        }
        KeyCode::Esc => {
            apply_many(
                state,
                vec![AppAction::ClearSearchQuery, AppAction::ExitSearchMode],
            );
            log_debug("Exiting search mode (cleared filter)");
        }
        KeyCode::Backspace => {
            apply(state, AppAction::BackspaceSearchQuery);
        }
        KeyCode::Char('l') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            apply(state, AppAction::ClearSearchQuery);
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            apply(state, AppAction::AppendToSearchQuery(c.to_string()));
        }
        _ => {}
    }
    Ok(())
}
