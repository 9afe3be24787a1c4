//! Modal dialog handlers: base URL entry, token entry, the body editor
//! and the job delete confirmation.

use super::helpers::{apply, collect_paste_batch, log_debug};
use crate::actions::AppAction;
use crate::client::ApiClient;
use crate::config;
use crate::jobs::delete_job_background;
use crate::state::AppState;
use crate::types::InputMode;
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::{Arc, RwLock};

/// Handle base URL input modal (with paste batching support)
pub fn handle_url_input(key: KeyEvent, state: Arc<RwLock<AppState>>) -> Result<Option<String>> {
    match key.code {
        KeyCode::Enter => {
            let mut s = state.write().unwrap();
            let url = s.url_input.trim().to_string();

            match config::validate_url(&url) {
                Ok(_) => {
                    s.input_mode = InputMode::Normal;
                    s.url_input.clear();
                    log_debug(&format!("Base URL submitted: {}", url));
                    return Ok(Some(url));
                }
                Err(e) => {
                    // Keep the modal open so the input can be fixed
                    log_debug(&format!("Invalid base URL: {}", e));
                }
            }
        }
        KeyCode::Esc => {
            apply(state, AppAction::ExitUrlInputMode);
            log_debug("URL input cancelled");
        }
        KeyCode::Backspace => {
            apply(state, AppAction::BackspaceUrlInput);
        }
        KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let mut s = state.write().unwrap();
            delete_word_back(&mut s.url_input);
        }
        KeyCode::Char('l') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            apply(state, AppAction::ClearUrlInput);
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            let (batch, count) = collect_paste_batch(c);
            apply(state, AppAction::AppendToUrlInput(batch));
            if count > 1 {
                log_debug(&format!("Batched {} characters (paste detected)", count));
            }
        }
        _ => {}
    }

    Ok(None)
}

/// Handle token input modal (with paste batching support)
pub fn handle_token_input(key: KeyEvent, state: Arc<RwLock<AppState>>) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            apply(state, AppAction::SubmitToken);
            log_debug("Token saved");
        }
        KeyCode::Esc => {
            apply(state, AppAction::ExitTokenInputMode);
            log_debug("Token input cancelled");
        }
        KeyCode::Tab => {
            apply(state, AppAction::ToggleTokenRole);
        }
        KeyCode::Backspace => {
            apply(state, AppAction::BackspaceTokenInput);
        }
        KeyCode::Char('l') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            apply(state, AppAction::ClearTokenInput);
        }
        KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let mut s = state.write().unwrap();
            delete_word_back(&mut s.token_input);
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            let (batch, count) = collect_paste_batch(c);
            apply(state, AppAction::AppendToTokenInput(batch));
            if count > 1 {
                log_debug(&format!("Batched {} characters (paste detected)", count));
            }
        }
        _ => {}
    }
    Ok(())
}

/// Handle body editor modal.
///
/// Enter validates and closes; invalid JSON keeps the modal open with the
/// parse error shown. Esc closes without validating. The buffer itself
/// persists either way and is what execution sends.
pub fn handle_body_input(key: KeyEvent, state: Arc<RwLock<AppState>>) -> Result<()> {
    match key.code {
        // Ctrl+N: insert newline (Enter is taken by save-and-close)
        KeyCode::Char('n') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let mut s = state.write().unwrap();
            s.body_error = None;
            s.tester.body_editor.insert_char('\n');
        }

        KeyCode::Enter => {
            let mut s = state.write().unwrap();
            match s.tester.body_editor.validate_json() {
                Ok(_) => {
                    let _ = s.tester.body_editor.format_json();
                    s.input_mode = InputMode::Normal;
                    s.body_error = None;
                    log_debug("Body editor closed");
                }
                Err(e) => {
                    log_debug(&format!("JSON validation failed: {}", e));
                    s.body_error = Some(e);
                }
            }
        }

        KeyCode::Esc => {
            apply(state, AppAction::ExitBodyEditMode);
            log_debug("Body editor cancelled");
        }

        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            let mut s = state.write().unwrap();
            s.body_error = None;

            let char_count = s.tester.body_editor.handle_paste_batch(c);
            if char_count > 1 {
                log_debug(&format!("Batched {} characters (paste detected)", char_count));

                // Pasted JSON gets prettified right away; anything that does
                // not parse stays as pasted and Enter will complain.
                if s.tester.body_editor.format_json().is_ok() {
                    log_debug("Auto-formatted pasted JSON");
                }
            }
        }

        _ => {
            let mut s = state.write().unwrap();
            s.body_error = None;
            s.tester.body_editor.handle_key_event(key);
        }
    }

    Ok(())
}

/// Handle the job delete confirmation dialog.
pub fn handle_delete_confirmation(
    key: KeyEvent,
    state: Arc<RwLock<AppState>>,
    client: &ApiClient,
) -> Result<()> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            let id = {
                let mut s = state.write().unwrap();
                s.input_mode = InputMode::Normal;
                s.jobs.pending_delete.take()
            };

            if let Some(id) = id {
                log_debug(&format!("Deleting job {}", id));
                delete_job_background(state, client.clone(), id);
            }
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            apply(state, AppAction::CancelDeleteJob);
            log_debug("Job delete cancelled");
        }
        _ => {}
    }
    Ok(())
}

/// Drop the last word from an input buffer. Boundaries are the characters
/// URLs and tokens are usually broken on.
fn delete_word_back(input: &mut String) {
    let trimmed_len = input.trim_end_matches([' ', '/', ':', '.']).len();
    input.truncate(trimmed_len);

    if let Some(pos) = input.rfind([' ', '/', ':', '.']) {
        input.truncate(pos + 1);
    } else {
        input.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_word_back_stops_at_boundary() {
        let mut input = "http://localhost:8080".to_string();
        delete_word_back(&mut input);
        assert_eq!(input, "http://localhost:");

        delete_word_back(&mut input);
        assert_eq!(input, "http://");
    }

    #[test]
    fn test_delete_word_back_clears_single_word() {
        let mut input = "token123".to_string();
        delete_word_back(&mut input);
        assert_eq!(input, "");
    }

    #[test]
    fn test_delete_word_back_on_empty_input() {
        let mut input = String::new();
        delete_word_back(&mut input);
        assert_eq!(input, "");
    }
}
