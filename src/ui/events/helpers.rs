//! Small utilities shared by the event handlers: state locking, paste
//! batching and debug logging.

use crate::actions::{apply_action, AppAction};
use crate::state::AppState;
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use std::fs::OpenOptions;
use std::io::Write;
use std::sync::{Arc, RwLock};

/// Apply a single action to state
pub fn apply(state: Arc<RwLock<AppState>>, action: AppAction) {
    let mut s = state.write().unwrap();
    apply_action(action, &mut s);
}

/// Apply multiple actions under one lock
pub fn apply_many(state: Arc<RwLock<AppState>>, actions: Vec<AppAction>) {
    let mut s = state.write().unwrap();
    for action in actions {
        apply_action(action, &mut s);
    }
}

/// Collect a batch of characters for paste support.
///
/// When a character arrives, drain any immediately available character
/// events and hand them back as one string. Terminals deliver paste as a
/// rapid burst, so this turns a paste into a single insertion.
pub fn collect_paste_batch(initial_char: char) -> (String, usize) {
    let mut chars = vec![initial_char];

    while let Ok(true) = event::poll(std::time::Duration::from_millis(0)) {
        if let Ok(Event::Key(next_key)) = event::read() {
            match next_key.code {
                KeyCode::Char(next_c) if !next_key.modifiers.contains(KeyModifiers::CONTROL) => {
                    chars.push(next_c);
                }
                _ => break,
            }
        } else {
            break;
        }
    }

    let count = chars.len();
    let batch_str: String = chars.into_iter().collect();
    (batch_str, count)
}

/// Log debug message to /tmp/lazy-admin-tui.log
pub fn log_debug(msg: &str) {
    let _ = OpenOptions::new()
        .create(true)
        .append(true)
        .open("/tmp/lazy-admin-tui.log")
        .and_then(|mut f| writeln!(f, "{msg}"));
}
