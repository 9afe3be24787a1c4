//! Yank (copy) handlers. Copies the selected line of the response view to
//! the system clipboard, unwrapping JSON values on the way.

use super::helpers::{apply, log_debug};
use crate::actions::AppAction;
use crate::state::AppState;
use crate::utils::try_format_json;
use arboard::Clipboard;
use std::sync::{Arc, RwLock};
use std::time::Duration;

/// Yank the currently selected line from the Response tab to the clipboard.
pub fn handle_yank_response_line(state: Arc<RwLock<AppState>>) {
    let line_content = {
        let s = state.read().unwrap();

        let record = match s.tester.viewed_record() {
            Some(record) if record.status.is_some() => record,
            _ => {
                log_debug("No response available to yank");
                return;
            }
        };

        // The view renders [status line, blank line, body...]; only body
        // lines are yankable.
        let selected = s.tester.response_selected_line;
        if selected < 2 {
            log_debug("Cannot yank header lines");
            return;
        }

        let formatted = try_format_json(&record.body);
        match formatted.lines().nth(selected - 2) {
            Some(line) => line.to_string(),
            None => {
                log_debug("Selected line out of bounds");
                return;
            }
        }
    };

    let value_to_copy = extract_json_value(&line_content);

    match Clipboard::new() {
        Ok(mut clipboard) => match clipboard.set_text(value_to_copy.clone()) {
            Ok(_) => {
                log_debug(&format!("Yanked: {}", value_to_copy));
                apply(state.clone(), AppAction::SetYankFlash(true));

                // Clear the highlight after a short flash
                tokio::spawn(async move {
                    tokio::time::sleep(Duration::from_millis(200)).await;
                    let mut s = state.write().unwrap();
                    s.tester.yank_flash = false;
                });
            }
            Err(e) => {
                log_debug(&format!("Failed to copy to clipboard: {}", e));
            }
        },
        Err(e) => {
            log_debug(&format!("Failed to access clipboard: {}", e));
        }
    }
}

/// Extract the value portion from a JSON line:
///   `"token": "abc123",` -> `abc123`
///   `"count": 30,`       -> `30`
///   `123`                -> `123`
fn extract_json_value(line: &str) -> String {
    let trimmed = line.trim();

    if let Some(colon_pos) = trimmed.find(':') {
        let value_part = &trimmed[colon_pos + 1..];

        value_part
            .trim()
            .trim_end_matches(',')
            .trim()
            .trim_matches('"')
            .to_string()
    } else {
        trimmed
            .trim_matches(|c| c == '{' || c == '}' || c == '[' || c == ']' || c == ',')
            .trim()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_json_value_strings() {
        assert_eq!(extract_json_value("  \"token\": \"abc123\","), "abc123");
        assert_eq!(extract_json_value("  \"name\": \"users\""), "users");
    }

    #[test]
    fn test_extract_json_value_numbers_and_bools() {
        assert_eq!(extract_json_value("  \"rows\": 245,"), "245");
        assert_eq!(extract_json_value("  \"active\": true,"), "true");
        assert_eq!(extract_json_value("  \"archived\": false"), "false");
    }

    #[test]
    fn test_extract_json_value_bare_lines() {
        assert_eq!(extract_json_value("  123"), "123");
        assert_eq!(extract_json_value("  {"), "");
        assert_eq!(extract_json_value("  ],"), "");
    }
}
