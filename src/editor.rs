//! Single-buffer text editor behind the request body modal.
//!
//! Bodies here are JSON, so the editor knows how to prettify and validate
//! its content and normalizes smart quotes on paste. The cursor is a byte
//! offset, kept on UTF-8 boundaries by every mutating operation.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use serde_json::Value;

#[derive(Debug, Clone, Default)]
pub struct BodyEditor {
    content: String,

    /// Byte offset into `content`.
    cursor: usize,
}

impl BodyEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }

    /// Replace the whole buffer, cursor lands at the end.
    pub fn set_content(&mut self, content: String) {
        self.cursor = content.len();
        self.content = content;
    }

    pub fn insert_char(&mut self, c: char) {
        let cursor = self.clamp_cursor_to_boundary(self.cursor);
        self.content.insert(cursor, c);
        self.cursor = cursor + c.len_utf8();
    }

    /// Insert text with curly quotes straightened out, so that JSON pasted
    /// from chat apps and rich-text documents still parses.
    pub fn insert_str_normalized(&mut self, s: &str) {
        let normalized = s
            .replace('\u{201C}', "\"")
            .replace('\u{201D}', "\"")
            .replace('\u{2018}', "'")
            .replace('\u{2019}', "'");

        let cursor = self.clamp_cursor_to_boundary(self.cursor);
        self.content.insert_str(cursor, &normalized);
        self.cursor = cursor + normalized.len();
    }

    pub fn delete_char_before_cursor(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }

        let mut cursor = self.cursor;
        while cursor > 0 && !self.content.is_char_boundary(cursor - 1) {
            cursor -= 1;
        }
        if cursor > 0 {
            cursor -= 1;
        }

        self.content.remove(cursor);
        self.cursor = cursor;
        true
    }

    pub fn delete_char_after_cursor(&mut self) -> bool {
        if self.cursor >= self.content.len() {
            return false;
        }

        let cursor = self.clamp_cursor_to_boundary(self.cursor);
        self.content.remove(cursor);
        true
    }

    pub fn move_cursor_left(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }

        let mut new_cursor = self.cursor - 1;
        while new_cursor > 0 && !self.content.is_char_boundary(new_cursor) {
            new_cursor -= 1;
        }

        self.cursor = new_cursor;
        true
    }

    pub fn move_cursor_right(&mut self) -> bool {
        if self.cursor >= self.content.len() {
            return false;
        }

        let mut new_cursor = self.cursor + 1;
        while new_cursor < self.content.len() && !self.content.is_char_boundary(new_cursor) {
            new_cursor += 1;
        }

        self.cursor = new_cursor.min(self.content.len());
        true
    }

    pub fn move_cursor_to_start(&mut self) {
        self.cursor = 0;
    }

    pub fn move_cursor_to_end(&mut self) {
        self.cursor = self.content.len();
    }

    /// Prettify the buffer in place. On a parse error the buffer is left
    /// untouched and the error text is returned for the modal to display.
    pub fn format_json(&mut self) -> Result<(), String> {
        match serde_json::from_str::<Value>(&self.content) {
            Ok(json) => {
                self.content =
                    serde_json::to_string_pretty(&json).unwrap_or_else(|_| self.content.clone());
                self.cursor = self.content.len();
                Ok(())
            }
            Err(e) => Err(format!("Invalid JSON: {e}")),
        }
    }

    pub fn validate_json(&self) -> Result<(), String> {
        serde_json::from_str::<Value>(&self.content)
            .map(|_| ())
            .map_err(|e| format!("Invalid JSON: {e}"))
    }

    /// Handle the editing keys every text field shares. Returns true when
    /// the event was consumed; callers layer their own bindings on top.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Backspace => self.delete_char_before_cursor(),
            KeyCode::Delete => self.delete_char_after_cursor(),
            KeyCode::Left => self.move_cursor_left(),
            KeyCode::Right => self.move_cursor_right(),
            KeyCode::Home => {
                self.move_cursor_to_start();
                true
            }
            KeyCode::End => {
                self.move_cursor_to_end();
                true
            }
            KeyCode::Char('a') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.move_cursor_to_start();
                true
            }
            KeyCode::Char('e') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.move_cursor_to_end();
                true
            }
            KeyCode::Char('l') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.clear();
                true
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.insert_char(c);
                true
            }
            _ => false,
        }
    }

    /// Terminal paste arrives as a burst of character events. Starting from
    /// the character that already came in, drain whatever is immediately
    /// available and insert the whole run at once. Returns how many
    /// characters landed in the buffer.
    pub fn handle_paste_batch(&mut self, initial_char: char) -> usize {
        let mut chars = vec![initial_char];

        loop {
            match crossterm::event::poll(std::time::Duration::from_millis(0)) {
                Ok(true) => {
                    if let Ok(Event::Key(next_key)) = crossterm::event::read() {
                        match next_key.code {
                            KeyCode::Char(next_c)
                                if !next_key.modifiers.contains(KeyModifiers::CONTROL) =>
                            {
                                chars.push(next_c);
                            }
                            _ => break,
                        }
                    } else {
                        break;
                    }
                }
                _ => break,
            }
        }

        let count = chars.len();
        let batch_str: String = chars.into_iter().collect();

        self.insert_str_normalized(&batch_str);
        count
    }

    fn clamp_cursor_to_boundary(&self, cursor: usize) -> usize {
        let mut pos = cursor.min(self.content.len());
        while pos > 0 && !self.content.is_char_boundary(pos) {
            pos -= 1;
        }
        pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor_with(content: &str) -> BodyEditor {
        let mut editor = BodyEditor::new();
        editor.set_content(content.to_string());
        editor
    }

    #[test]
    fn test_new_editor_is_empty() {
        let editor = BodyEditor::new();
        assert_eq!(editor.content(), "");
        assert_eq!(editor.cursor(), 0);
    }

    #[test]
    fn test_set_content_moves_cursor_to_end() {
        let editor = editor_with("hello");
        assert_eq!(editor.content(), "hello");
        assert_eq!(editor.cursor(), 5);
    }

    #[test]
    fn test_insert_char() {
        let mut editor = BodyEditor::new();
        editor.insert_char('a');
        assert_eq!(editor.content(), "a");
        assert_eq!(editor.cursor(), 1);
    }

    #[test]
    fn test_delete_char_before_cursor() {
        let mut editor = editor_with("hello");
        assert!(editor.delete_char_before_cursor());
        assert_eq!(editor.content(), "hell");
        assert_eq!(editor.cursor(), 4);
    }

    #[test]
    fn test_delete_at_start_is_a_no_op() {
        let mut editor = editor_with("hello");
        editor.move_cursor_to_start();
        assert!(!editor.delete_char_before_cursor());
        assert_eq!(editor.content(), "hello");
    }

    #[test]
    fn test_move_cursor_left_right() {
        let mut editor = editor_with("hello");
        assert!(editor.move_cursor_left());
        assert_eq!(editor.cursor(), 4);
        assert!(editor.move_cursor_right());
        assert_eq!(editor.cursor(), 5);
        assert!(!editor.move_cursor_right());
    }

    #[test]
    fn test_insert_in_the_middle() {
        let mut editor = editor_with("ac");
        editor.move_cursor_left();
        editor.insert_char('b');
        assert_eq!(editor.content(), "abc");
        assert_eq!(editor.cursor(), 2);
    }

    #[test]
    fn test_clear() {
        let mut editor = editor_with("hello");
        editor.clear();
        assert_eq!(editor.content(), "");
        assert_eq!(editor.cursor(), 0);
    }

    #[test]
    fn test_format_json_valid() {
        let mut editor = editor_with(r#"{"name":"test","age":30}"#);
        assert!(editor.format_json().is_ok());
        assert!(editor.content().contains("  "));
        assert!(editor.content().contains("\"name\""));
    }

    #[test]
    fn test_format_json_invalid_leaves_buffer_alone() {
        let mut editor = editor_with("{invalid json");
        assert!(editor.format_json().is_err());
        assert_eq!(editor.content(), "{invalid json");
    }

    #[test]
    fn test_validate_json() {
        let mut editor = editor_with(r#"{"valid": true}"#);
        assert!(editor.validate_json().is_ok());

        editor.set_content("{invalid}".to_string());
        assert!(editor.validate_json().is_err());
    }

    #[test]
    fn test_utf8_handling() {
        let mut editor = BodyEditor::new();
        editor.insert_char('😀');
        assert_eq!(editor.content(), "😀");
        assert_eq!(editor.cursor(), 4);
        assert!(editor.delete_char_before_cursor());
        assert_eq!(editor.content(), "");
    }

    #[test]
    fn test_smart_quote_normalization() {
        let mut editor = BodyEditor::new();

        // \u{201C} and \u{201D} are the curly double quotes
        let smart_quoted = "{\u{201C}username\u{201D}:\u{201C}test\u{201D}}";
        editor.insert_str_normalized(smart_quoted);
        assert_eq!(editor.content(), r#"{"username":"test"}"#);

        assert!(editor.format_json().is_ok());
    }

    #[test]
    fn test_regular_quotes_unchanged() {
        let mut editor = BodyEditor::new();
        editor.insert_str_normalized(r#"{"username":"test"}"#);
        assert_eq!(editor.content(), r#"{"username":"test"}"#);
        assert!(editor.format_json().is_ok());
    }

    #[test]
    fn test_single_quote_normalization() {
        let mut editor = BodyEditor::new();

        let smart_single = "{\u{2018}key\u{2019}:\u{2018}value\u{2019}}";
        editor.insert_str_normalized(smart_single);
        assert_eq!(editor.content(), "{'key':'value'}");
    }
}
