//! Reusable UI components
//!
//! This module contains shared UI components used throughout the application:
//! - Header (title, screen tabs, auth slots)
//! - Footer (command help)
//! - Search bar
//! - Loading spinners
//! - Error/empty state messages

use crate::auth::{mask_token, Role, TokenCache};
use crate::state::AppState;
use crate::types::{InputMode, Screen};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

pub const SPINNER_FRAMES: [&str; 4] = ["⠋", "⠙", "⠹", "⠸"];

/// Render the application header with screen tabs and auth info
pub fn render_header(frame: &mut Frame, area: Rect, state: &AppState, base_url: &str) {
    let mut spans = vec![
        Span::styled(
            "lazy admin tui",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
    ];

    for (key, screen) in [
        ("1", Screen::Tester),
        ("2", Screen::Explorer),
        ("3", Screen::Jobs),
    ] {
        let style = if state.screen == screen {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!("[{}] {}", key, screen.title()), style));
        spans.push(Span::raw("  "));
    }

    spans.push(Span::styled(
        base_url.to_string(),
        Style::default().fg(Color::Gray),
    ));
    spans.push(Span::styled(" | ", Style::default().fg(Color::DarkGray)));
    spans.push(auth_slot_span(&state.tokens, Role::Admin));
    spans.push(Span::raw("  "));
    spans.push(auth_slot_span(&state.tokens, Role::User));

    let header = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

/// Render the search bar with active filter indication
pub fn render_search_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    let is_active = matches!(state.input_mode, InputMode::Searching);
    let query = &state.tester.search_query;

    let border_style = if is_active {
        Style::default().fg(Color::Cyan)
    } else if !query.is_empty() {
        Style::default().fg(Color::Green) // Show filter is active
    } else {
        Style::default().fg(Color::DarkGray)
    };

    // Show match count if filtering
    let title = if !query.is_empty() {
        let count = state.tester.filtered.len();
        let total = state.tester.catalog.len();
        format!(" Search [{count}/{total}] ")
    } else {
        " Search (/) ".to_string()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title);

    let search_text = if is_active {
        format!("{query}_") // Show cursor
    } else {
        query.clone()
    };

    let paragraph = Paragraph::new(search_text).block(block);

    frame.render_widget(paragraph, area);
}

/// Render the footer with command help for the active screen
pub fn render_footer(frame: &mut Frame, area: Rect, state: &AppState) {
    let footer_text = match state.screen {
        Screen::Tester => {
            if matches!(state.input_mode, InputMode::Searching) {
                "Type to filter | Enter:Keep filter  Esc:Clear  Ctrl+L:Clear"
            } else {
                "Tab:Tabs j/k/↑/↓:Nav Enter:Select Space:Execute e:Body /:Search L/U:Login y:Yank C:Clear | a:Token ,:URL q:Quit"
            }
        }
        Screen::Explorer => {
            "Tab:Panel j/k/↑/↓:Nav Enter:Open h/l/←/→:Page r:Refresh | a:Token ,:URL q:Quit"
        }
        Screen::Jobs => "j/k/↑/↓:Nav d:Delete r:Refresh | a:Token ,:URL q:Quit",
    };

    let footer = Paragraph::new(footer_text)
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL).title("Commands"));

    frame.render_widget(footer, area);
}

/// Render loading spinner animation
pub fn render_loading_spinner(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    message: &str,
    spinner_index: usize,
) {
    let loading_text = format!(
        "{} {}\n\nPlease wait...",
        SPINNER_FRAMES[spinner_index % SPINNER_FRAMES.len()],
        message
    );

    let loading = Paragraph::new(loading_text)
        .style(Style::default().fg(Color::Yellow))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title.to_string()),
        );

    frame.render_widget(loading, area);
}

/// Render error message with recovery instructions
pub fn render_error_message(frame: &mut Frame, area: Rect, title: &str, error: &str, hint: &str) {
    let error_widget = Paragraph::new(format!("❌ {error}\n\n{hint}"))
        .style(Style::default().fg(Color::Red))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title.to_string()),
        );

    frame.render_widget(error_widget, area);
}

/// Render empty state message
pub fn render_empty_message(frame: &mut Frame, area: Rect, title: &str, message: &str) {
    let empty = Paragraph::new(message.to_string()).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title.to_string()),
    );

    frame.render_widget(empty, area);
}

/// Render no search results message
pub fn render_no_search_results(frame: &mut Frame, area: Rect) {
    let empty = Paragraph::new("No matching endpoints\n\nPress [Esc] or [Ctrl+L] to clear search")
        .style(Style::default().fg(Color::Yellow))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("[1] Search Results"),
        );

    frame.render_widget(empty, area);
}

/// One token slot for the header: padlock, role and a masked token
fn auth_slot_span(tokens: &TokenCache, role: Role) -> Span<'static> {
    match tokens.get(role) {
        Some(token) => Span::styled(
            format!("🔒 {}: {}", role.label(), mask_token(token)),
            Style::default().fg(Color::Green),
        ),
        None => Span::styled(
            format!("🔓 {}: none", role.label()),
            Style::default().fg(Color::DarkGray),
        ),
    }
}
