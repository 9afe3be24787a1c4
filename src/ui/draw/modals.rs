//! Modal dialog rendering
//!
//! This module contains rendering functions for modal dialogs:
//! - Token input modal (with the role slot toggle)
//! - Base URL configuration modal
//! - Request body editor modal
//! - Job delete confirmation modal

use crate::editor::BodyEditor;
use crate::state::AppState;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

/// Render the token input modal for bearer authentication
pub fn render_token_input_modal(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    let modal_width = (area.width as f32 * 0.6).min(80.0) as u16;
    let modal_height = 7;
    let modal_x = (area.width.saturating_sub(modal_width)) / 2;
    let modal_y = (area.height.saturating_sub(modal_height)) / 2;

    let modal_area = Rect {
        x: modal_x,
        y: modal_y,
        width: modal_width,
        height: modal_height,
    };

    // Clear the background behind the modal
    frame.render_widget(Clear, modal_area);

    let block = Block::default()
        .title(" Enter Bearer Token ")
        .borders(Borders::ALL)
        .border_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .style(Style::default().bg(Color::Rgb(30, 30, 30)).fg(Color::White));

    let inner = block.inner(modal_area);
    frame.render_widget(block, modal_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    // Which slot the token lands in
    let role_line = Line::from(vec![
        Span::styled("Role: ", Style::default().fg(Color::LightCyan)),
        Span::styled(
            state.token_input_role.label(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "  (empty input clears the slot)",
            Style::default().fg(Color::Rgb(150, 150, 150)),
        ),
    ]);
    frame.render_widget(Paragraph::new(role_line), chunks[0]);

    let label = Paragraph::new("Token:").style(Style::default().fg(Color::LightCyan));
    frame.render_widget(label, chunks[1]);

    // Input field - show full token while editing
    let input = Paragraph::new(state.token_input.clone()).style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );
    frame.render_widget(input, chunks[2]);

    // Help text
    let help = Paragraph::new("Enter: Save  |  Tab: Switch role  |  Ctrl+L: Clear  |  Esc: Cancel")
        .style(Style::default().fg(Color::Rgb(150, 150, 150)))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[4]);
}

/// Render the base URL configuration modal
pub fn render_url_input_modal(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    let modal_width = (area.width as f32 * 0.7).min(90.0) as u16;
    let modal_height = 8;
    let modal_x = (area.width.saturating_sub(modal_width)) / 2;
    let modal_y = (area.height.saturating_sub(modal_height)) / 2;

    let modal_area = Rect {
        x: modal_x,
        y: modal_y,
        width: modal_width,
        height: modal_height,
    };

    frame.render_widget(Clear, modal_area);

    let block = Block::default()
        .title(" Configure Base URL ")
        .borders(Borders::ALL)
        .border_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .style(Style::default().bg(Color::Rgb(30, 30, 30)).fg(Color::White));

    let inner = block.inner(modal_area);
    frame.render_widget(block, modal_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Description
            Constraint::Length(1), // Label
            Constraint::Length(1), // Input
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Help
        ])
        .split(inner);

    let desc = Paragraph::new("Every request goes to this server")
        .style(Style::default().fg(Color::Gray));
    frame.render_widget(desc, chunks[0]);

    let label = Paragraph::new("► API Base URL:").style(Style::default().fg(Color::Yellow));
    frame.render_widget(label, chunks[1]);

    let input = Paragraph::new(state.url_input.clone()).style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );
    frame.render_widget(input, chunks[2]);

    let help = Paragraph::new("Enter: Confirm  |  Ctrl+W: Delete word  |  Ctrl+L: Clear  |  Esc: Cancel")
        .style(Style::default().fg(Color::Rgb(150, 150, 150)))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[4]);
}

/// Render the JSON body editor modal for POST/PUT/PATCH requests
pub fn render_body_input_modal(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    // Larger modal for multi-line JSON editing
    let modal_width = (area.width as f32 * 0.8).min(100.0) as u16;
    let modal_height = (area.height as f32 * 0.7).min(30.0) as u16;
    let modal_x = (area.width.saturating_sub(modal_width)) / 2;
    let modal_y = (area.height.saturating_sub(modal_height)) / 2;

    let modal_area = Rect {
        x: modal_x,
        y: modal_y,
        width: modal_width,
        height: modal_height,
    };

    frame.render_widget(Clear, modal_area);

    let block = Block::default()
        .title(" Edit Request Body (JSON) ")
        .borders(Borders::ALL)
        .border_style(
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
        .style(Style::default().bg(Color::Rgb(30, 30, 30)).fg(Color::White));

    let inner = block.inner(modal_area);
    frame.render_widget(block, modal_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Label
            Constraint::Min(5),    // Body content (grows)
            Constraint::Length(1), // Validation error
            Constraint::Length(1), // Help
        ])
        .split(inner);

    let label = Paragraph::new("JSON Body:").style(Style::default().fg(Color::LightGreen));
    frame.render_widget(label, chunks[0]);

    // One row per line so the cursor cell lands where the edit happens;
    // no wrapping here
    let body = Paragraph::new(editor_lines(&state.tester.body_editor));
    frame.render_widget(body, chunks[1]);

    if let Some(error) = &state.body_error {
        let message =
            Paragraph::new(format!("❌ {error}")).style(Style::default().fg(Color::Red));
        frame.render_widget(message, chunks[2]);
    }

    let help = Paragraph::new("Enter: Format & Save  |  Ctrl+N: New line  |  Esc: Close")
        .style(Style::default().fg(Color::Rgb(150, 150, 150)))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[3]);
}

/// Render the job delete confirmation modal
pub fn render_delete_confirmation_modal(frame: &mut Frame, state: &AppState) {
    let Some(id) = state.jobs.pending_delete else {
        return;
    };

    let area = frame.area();

    let modal_width = (area.width as f32 * 0.5).min(60.0) as u16;
    let modal_height = 7;
    let modal_x = (area.width.saturating_sub(modal_width)) / 2;
    let modal_y = (area.height.saturating_sub(modal_height)) / 2;

    let modal_area = Rect {
        x: modal_x,
        y: modal_y,
        width: modal_width,
        height: modal_height,
    };

    frame.render_widget(Clear, modal_area);

    let block = Block::default()
        .title(" Delete Job? ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
        .style(Style::default().bg(Color::Rgb(30, 30, 30)).fg(Color::White));

    let inner = block.inner(modal_area);
    frame.render_widget(block, modal_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    let message = Paragraph::new(format!(
        "This will permanently delete job #{id}.\nThe record cannot be recovered."
    ))
    .style(Style::default().fg(Color::White))
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });
    frame.render_widget(message, chunks[0]);

    let actions = Paragraph::new("[Y] Yes, delete it  |  [N] Cancel")
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center);
    frame.render_widget(actions, chunks[2]);
}

/// Split editor content into lines with an inverted cell at the cursor.
/// The cursor sits on the character after it, or on a padding space at the
/// end of the line.
fn editor_lines(editor: &BodyEditor) -> Vec<Line<'static>> {
    let content = editor.content();
    let (before, after) = content.split_at(editor.cursor());

    let text_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let cursor_style = Style::default().bg(Color::White).fg(Color::Black);

    let mut lines: Vec<Line<'static>> = Vec::new();

    let mut before_lines: Vec<&str> = before.split('\n').collect();
    let cursor_prefix = before_lines.pop().unwrap_or("");
    for line in before_lines {
        lines.push(Line::from(Span::styled(line.to_string(), text_style)));
    }

    let mut after_parts = after.splitn(2, '\n');
    let after_first = after_parts.next().unwrap_or("");
    let after_rest = after_parts.next();

    let (cursor_cell, tail) = match after_first.chars().next() {
        Some(c) => (c.to_string(), after_first[c.len_utf8()..].to_string()),
        None => (" ".to_string(), String::new()),
    };

    lines.push(Line::from(vec![
        Span::styled(cursor_prefix.to_string(), text_style),
        Span::styled(cursor_cell, cursor_style),
        Span::styled(tail, text_style),
    ]));

    if let Some(rest) = after_rest {
        for line in rest.split('\n') {
            lines.push(Line::from(Span::styled(line.to_string(), text_style)));
        }
    }

    lines
}
