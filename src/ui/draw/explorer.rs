//! Data explorer screen
//!
//! This module contains rendering functions for the two explorer panels:
//! - Tables panel (left side) - the browsable table catalog
//! - Grid panel (right side) - one page of rows with column headers and the
//!   pagination strip

use super::components::{render_empty_message, render_loading_spinner, SPINNER_FRAMES};
use super::styling;
use crate::explorer::{cell_text, column_widths, fit_cell, page_window};
use crate::state::{AppState, ExplorerState};
use crate::types::{LoadingState, PanelFocus};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

pub fn render(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    spinner_index: usize,
    tables_list_state: &mut ListState,
    rows_list_state: &mut ListState,
) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(area);

    render_tables_panel(frame, chunks[0], state, spinner_index, tables_list_state);
    render_grid_panel(frame, chunks[1], state, spinner_index, rows_list_state);
}

/// Render the left panel with the table catalog
fn render_tables_panel(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    spinner_index: usize,
    list_state: &mut ListState,
) {
    let explorer = &state.explorer;

    if explorer.tables_loading.is_fetching() {
        render_loading_spinner(frame, area, "[1] Tables", "Loading tables", spinner_index);
        return;
    }

    if explorer.tables.is_empty() {
        render_empty_message(
            frame,
            area,
            "[1] Tables",
            "No tables loaded\n\nPress [r] to refresh",
        );
        return;
    }

    let items: Vec<ListItem> = explorer
        .tables
        .iter()
        .map(|table| {
            let line = Line::from(vec![
                Span::raw(format!("{:<14}", table.name)),
                Span::styled(
                    format!("{:>7} rows ", table.row_count),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    format!("{:>5.1} MB", table.size_mb),
                    Style::default().fg(Color::DarkGray),
                ),
            ]);
            ListItem::new(line)
        })
        .collect();

    let border_color = if explorer.panel_focus == PanelFocus::List {
        styling::focused_border()
    } else {
        styling::unfocused_border()
    };

    let list = List::new(items)
        .block(
            Block::default()
                .title(format!("[1] Tables ({})", explorer.tables.len()))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_color)),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(">> ");

    frame.render_stateful_widget(list, area, list_state);
}

/// Render the right panel with the current page of rows
fn render_grid_panel(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    spinner_index: usize,
    list_state: &mut ListState,
) {
    let explorer = &state.explorer;

    let border_color = if explorer.panel_focus == PanelFocus::Detail {
        styling::focused_border()
    } else {
        styling::unfocused_border()
    };

    let title = match &explorer.selected_table {
        Some(name) => format!("[2] {name}"),
        None => "[2] Data".to_string(),
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    if explorer.page_loading.is_fetching() {
        let loading = Paragraph::new(format!(
            "{} Loading rows...",
            SPINNER_FRAMES[spinner_index % SPINNER_FRAMES.len()]
        ))
        .style(Style::default().fg(Color::Yellow));
        frame.render_widget(loading, inner_area);
        return;
    }

    if let LoadingState::Error(error) = &explorer.page_loading {
        let message = Paragraph::new(format!(
            "❌ {error}\n\nPress [r] to retry or [Esc] to dismiss"
        ))
        .style(Style::default().fg(Color::Red))
        .wrap(Wrap { trim: false });
        frame.render_widget(message, inner_area);
        return;
    }

    if explorer.selected_table.is_none() {
        let mut text = String::from("Select a table and press [Enter] to browse it");
        if let Some(table) = explorer.tables.get(explorer.selected_table_index) {
            if !table.description.is_empty() {
                text.push_str(&format!("\n\n{}: {}", table.name, table.description));
            }
        }
        let hint = Paragraph::new(text)
            .style(Style::default().fg(Color::DarkGray))
            .wrap(Wrap { trim: false });
        frame.render_widget(hint, inner_area);
        return;
    }

    if explorer.rows.is_empty() {
        let empty = Paragraph::new("No rows").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, inner_area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Column headers
            Constraint::Min(0),    // Rows
            Constraint::Length(1), // Pagination strip
        ])
        .split(inner_area);

    let widths = column_widths(&explorer.columns, &explorer.rows);

    // Offset the header by the ">> " highlight symbol so it lines up with
    // the row cells
    let mut header_spans = vec![Span::raw("   ")];
    for (column, width) in explorer.columns.iter().zip(&widths) {
        header_spans.push(Span::styled(
            format!("{}  ", fit_cell(&column.name, *width)),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(header_spans)), chunks[0]);

    let items: Vec<ListItem> = explorer
        .rows
        .iter()
        .map(|row| {
            let mut spans = Vec::new();
            for (column, width) in explorer.columns.iter().zip(&widths) {
                match cell_text(row, &column.name) {
                    Some(text) => {
                        spans.push(Span::raw(format!("{}  ", fit_cell(&text, *width))));
                    }
                    None => {
                        spans.push(Span::styled(
                            format!("{}  ", fit_cell("NULL", *width)),
                            Style::default()
                                .fg(Color::DarkGray)
                                .add_modifier(Modifier::ITALIC),
                        ));
                    }
                }
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(">> ");

    frame.render_stateful_widget(list, chunks[1], list_state);

    render_pagination(frame, chunks[2], explorer);
}

/// Render the pagination strip: prev/next arrows, the numbered page window
/// and the row counters
fn render_pagination(frame: &mut Frame, area: Rect, explorer: &ExplorerState) {
    let prev_style = if explorer.current_page > 1 {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let next_style = if explorer.current_page < explorer.total_pages {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let mut spans = vec![Span::styled("[<]", prev_style), Span::raw(" ")];

    for page in page_window(explorer.current_page, explorer.total_pages) {
        let style = if page == explorer.current_page {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(styling::default_fg())
        };
        spans.push(Span::styled(format!("[{page}]"), style));
        spans.push(Span::raw(" "));
    }

    spans.push(Span::styled("[>]", next_style));
    spans.push(Span::styled(
        format!(
            "  Showing {} of {} rows (page {} of {})",
            explorer.rows.len(),
            explorer.total_rows,
            explorer.current_page,
            explorer.total_pages
        ),
        Style::default().fg(Color::DarkGray),
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
