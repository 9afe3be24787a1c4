//! API tester screen
//!
//! This module contains rendering functions for the two tester panels:
//! - Endpoints panel (left side) - the catalog tree with role and category groups
//! - Details panel (right side) - tabs for the selected endpoint, the last
//!   response and the execution history

use super::components::{render_empty_message, render_no_search_results, SPINNER_FRAMES};
use super::styling::{self, get_method_color};
use crate::state::{AppState, TesterState};
use crate::types::{DetailTab, PanelFocus, RenderItem};
use crate::utils::try_format_json;
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
    catalog_list_state: &mut ListState,
    history_list_state: &mut ListState,
) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    render_catalog_panel(frame, chunks[0], state, spinner_index, catalog_list_state);
    render_details_panel(frame, chunks[1], state, history_list_state);
}

/// Render the left panel with the grouped endpoint list
fn render_catalog_panel(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    spinner_index: usize,
    list_state: &mut ListState,
) {
    let tester = &state.tester;

    if tester.render_items.is_empty() {
        if !tester.search_query.is_empty() {
            render_no_search_results(frame, area);
        } else {
            render_empty_message(frame, area, "[1] Endpoints", "No endpoints in the catalog");
        }
        return;
    }

    let mut items: Vec<ListItem> = Vec::new();
    for item in &tester.render_items {
        let line = match item {
            RenderItem::RoleHeader {
                role,
                count,
                collapsed,
            } => {
                let icon = if *collapsed { "▶" } else { "▼" };
                Line::from(Span::styled(
                    format!("{} {} ({})", icon, role.label().to_uppercase(), count),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ))
            }
            RenderItem::CategoryHeader {
                name,
                count,
                collapsed,
                ..
            } => {
                let icon = if *collapsed { "▶" } else { "▼" };
                Line::from(Span::styled(
                    format!("  {} {} ({})", icon, name, count),
                    Style::default().fg(Color::Cyan),
                ))
            }
            RenderItem::Endpoint { endpoint } => {
                let method_color = get_method_color(&endpoint.method);

                let mut spans = vec![
                    Span::raw("    "),
                    Span::styled(
                        format!("{:7}", endpoint.method),
                        Style::default()
                            .fg(method_color)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(" "),
                    Span::raw(endpoint.name.clone()),
                ];
                if tester.executing.as_deref() == Some(endpoint.path.as_str()) {
                    spans.push(Span::styled(
                        format!(" {}", SPINNER_FRAMES[spinner_index % SPINNER_FRAMES.len()]),
                        Style::default().fg(Color::Yellow),
                    ));
                }
                Line::from(spans)
            }
        };
        items.push(ListItem::new(line));
    }

    let border_color = if tester.panel_focus == PanelFocus::List {
        styling::focused_border()
    } else {
        styling::unfocused_border()
    };

    let list = List::new(items)
        .block(
            Block::default()
                .title(format!("[1] Endpoints ({})", tester.filtered.len()))
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

/// Render the right panel with endpoint details and tabs
fn render_details_panel(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    history_list_state: &mut ListState,
) {
    let tester = &state.tester;

    let border_color = if tester.panel_focus == PanelFocus::Detail {
        styling::focused_border()
    } else {
        styling::unfocused_border()
    };

    let block = Block::default()
        .title("[2] Details & Response")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    // Tab bar, an error banner when one is pending, then the tab content
    let constraints = if tester.error.is_some() {
        vec![
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ]
    } else {
        vec![Constraint::Length(1), Constraint::Min(0)]
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner_area);

    render_tab_bar(frame, chunks[0], tester);

    let content_area = if let Some(error) = &tester.error {
        let banner = Paragraph::new(format!("❌ {error}  (Esc dismisses)"))
            .style(Style::default().fg(Color::Red));
        frame.render_widget(banner, chunks[1]);
        chunks[2]
    } else {
        chunks[1]
    };

    match tester.detail_tab {
        DetailTab::Endpoint => render_endpoint_tab(frame, content_area, tester),
        DetailTab::Response => render_response_tab(frame, content_area, tester),
        DetailTab::History => {
            render_history_tab(frame, content_area, tester, history_list_state);
        }
    }
}

/// Render the tab bar showing [ Endpoint ] [ Response ] [ History ]
fn render_tab_bar(frame: &mut Frame, area: Rect, tester: &TesterState) {
    let is_executing = tester.executing.is_some();

    let endpoint_style = if tester.detail_tab == DetailTab::Endpoint {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(styling::default_fg())
    };

    let response_label = if is_executing {
        "Response (...)".to_string()
    } else {
        "Response".to_string()
    };

    let response_style = if tester.detail_tab == DetailTab::Response {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(styling::default_fg())
    };

    let history_style = if tester.detail_tab == DetailTab::History {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(styling::default_fg())
    };

    let tabs = Line::from(vec![
        Span::styled("[ ", Style::default().fg(Color::DarkGray)),
        Span::styled("Endpoint", endpoint_style),
        Span::styled(" ] [ ", Style::default().fg(Color::DarkGray)),
        Span::styled(response_label, response_style),
        Span::styled(" ] [ ", Style::default().fg(Color::DarkGray)),
        Span::styled(format!("History ({})", tester.history.len()), history_style),
        Span::styled(" ]", Style::default().fg(Color::DarkGray)),
    ]);

    let tab_bar = Paragraph::new(tabs);
    frame.render_widget(tab_bar, area);
}

/// Render the Endpoint tab with descriptor details and the request body
fn render_endpoint_tab(frame: &mut Frame, area: Rect, tester: &TesterState) {
    let Some(endpoint) = &tester.selected_endpoint else {
        let empty =
            Paragraph::new("No endpoint selected").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, area);
        return;
    };

    let method_color = get_method_color(&endpoint.method);
    let auth_text = match endpoint.auth_role {
        Some(role) => format!("bearer ({})", role.label()),
        None => "none".to_string(),
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                endpoint.method.clone(),
                Style::default()
                    .fg(method_color)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::raw(endpoint.path.clone()),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Name: ", Style::default().fg(Color::Cyan)),
            Span::raw(endpoint.name.clone()),
        ]),
        Line::from(vec![
            Span::styled("Summary: ", Style::default().fg(Color::Cyan)),
            Span::raw(endpoint.description.clone()),
        ]),
        Line::from(vec![
            Span::styled("Auth: ", Style::default().fg(Color::Cyan)),
            Span::raw(auth_text),
        ]),
    ];

    if endpoint.file_upload {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Multipart upload endpoint. Run it with curl instead.",
            Style::default().fg(Color::Yellow),
        )));
    } else if endpoint.supports_body() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Request body [e edits]:",
            Style::default().fg(Color::Cyan),
        )));
        let body = tester.body_editor.content();
        if body.is_empty() {
            lines.push(Line::from(Span::styled(
                "(empty)",
                Style::default().fg(Color::DarkGray),
            )));
        } else {
            for line in body.lines() {
                lines.push(Line::from(line.to_string()));
            }
        }
    }

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

/// Render the Response tab: status line, blank separator, then the body
/// with the yankable line highlighted
fn render_response_tab(frame: &mut Frame, area: Rect, tester: &TesterState) {
    if tester.executing.is_some() {
        let executing =
            Paragraph::new("⏳ Executing request...").style(Style::default().fg(Color::Yellow));
        frame.render_widget(executing, area);
        return;
    }

    let Some(record) = tester.viewed_record() else {
        let hint = Paragraph::new("Press [Space] to execute request")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(hint, area);
        return;
    };

    let Some(status) = record.status else {
        // The attempt never produced an HTTP response
        let message = record.error_message.as_deref().unwrap_or("Request failed");
        let mut lines = vec![
            Line::from(Span::styled(
                "❌ Error",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        for line in message.lines() {
            lines.push(Line::from(Span::styled(
                line.to_string(),
                Style::default().fg(Color::Red),
            )));
        }
        let error = Paragraph::new(lines).wrap(Wrap { trim: false });
        frame.render_widget(error, area);
        return;
    };

    let status_color = if record.succeeded {
        Color::Green
    } else {
        Color::Red
    };

    let mut status_spans = vec![
        Span::styled("Status: ", Style::default().fg(Color::Cyan)),
        Span::styled(
            format!("{} {}", status, record.status_text),
            Style::default().fg(status_color),
        ),
        Span::styled("  Duration: ", Style::default().fg(Color::Cyan)),
        Span::raw(format!("{}ms", record.elapsed.as_millis())),
    ];
    if let Some(view) = tester.response_view {
        if tester.history.len() > 1 {
            status_spans.push(Span::styled(
                format!("  [{}/{}]", view + 1, tester.history.len()),
                Style::default().fg(Color::DarkGray),
            ));
        }
    }

    let mut lines: Vec<Line> = vec![Line::from(status_spans), Line::from("")];
    for line in try_format_json(&record.body).lines() {
        lines.push(Line::from(line.to_string()));
    }

    if let Some(selected) = lines.get_mut(tester.response_selected_line) {
        selected.style = if tester.yank_flash {
            Style::default()
                .bg(Color::Green)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().bg(Color::DarkGray)
        };
    }

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((tester.response_scroll as u16, 0));
    frame.render_widget(paragraph, area);
}

/// Render the History tab as a selectable list of past attempts
fn render_history_tab(
    frame: &mut Frame,
    area: Rect,
    tester: &TesterState,
    list_state: &mut ListState,
) {
    if tester.history.is_empty() {
        let empty =
            Paragraph::new("No requests executed yet").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = tester
        .history
        .iter()
        .map(|record| {
            let method_color = get_method_color(&record.endpoint.method);
            let status_span = match record.status {
                Some(status) => {
                    let color = if record.succeeded {
                        Color::Green
                    } else {
                        Color::Red
                    };
                    Span::styled(format!("{status}"), Style::default().fg(color))
                }
                None => Span::styled("ERR", Style::default().fg(Color::Red)),
            };

            let line = Line::from(vec![
                Span::styled(
                    format!("{} ", record.timestamp),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    format!("{:7}", record.endpoint.method),
                    Style::default()
                        .fg(method_color)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(" "),
                Span::raw(record.endpoint.path.clone()),
                Span::raw(" "),
                status_span,
                Span::styled(
                    format!(" {}ms", record.elapsed.as_millis()),
                    Style::default().fg(Color::DarkGray),
                ),
            ]);

            ListItem::new(line)
        })
        .collect();

    let list = List::new(items)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(">> ");

    frame.render_stateful_widget(list, area, list_state);
}
