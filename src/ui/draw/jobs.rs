//! Job manager screen
//!
//! Exactly one of four things renders: the loading spinner, the fetch or
//! delete error, the empty notice, or the job list with a detail pane for
//! the selected job.

use super::components::{render_empty_message, render_error_message, render_loading_spinner};
use super::styling::{self, get_status_color};
use crate::state::{AppState, JobsState};
use crate::types::LoadingState;
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
    list_state: &mut ListState,
) {
    let jobs = &state.jobs;

    if jobs.loading.is_fetching() {
        render_loading_spinner(frame, area, "Jobs", "Loading jobs", spinner_index);
        return;
    }

    if let LoadingState::Error(error) = &jobs.loading {
        render_error_message(
            frame,
            area,
            "Jobs",
            error,
            "Press [r] to retry or [Esc] to dismiss",
        );
        return;
    }

    if jobs.jobs.is_empty() {
        render_empty_message(frame, area, "Jobs", "No jobs found\n\nPress [r] to refresh");
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    render_job_list(frame, chunks[0], jobs, list_state);
    render_job_detail(frame, chunks[1], jobs);
}

fn render_job_list(frame: &mut Frame, area: Rect, jobs: &JobsState, list_state: &mut ListState) {
    let items: Vec<ListItem> = jobs
        .jobs
        .iter()
        .map(|job| {
            let owner = job
                .user
                .as_ref()
                .map(|u| u.username.as_str())
                .unwrap_or("-");

            let mut spans = vec![
                Span::styled(format!("#{:<6}", job.id), Style::default().fg(Color::DarkGray)),
                Span::raw(format!("{:<14}", job.job_type)),
                Span::styled(
                    format!("{:<12}", job.status.label()),
                    Style::default().fg(get_status_color(job.status)),
                ),
                Span::raw(format!("{:<12}", owner)),
                Span::styled(job.created_at.clone(), Style::default().fg(Color::DarkGray)),
            ];
            if jobs.deleting == Some(job.id) {
                spans.push(Span::styled(
                    " deleting...",
                    Style::default().fg(Color::Yellow),
                ));
            }

            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(format!("Jobs ({})", jobs.jobs.len()))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(styling::focused_border())),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(">> ");

    frame.render_stateful_widget(list, area, list_state);
}

fn render_job_detail(frame: &mut Frame, area: Rect, jobs: &JobsState) {
    let block = Block::default()
        .title("Details")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(styling::unfocused_border()));

    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    let Some(job) = jobs.selected_job() else {
        let empty = Paragraph::new("No job selected").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, inner_area);
        return;
    };

    let owner = job
        .user
        .as_ref()
        .map(|u| u.username.as_str())
        .unwrap_or("-");

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Id: ", Style::default().fg(Color::Cyan)),
            Span::raw(format!("{}", job.id)),
        ]),
        Line::from(vec![
            Span::styled("Type: ", Style::default().fg(Color::Cyan)),
            Span::raw(job.job_type.clone()),
        ]),
        Line::from(vec![
            Span::styled("Status: ", Style::default().fg(Color::Cyan)),
            Span::styled(
                job.status.label(),
                Style::default().fg(get_status_color(job.status)),
            ),
        ]),
        Line::from(vec![
            Span::styled("Owner: ", Style::default().fg(Color::Cyan)),
            Span::raw(owner.to_string()),
        ]),
        Line::from(vec![
            Span::styled("Created: ", Style::default().fg(Color::Cyan)),
            Span::raw(job.created_at.clone()),
        ]),
    ];

    if let Some(input) = &job.input_data {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Input:",
            Style::default().fg(Color::Cyan),
        )));
        for line in try_format_json(input).lines() {
            lines.push(Line::from(line.to_string()));
        }
    }

    if let Some(output) = &job.output_data {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Output:",
            Style::default().fg(Color::Cyan),
        )));
        for line in try_format_json(output).lines() {
            lines.push(Line::from(line.to_string()));
        }
    }

    if let Some(error) = &job.error_msg {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Error:",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )));
        for line in error.lines() {
            lines.push(Line::from(Span::styled(
                line.to_string(),
                Style::default().fg(Color::Red),
            )));
        }
    }

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, inner_area);
}
