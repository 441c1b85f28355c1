//! Main panel rendering
//!
//! This module contains rendering functions for the two dashboard views:
//! - Summaries panel (id, name, specialization rows)
//! - Specializations panel (id, name rows)
//!
//! Exactly one panel is visible at a time; the 1/2 keys switch between them.

use super::components::{render_empty_message, render_error_message, render_loading_spinner};
use crate::state::AppState;
use crate::types::LoadingState;
use crate::utils::truncate;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

const SUMMARIES_TITLE: &str = "[1] Summaries";
const SPECIALIZATIONS_TITLE: &str = "[2] Specializations";

/// Render the summaries list panel
pub fn render_summaries_panel(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    spinner_index: usize,
    list_state: &mut ListState,
) {
    match &state.summaries_loading {
        LoadingState::Loading => {
            render_loading_spinner(frame, area, SUMMARIES_TITLE, spinner_index);
        }
        LoadingState::Error(error) => {
            render_error_message(frame, area, SUMMARIES_TITLE, error);
        }
        LoadingState::Complete | LoadingState::Idle => {
            if state.summaries.is_empty() {
                render_empty_message(
                    frame,
                    area,
                    SUMMARIES_TITLE,
                    "No summaries found\n\nPress [u] to upload one or [r] to reload",
                );
            } else {
                render_summaries_list(frame, area, state, list_state);
            }
        }
    }
}

/// Render the specializations list panel
pub fn render_specializations_panel(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    spinner_index: usize,
    list_state: &mut ListState,
) {
    match &state.specializations_loading {
        LoadingState::Loading => {
            render_loading_spinner(frame, area, SPECIALIZATIONS_TITLE, spinner_index);
        }
        LoadingState::Error(error) => {
            render_error_message(frame, area, SPECIALIZATIONS_TITLE, error);
        }
        LoadingState::Complete | LoadingState::Idle => {
            if state.specializations.is_empty() {
                render_empty_message(
                    frame,
                    area,
                    SPECIALIZATIONS_TITLE,
                    "No specializations found\n\nPress [a] to add one or [r] to reload",
                );
            } else {
                render_specializations_list(frame, area, state, list_state);
            }
        }
    }
}

// ============================================================================
// Private Helper Functions
// ============================================================================

fn render_summaries_list(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    list_state: &mut ListState,
) {
    let items: Vec<ListItem> = state
        .summaries
        .iter()
        .map(|summary| {
            let line = Line::from(vec![
                Span::styled(
                    format!("{:>5}  ", summary.id),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    format!("{:<32}", truncate(&summary.name, 30)),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    summary.specialization_label().to_string(),
                    Style::default().fg(Color::Cyan),
                ),
            ]);

            ListItem::new(line)
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(format!("{SUMMARIES_TITLE} ({})", state.summaries.len()))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(">> ");

    frame.render_stateful_widget(list, area, list_state);
}

fn render_specializations_list(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    list_state: &mut ListState,
) {
    let items: Vec<ListItem> = state
        .specializations
        .iter()
        .map(|spec| {
            let line = Line::from(vec![
                Span::styled(
                    format!("{:>5}  ", spec.id),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw(spec.name.clone()),
            ]);

            ListItem::new(line)
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(format!(
                    "{SPECIALIZATIONS_TITLE} ({})",
                    state.specializations.len()
                ))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(">> ");

    frame.render_stateful_widget(list, area, list_state);
}
