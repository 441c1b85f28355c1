//! Reusable UI components
//!
//! This module contains shared UI components used throughout the application:
//! - Header (title, status, auth)
//! - Footer (command help)
//! - Loading spinners
//! - Error/empty state messages

use crate::state::AppState;
use crate::types::{ActiveView, LoadingState, PendingOp};
use crate::utils::mask_token;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the application header with status and auth info
pub fn render_header(frame: &mut Frame, area: Rect, base_url: &str, state: &AppState, token: Option<&str>) {
    let status_text = get_status_text(state);
    let auth_status = get_auth_status_text(token);

    let header_text = format!("summary admin - {base_url} [{status_text}] | {auth_status}");

    let header = Paragraph::new(header_text)
        .style(Style::default().fg(Color::Cyan))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(header, area);
}

/// Render the footer with command help
pub fn render_footer(frame: &mut Frame, area: Rect, active_view: &ActiveView) {
    let footer_text = match active_view {
        ActiveView::Summaries => {
            "j/k/↑/↓:Nav Enter:Preview o:Download d:Delete u:Upload | 1/2:View r:Reload L:Logout q:Quit"
        }
        ActiveView::Specializations => {
            "j/k/↑/↓:Nav a:Add | 1/2:View r:Reload L:Logout q:Quit"
        }
    };

    let footer = Paragraph::new(footer_text)
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL).title("Commands"));

    frame.render_widget(footer, area);
}

/// Render loading spinner animation
pub fn render_loading_spinner(frame: &mut Frame, area: Rect, title: &str, spinner_index: usize) {
    let spinner = ["⠋", "⠙", "⠹", "⠸"];
    let loading_text = format!("{} Loading\n\nPlease wait...", spinner[spinner_index]);

    let loading = Paragraph::new(loading_text)
        .style(Style::default().fg(Color::Yellow))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title.to_string()),
        );

    frame.render_widget(loading, area);
}

/// Render error message with reload instructions
pub fn render_error_message(frame: &mut Frame, area: Rect, title: &str, error: &str) {
    let error_msg = format!("✗ {error}\n\nPress [r] to reload");

    let error_widget = Paragraph::new(error_msg)
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

/// Get the header status text for whatever the app is busy with
fn get_status_text(state: &AppState) -> String {
    if let Some(op) = &state.pending_op {
        return match op {
            PendingOp::Login => "Signing in...".to_string(),
            PendingOp::Upload => "Uploading...".to_string(),
            PendingOp::Delete => "Deleting...".to_string(),
            PendingOp::AddSpecialization => "Adding...".to_string(),
        };
    }
    if state.preview_loading {
        return "Loading preview...".to_string();
    }

    let loading = match state.active_view {
        ActiveView::Summaries => &state.summaries_loading,
        ActiveView::Specializations => &state.specializations_loading,
    };
    match loading {
        LoadingState::Idle => "Idle".to_string(),
        LoadingState::Loading => "Loading...".to_string(),
        LoadingState::Complete => match state.active_view {
            ActiveView::Summaries => format!("{} summaries", state.summaries.len()),
            ActiveView::Specializations => {
                format!("{} specializations", state.specializations.len())
            }
        },
        LoadingState::Error(_) => "Error".to_string(),
    }
}

/// Get authentication status display text
fn get_auth_status_text(token: Option<&str>) -> String {
    match token {
        Some(token) => {
            let display = mask_token(token);
            format!("🔒 {display} | 'L':logout")
        }
        None => "🔓 Not authenticated".to_string(),
    }
}
