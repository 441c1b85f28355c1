//! Modal dialog rendering
//!
//! This module contains rendering functions for modal dialogs:
//! - Login form (email + password)
//! - Upload summary form (name + specialization + file path)
//! - Add specialization form
//! - Delete/logout confirmations
//! - Blocking notice
//! - PDF preview

use super::styling::{notice_color, HELP_FG, MODAL_BG};
use crate::preview::format_size;
use crate::state::AppState;
use crate::types::{LoginField, NoticeKind, PendingOp, UploadField};
use crate::utils::truncate;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the login form, shown centered over the otherwise empty screen
pub fn render_login_modal(frame: &mut Frame, state: &AppState, base_url: &str) {
    let area = frame.area();

    let modal_width = (area.width as f32 * 0.6).min(70.0) as u16;
    let modal_height = 11;
    let modal_area = centered_rect(area, modal_width, modal_height);

    frame.render_widget(Clear, modal_area);

    let block = Block::default()
        .title(" Sign In ")
        .borders(Borders::ALL)
        .border_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .style(Style::default().bg(MODAL_BG).fg(Color::White));

    let inner = block.inner(modal_area);
    frame.render_widget(block, modal_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Description
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Email label
            Constraint::Length(1), // Email input
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Password label
            Constraint::Length(1), // Password input
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Help / status
        ])
        .split(inner);

    let desc = Paragraph::new(format!("Admin panel for {base_url}"))
        .style(Style::default().fg(Color::Gray));
    frame.render_widget(desc, chunks[0]);

    let email_active = state.active_login_field == LoginField::Email;
    let password_active = state.active_login_field == LoginField::Password;

    render_field_label(frame, chunks[2], "Email:", email_active);
    render_field_input(frame, chunks[3], &state.email_input, email_active);

    render_field_label(frame, chunks[5], "Password:", password_active);
    let masked = "*".repeat(state.password_input.chars().count());
    render_field_input(frame, chunks[6], &masked, password_active);

    if state.pending_op == Some(PendingOp::Login) {
        let status = Paragraph::new("Signing in...")
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center);
        frame.render_widget(status, chunks[8]);
    } else {
        let help = Paragraph::new("Tab: Switch fields  |  Enter: Sign in  |  Ctrl+L: Clear  |  Esc: Quit")
            .style(Style::default().fg(HELP_FG))
            .alignment(Alignment::Center);
        frame.render_widget(help, chunks[8]);
    }
}

/// Render the upload summary form
pub fn render_upload_modal(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    let modal_width = (area.width as f32 * 0.7).min(90.0) as u16;
    let modal_height = 14;
    let modal_area = centered_rect(area, modal_width, modal_height);

    frame.render_widget(Clear, modal_area);

    let block = Block::default()
        .title(" Upload Summary ")
        .borders(Borders::ALL)
        .border_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .style(Style::default().bg(MODAL_BG).fg(Color::White));

    let inner = block.inner(modal_area);
    frame.render_widget(block, modal_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Description
            Constraint::Length(1), // Name label
            Constraint::Length(1), // Name input
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Specialization label
            Constraint::Length(1), // Specialization picker
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // File label
            Constraint::Length(1), // File input
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Help / status
        ])
        .split(inner);

    let desc = Paragraph::new("Upload a PDF document and file it under a specialization")
        .style(Style::default().fg(Color::Gray));
    frame.render_widget(desc, chunks[0]);

    let name_active = state.active_upload_field == UploadField::Name;
    let spec_active = state.active_upload_field == UploadField::Specialization;
    let file_active = state.active_upload_field == UploadField::FilePath;

    render_field_label(frame, chunks[1], "Name:", name_active);
    render_field_input(frame, chunks[2], &state.upload_name_input, name_active);

    render_field_label(frame, chunks[4], "Specialization:", spec_active);
    let picker_text = match state
        .upload_specialization
        .and_then(|i| state.specializations.get(i))
    {
        Some(spec) => format!("< {} >", spec.name),
        None => "Select a Specialization".to_string(),
    };
    let picker_style = if spec_active {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else if state.upload_specialization.is_none() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::Gray)
    };
    frame.render_widget(Paragraph::new(picker_text).style(picker_style), chunks[5]);

    render_field_label(frame, chunks[7], "PDF file path:", file_active);
    render_field_input(frame, chunks[8], &state.upload_file_input, file_active);

    if state.pending_op == Some(PendingOp::Upload) {
        let status = Paragraph::new("Uploading...")
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center);
        frame.render_widget(status, chunks[10]);
    } else {
        let help = Paragraph::new(
            "Tab: Switch fields  |  ↑/↓: Pick specialization  |  Enter: Upload  |  Esc: Cancel",
        )
        .style(Style::default().fg(HELP_FG))
        .alignment(Alignment::Center);
        frame.render_widget(help, chunks[10]);
    }
}

/// Render the add specialization form
pub fn render_add_specialization_modal(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    let modal_width = (area.width as f32 * 0.6).min(80.0) as u16;
    let modal_height = 7;
    let modal_area = centered_rect(area, modal_width, modal_height);

    frame.render_widget(Clear, modal_area);

    let block = Block::default()
        .title(" Add Specialization ")
        .borders(Borders::ALL)
        .border_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .style(Style::default().bg(MODAL_BG).fg(Color::White));

    let inner = block.inner(modal_area);
    frame.render_widget(block, modal_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    let label = Paragraph::new("Name:").style(Style::default().fg(Color::LightCyan));
    frame.render_widget(label, chunks[0]);

    let input = Paragraph::new(state.specialization_name_input.clone()).style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );
    frame.render_widget(input, chunks[1]);

    if state.pending_op == Some(PendingOp::AddSpecialization) {
        let status = Paragraph::new("Adding...")
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center);
        frame.render_widget(status, chunks[3]);
    } else {
        let help = Paragraph::new("Enter: Add  |  Ctrl+L: Clear  |  Esc: Cancel")
            .style(Style::default().fg(HELP_FG))
            .alignment(Alignment::Center);
        frame.render_widget(help, chunks[3]);
    }
}

/// Render the delete summary confirmation modal
pub fn render_delete_confirmation_modal(frame: &mut Frame, summary_name: &str) {
    let area = frame.area();

    let modal_width = (area.width as f32 * 0.5).min(60.0) as u16;
    let modal_height = 7;
    let modal_area = centered_rect(area, modal_width, modal_height);

    frame.render_widget(Clear, modal_area);

    let block = Block::default()
        .title(" Delete Summary? ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
        .style(Style::default().bg(MODAL_BG).fg(Color::White));

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
        "This will permanently delete \"{}\".\nThe uploaded file cannot be recovered.",
        truncate(summary_name, 40)
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

/// Render the logout confirmation modal
pub fn render_logout_confirmation_modal(frame: &mut Frame) {
    let area = frame.area();

    let modal_width = (area.width as f32 * 0.5).min(60.0) as u16;
    let modal_height = 7;
    let modal_area = centered_rect(area, modal_width, modal_height);

    frame.render_widget(Clear, modal_area);

    let block = Block::default()
        .title(" Log Out? ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
        .style(Style::default().bg(MODAL_BG).fg(Color::White));

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

    let message = Paragraph::new(
        "This will end the session and remove the stored token.\nYou will need to sign in again.",
    )
    .style(Style::default().fg(Color::White))
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });
    frame.render_widget(message, chunks[0]);

    let actions = Paragraph::new("[Y] Yes, log out  |  [N] Cancel")
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center);
    frame.render_widget(actions, chunks[2]);
}

/// Render the blocking notice modal
pub fn render_notice_modal(frame: &mut Frame, text: &str, kind: NoticeKind) {
    let area = frame.area();

    let modal_width = (area.width as f32 * 0.6).min(80.0) as u16;
    let modal_height = 8;
    let modal_area = centered_rect(area, modal_width, modal_height);

    frame.render_widget(Clear, modal_area);

    let title = match kind {
        NoticeKind::Info => " Notice ",
        NoticeKind::Error => " Error ",
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(
            Style::default()
                .fg(notice_color(kind))
                .add_modifier(Modifier::BOLD),
        )
        .style(Style::default().bg(MODAL_BG).fg(Color::White));

    let inner = block.inner(modal_area);
    frame.render_widget(block, modal_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(inner);

    let message = Paragraph::new(text.to_string())
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(message, chunks[0]);

    let actions = Paragraph::new("[Enter] OK")
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center);
    frame.render_widget(actions, chunks[1]);
}

/// Render the PDF preview modal over the materialized document
pub fn render_preview_modal(frame: &mut Frame, state: &AppState) {
    let doc = match &state.preview {
        Some(doc) => doc,
        None => return,
    };

    let area = frame.area();

    let modal_width = (area.width as f32 * 0.7).min(90.0) as u16;
    let modal_height = 11;
    let modal_area = centered_rect(area, modal_width, modal_height);

    frame.render_widget(Clear, modal_area);

    let block = Block::default()
        .title(format!(" Preview: {} ", truncate(doc.summary_name(), 40)))
        .borders(Borders::ALL)
        .border_style(
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
        .style(Style::default().bg(MODAL_BG).fg(Color::White));

    let inner = block.inner(modal_area);
    frame.render_widget(block, modal_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Size
            Constraint::Length(1), // PDF version / warning
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Path label
            Constraint::Length(1), // Path
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Help / flash
        ])
        .split(inner);

    let size = Paragraph::new(format!("Size: {}", format_size(doc.size())))
        .style(Style::default().fg(Color::Gray));
    frame.render_widget(size, chunks[0]);

    let version = match doc.pdf_version() {
        Some(v) => {
            Paragraph::new(format!("PDF version: {v}")).style(Style::default().fg(Color::Gray))
        }
        None => Paragraph::new("Warning: content does not look like a PDF")
            .style(Style::default().fg(Color::Yellow)),
    };
    frame.render_widget(version, chunks[1]);

    let path_label =
        Paragraph::new("Open in your PDF viewer:").style(Style::default().fg(Color::LightCyan));
    frame.render_widget(path_label, chunks[3]);

    let path_text = doc
        .path()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    let path = Paragraph::new(path_text).style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );
    frame.render_widget(path, chunks[4]);

    if state.path_yanked {
        let flash = Paragraph::new("✓ Path copied to clipboard")
            .style(Style::default().fg(Color::Green))
            .alignment(Alignment::Center);
        frame.render_widget(flash, chunks[6]);
    } else {
        let help = Paragraph::new("y: Copy path  |  Esc: Close (removes the file)")
            .style(Style::default().fg(HELP_FG))
            .alignment(Alignment::Center);
        frame.render_widget(help, chunks[6]);
    }
}

// ============================================================================
// Private Helper Functions
// ============================================================================

/// Centered modal rectangle of the given size
fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    Rect {
        x: (area.width.saturating_sub(width)) / 2,
        y: (area.height.saturating_sub(height)) / 2,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

/// Field label with an indicator when the field is active
fn render_field_label(frame: &mut Frame, area: Rect, label: &str, active: bool) {
    let text = if active {
        format!("► {label}")
    } else {
        format!("  {label}")
    };
    let label = Paragraph::new(text).style(Style::default().fg(if active {
        Color::Yellow
    } else {
        Color::LightCyan
    }));
    frame.render_widget(label, area);
}

/// Field input line, highlighted when the field is active
fn render_field_input(frame: &mut Frame, area: Rect, value: &str, active: bool) {
    let input = Paragraph::new(value.to_string()).style(
        Style::default()
            .fg(if active { Color::Yellow } else { Color::Gray })
            .add_modifier(if active {
                Modifier::BOLD
            } else {
                Modifier::empty()
            }),
    );
    frame.render_widget(input, area);
}
