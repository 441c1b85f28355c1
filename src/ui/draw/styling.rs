//! Styling utilities and color schemes
//!
//! This module contains color helpers and style constants used throughout the UI.

use ratatui::style::Color;

use crate::types::NoticeKind;

/// Get the accent color for a notice by severity
pub fn notice_color(kind: NoticeKind) -> Color {
    match kind {
        NoticeKind::Info => Color::Green,
        NoticeKind::Error => Color::Red,
    }
}

/// Background shade shared by every modal
pub const MODAL_BG: Color = Color::Rgb(30, 30, 30);

/// Gray used for the help line at the bottom of every modal
pub const HELP_FG: Color = Color::Rgb(150, 150, 150);
