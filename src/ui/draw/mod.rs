//! UI drawing module
//!
//! This module is organized into focused submodules:
//! - `components`: Reusable UI components (header, footer, spinners, placeholders)
//! - `modals`: Modal dialogs (login, upload, confirmations, notice, preview)
//! - `panels`: Main panels (summaries list, specializations list)
//! - `styling`: Color constants

mod components;
mod modals;
mod panels;
mod styling;

pub use components::{render_footer, render_header};
pub use modals::{
    render_add_specialization_modal, render_delete_confirmation_modal, render_login_modal,
    render_logout_confirmation_modal, render_notice_modal, render_preview_modal,
    render_upload_modal,
};
pub use panels::{render_specializations_panel, render_summaries_panel};
