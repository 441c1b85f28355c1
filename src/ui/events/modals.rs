//! Modal dialog handlers
//!
//! This module handles user input for modal dialogs:
//! - Login form (email + password)
//! - Upload summary form (name + specialization + file path)
//! - Add specialization form
//! - Delete/logout confirmation dialogs
//! - Notice dismissal and the preview modal

use super::helpers::{apply, collect_paste_batch};
use crate::actions::AppAction;
use crate::api::ApiClient;
use crate::state::AppState;
use crate::tasks;
use crate::types::{LoginField, NoticeKind, UploadField};
use arboard::Clipboard;
use color_eyre::Result;
use crossterm::event::KeyCode;
use log::{debug, warn};
use std::path::PathBuf;
use std::sync::{Arc, RwLock};
use std::time::Duration;

/// Handle login form input (with paste batching support)
///
/// Returns true when the user asked to leave the application.
pub fn handle_login_input(
    key: crossterm::event::KeyEvent,
    state: Arc<RwLock<AppState>>,
    client: &Arc<ApiClient>,
) -> Result<bool> {
    use crossterm::event::KeyModifiers;

    match key.code {
        KeyCode::Tab | KeyCode::BackTab => {
            // Switch between fields
            let next = {
                let s = state.read().unwrap();
                match s.active_login_field {
                    LoginField::Email => LoginField::Password,
                    LoginField::Password => LoginField::Email,
                }
            };
            apply(state, AppAction::SetActiveLoginField(next));
        }

        KeyCode::Enter => {
            let (email, password, busy) = {
                let s = state.read().unwrap();
                (
                    s.email_input.trim().to_string(),
                    s.password_input.clone(),
                    s.pending_op.is_some(),
                )
            };

            // Submit whatever was typed; the server rejects bad credentials
            if !busy {
                tasks::login_background(state, client.clone(), email, password);
            }
        }

        KeyCode::Esc => {
            // There is no dashboard behind the login form, so Esc leaves the app
            return Ok(true);
        }

        KeyCode::Backspace => {
            let action = {
                let s = state.read().unwrap();
                match s.active_login_field {
                    LoginField::Email => AppAction::BackspaceEmailInput,
                    LoginField::Password => AppAction::BackspacePasswordInput,
                }
            };
            apply(state, action);
        }

        KeyCode::Char('l') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            // Ctrl+L: Clear current field
            let action = {
                let s = state.read().unwrap();
                match s.active_login_field {
                    LoginField::Email => AppAction::ClearEmailInput,
                    LoginField::Password => AppAction::ClearPasswordInput,
                }
            };
            apply(state, action);
        }

        KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            // Ctrl+W: Delete word backwards; the password is one blob, clear it
            let action = {
                let s = state.read().unwrap();
                match s.active_login_field {
                    LoginField::Email => AppAction::DeleteWordEmailInput,
                    LoginField::Password => AppAction::ClearPasswordInput,
                }
            };
            apply(state, action);
        }

        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            let (batch, char_count) = collect_paste_batch(c);
            if char_count > 1 {
                debug!("batched {char_count} characters (paste detected)");
            }

            let action = {
                let s = state.read().unwrap();
                match s.active_login_field {
                    LoginField::Email => AppAction::AppendToEmailInput(batch),
                    LoginField::Password => AppAction::AppendToPasswordInput(batch),
                }
            };
            apply(state, action);
        }

        _ => {}
    }

    Ok(false)
}

/// Handle upload form input (with paste batching support)
pub fn handle_upload_input(
    key: crossterm::event::KeyEvent,
    state: Arc<RwLock<AppState>>,
    client: &Arc<ApiClient>,
) -> Result<()> {
    use crossterm::event::KeyModifiers;

    match key.code {
        KeyCode::Tab => {
            let next = {
                let s = state.read().unwrap();
                match s.active_upload_field {
                    UploadField::Name => UploadField::Specialization,
                    UploadField::Specialization => UploadField::FilePath,
                    UploadField::FilePath => UploadField::Name,
                }
            };
            apply(state, AppAction::SetActiveUploadField(next));
        }

        KeyCode::BackTab => {
            let next = {
                let s = state.read().unwrap();
                match s.active_upload_field {
                    UploadField::Name => UploadField::FilePath,
                    UploadField::Specialization => UploadField::Name,
                    UploadField::FilePath => UploadField::Specialization,
                }
            };
            apply(state, AppAction::SetActiveUploadField(next));
        }

        // Arrow keys drive the specialization picker while it has focus
        KeyCode::Up => {
            let picker_active = {
                let s = state.read().unwrap();
                s.active_upload_field == UploadField::Specialization
            };
            if picker_active {
                apply(state, AppAction::PrevSpecializationChoice);
            }
        }

        KeyCode::Down => {
            let picker_active = {
                let s = state.read().unwrap();
                s.active_upload_field == UploadField::Specialization
            };
            if picker_active {
                apply(state, AppAction::NextSpecializationChoice);
            }
        }

        KeyCode::Enter => {
            let (name, choice, path, busy) = {
                let s = state.read().unwrap();
                (
                    s.upload_name_input.trim().to_string(),
                    s.upload_specialization
                        .and_then(|i| s.specializations.get(i))
                        .map(|spec| spec.id),
                    s.upload_file_input.trim().to_string(),
                    s.pending_op.is_some(),
                )
            };

            if busy {
                return Ok(());
            }

            // All three fields are mandatory
            let specialization_id = match choice {
                Some(id) if !name.is_empty() && !path.is_empty() => id,
                _ => {
                    let mut s = state.write().unwrap();
                    s.set_notice("Please fill all fields", NoticeKind::Error);
                    return Ok(());
                }
            };

            let file_path = PathBuf::from(&path);
            if !file_path.exists() {
                let mut s = state.write().unwrap();
                s.set_notice(format!("File not found: {path}"), NoticeKind::Error);
                return Ok(());
            }

            tasks::upload_background(state, client.clone(), name, specialization_id, file_path);
        }

        KeyCode::Esc => {
            apply(state, AppAction::ExitUploadMode);
        }

        KeyCode::Backspace => {
            let action = {
                let s = state.read().unwrap();
                match s.active_upload_field {
                    UploadField::Name => Some(AppAction::BackspaceUploadNameInput),
                    UploadField::FilePath => Some(AppAction::BackspaceUploadFileInput),
                    UploadField::Specialization => None,
                }
            };
            if let Some(action) = action {
                apply(state, action);
            }
        }

        KeyCode::Char('l') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            // Ctrl+L: Clear current field
            let action = {
                let s = state.read().unwrap();
                match s.active_upload_field {
                    UploadField::Name => Some(AppAction::ClearUploadNameInput),
                    UploadField::FilePath => Some(AppAction::ClearUploadFileInput),
                    UploadField::Specialization => None,
                }
            };
            if let Some(action) = action {
                apply(state, action);
            }
        }

        KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            // Ctrl+W: Delete word backwards, handy for reworking long paths
            let action = {
                let s = state.read().unwrap();
                match s.active_upload_field {
                    UploadField::Name => Some(AppAction::DeleteWordUploadNameInput),
                    UploadField::FilePath => Some(AppAction::DeleteWordUploadFileInput),
                    UploadField::Specialization => None,
                }
            };
            if let Some(action) = action {
                apply(state, action);
            }
        }

        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            let active = {
                let s = state.read().unwrap();
                s.active_upload_field
            };

            // Picker has no text input
            if active != UploadField::Specialization {
                let (batch, char_count) = collect_paste_batch(c);
                if char_count > 1 {
                    debug!("batched {char_count} characters (paste detected)");
                }

                let action = match active {
                    UploadField::Name => AppAction::AppendToUploadNameInput(batch),
                    _ => AppAction::AppendToUploadFileInput(batch),
                };
                apply(state, action);
            }
        }

        _ => {}
    }

    Ok(())
}

/// Handle add specialization form input (with paste batching support)
pub fn handle_add_specialization_input(
    key: crossterm::event::KeyEvent,
    state: Arc<RwLock<AppState>>,
    client: &Arc<ApiClient>,
) -> Result<()> {
    use crossterm::event::KeyModifiers;

    match key.code {
        KeyCode::Enter => {
            let (name, busy) = {
                let s = state.read().unwrap();
                (
                    s.specialization_name_input.trim().to_string(),
                    s.pending_op.is_some(),
                )
            };

            if busy {
                return Ok(());
            }

            if name.is_empty() {
                let mut s = state.write().unwrap();
                s.set_notice("Please enter specialization name", NoticeKind::Error);
            } else {
                tasks::add_specialization_background(state, client.clone(), name);
            }
        }

        KeyCode::Esc => {
            apply(state, AppAction::ExitAddSpecializationMode);
        }

        KeyCode::Backspace => {
            apply(state, AppAction::BackspaceSpecializationNameInput);
        }

        KeyCode::Char('l') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            apply(state, AppAction::ClearSpecializationNameInput);
        }

        KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            apply(state, AppAction::DeleteWordSpecializationNameInput);
        }

        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            let (batch, char_count) = collect_paste_batch(c);
            if char_count > 1 {
                debug!("batched {char_count} characters (paste detected)");
            }
            apply(state, AppAction::AppendToSpecializationNameInput(batch));
        }

        _ => {}
    }

    Ok(())
}

/// Handle delete summary confirmation dialog
pub fn handle_delete_confirmation(
    key: crossterm::event::KeyEvent,
    state: Arc<RwLock<AppState>>,
    client: &Arc<ApiClient>,
    id: i64,
) -> Result<()> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            apply(state.clone(), AppAction::ExitConfirm);
            tasks::delete_background(state, client.clone(), id);
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            apply(state, AppAction::ExitConfirm);
        }
        _ => {}
    }
    Ok(())
}

/// Handle logout confirmation dialog
pub fn handle_logout_confirmation(
    key: crossterm::event::KeyEvent,
    state: Arc<RwLock<AppState>>,
    client: &Arc<ApiClient>,
) -> Result<()> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            client.clear_token();
            apply(state, AppAction::Logout);
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            apply(state, AppAction::ExitConfirm);
        }
        _ => {}
    }
    Ok(())
}

/// Handle the blocking notice modal
pub fn handle_notice(key: crossterm::event::KeyEvent, state: Arc<RwLock<AppState>>) -> Result<()> {
    match key.code {
        KeyCode::Enter | KeyCode::Esc => {
            apply(state, AppAction::DismissNotice);
        }
        _ => {}
    }
    Ok(())
}

/// Handle the preview modal: yank the temp file path or close the preview
pub fn handle_preview(key: crossterm::event::KeyEvent, state: Arc<RwLock<AppState>>) -> Result<()> {
    match key.code {
        KeyCode::Char('y') => {
            let path = {
                let s = state.read().unwrap();
                s.preview
                    .as_ref()
                    .and_then(|doc| doc.path())
                    .map(|p| p.display().to_string())
            };

            let path = match path {
                Some(p) => p,
                None => return Ok(()),
            };

            // Copy to clipboard
            match Clipboard::new() {
                Ok(mut clipboard) => match clipboard.set_text(path) {
                    Ok(_) => {
                        {
                            let mut s = state.write().unwrap();
                            s.path_yanked = true;
                        }

                        // Spawn task to clear the flash after a delay
                        let state_clone = state.clone();
                        tokio::spawn(async move {
                            tokio::time::sleep(Duration::from_millis(1500)).await;
                            if let Ok(mut s) = state_clone.write() {
                                s.path_yanked = false;
                            }
                        });
                    }
                    Err(e) => {
                        warn!("failed to copy to clipboard: {e}");
                    }
                },
                Err(e) => {
                    warn!("failed to access clipboard: {e}");
                }
            }
        }

        // Closing the preview removes the temp file
        KeyCode::Esc | KeyCode::Enter => {
            apply(state, AppAction::ClosePreview);
        }

        _ => {}
    }
    Ok(())
}
