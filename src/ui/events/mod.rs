//! Event handling system for summary-admin-tui
//!
//! This module processes user input and translates it into state-changing actions.
//! It handles multiple input modes:
//! - Login: Email/password form shown before the dashboard
//! - Normal: Dashboard navigation and commands
//! - Uploading / AddingSpecialization: Form modals
//! - ConfirmDelete / ConfirmLogout: Y/N confirmations
//! - Notice: A blocking message that must be dismissed
//! - Preview: The materialized PDF document modal
//!
//! # Architecture
//!
//! The EventHandler uses an action pattern where input events generate AppActions
//! that are applied to AppState via the apply_action function in actions.rs.
//! Server calls never run here; handlers spawn them through tasks.rs so the
//! input loop stays responsive.
//!
//! # Lock Management
//!
//! This module frequently acquires locks on Arc<RwLock<AppState>>. Care must be
//! taken to minimize lock duration and avoid deadlocks. See handle_events for
//! the main event loop.

mod helpers;
mod modals;
mod navigation;

use crate::actions::AppAction;
use crate::api::ApiClient;
use crate::state::AppState;
use crate::tasks;
use crate::types::{ActiveView, InputMode};
use color_eyre::Result;
use crossterm::event::{self, Event, KeyCode};
use helpers::apply;
use ratatui::widgets::ListState;
use std::sync::{Arc, RwLock};

/// Event handler for managing user input and state updates
#[derive(Debug)]
pub struct EventHandler {
    pub should_quit: bool,
    pub selected_index: usize,
}

impl EventHandler {
    pub fn new() -> Self {
        Self {
            should_quit: false,
            selected_index: 0,
        }
    }

    /// Main event handling loop - dispatches to appropriate handlers based on input mode
    pub fn handle_events(
        &mut self,
        state: Arc<RwLock<AppState>>,
        list_state: &mut ListState,
        client: &Arc<ApiClient>,
    ) -> Result<()> {
        if event::poll(std::time::Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                let input_mode = state.read().unwrap().input_mode.clone();

                match input_mode {
                    InputMode::Login => {
                        if modals::handle_login_input(key, state.clone(), client)? {
                            self.should_quit = true;
                        }
                    }

                    InputMode::Uploading => {
                        modals::handle_upload_input(key, state.clone(), client)?;
                    }

                    InputMode::AddingSpecialization => {
                        modals::handle_add_specialization_input(key, state.clone(), client)?;
                    }

                    InputMode::ConfirmDelete { id, .. } => {
                        modals::handle_delete_confirmation(key, state.clone(), client, id)?;
                    }

                    InputMode::ConfirmLogout => {
                        modals::handle_logout_confirmation(key, state.clone(), client)?;
                    }

                    InputMode::Notice => {
                        modals::handle_notice(key, state.clone())?;
                    }

                    InputMode::Preview => {
                        modals::handle_preview(key, state.clone())?;
                    }

                    InputMode::Normal => match key.code {
                        // QUIT
                        KeyCode::Char('q') => {
                            self.should_quit = true;
                        }

                        // nav down
                        KeyCode::Char('j') | KeyCode::Down => {
                            navigation::handle_down(
                                &mut self.selected_index,
                                state.clone(),
                                list_state,
                            );
                        }

                        // nav up
                        KeyCode::Char('k') | KeyCode::Up => {
                            navigation::handle_up(
                                &mut self.selected_index,
                                state.clone(),
                                list_state,
                            );
                        }

                        // switch to summaries view (switching always reloads)
                        KeyCode::Char('1') => {
                            navigation::handle_switch_view(
                                &mut self.selected_index,
                                state.clone(),
                                list_state,
                                client,
                                ActiveView::Summaries,
                            );
                        }

                        // switch to specializations view
                        KeyCode::Char('2') => {
                            navigation::handle_switch_view(
                                &mut self.selected_index,
                                state.clone(),
                                list_state,
                                client,
                                ActiveView::Specializations,
                            );
                        }

                        // reload the visible view
                        KeyCode::Char('r') => {
                            navigation::handle_reload(state.clone(), client);
                        }

                        // preview the selected summary's document
                        KeyCode::Enter => {
                            let target = {
                                let s = state.read().unwrap();
                                if s.active_view == ActiveView::Summaries {
                                    s.get_selected_summary(self.selected_index).map(|sum| sum.id)
                                } else {
                                    None
                                }
                            };

                            if let Some(id) = target {
                                tasks::open_preview_background(state.clone(), client.clone(), id);
                            }
                        }

                        // download the selected summary's document
                        KeyCode::Char('o') => {
                            let target = {
                                let s = state.read().unwrap();
                                if s.active_view == ActiveView::Summaries {
                                    s.get_selected_summary(self.selected_index).map(|sum| sum.id)
                                } else {
                                    None
                                }
                            };

                            if let Some(id) = target {
                                tasks::download_background(state.clone(), client.clone(), id);
                            }
                        }

                        // delete the selected summary, after confirmation
                        KeyCode::Char('d') => {
                            let target = {
                                let s = state.read().unwrap();
                                if s.active_view == ActiveView::Summaries && s.pending_op.is_none()
                                {
                                    s.get_selected_summary(self.selected_index)
                                        .map(|sum| (sum.id, sum.name.clone()))
                                } else {
                                    None
                                }
                            };

                            if let Some((id, name)) = target {
                                apply(state.clone(), AppAction::EnterConfirmDelete { id, name });
                            }
                        }

                        // open the upload form, refreshing the picker silently
                        KeyCode::Char('u') => {
                            let allowed = {
                                let s = state.read().unwrap();
                                s.active_view == ActiveView::Summaries && s.pending_op.is_none()
                            };

                            if allowed {
                                apply(state.clone(), AppAction::EnterUploadMode);
                                tasks::refresh_picker_background(state.clone(), client.clone());
                            }
                        }

                        // open the add-specialization form
                        KeyCode::Char('a') => {
                            let allowed = {
                                let s = state.read().unwrap();
                                s.active_view == ActiveView::Specializations
                                    && s.pending_op.is_none()
                            };

                            if allowed {
                                apply(state.clone(), AppAction::EnterAddSpecializationMode);
                            }
                        }

                        // logout, after confirmation
                        KeyCode::Char('L') => {
                            apply(state.clone(), AppAction::EnterConfirmLogout);
                        }

                        _ => {}
                    },
                }
            }
        }
        Ok(())
    }
}
