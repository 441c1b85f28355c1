//! Navigation handlers
//!
//! This module handles navigation through the dashboard:
//! - List navigation (up/down in the visible list)
//! - View switching (summaries <-> specializations)
//! - Reloading the visible view

use super::helpers::apply;
use crate::actions::AppAction;
use crate::api::ApiClient;
use crate::state::{count_visible_rows, AppState};
use crate::tasks;
use crate::types::ActiveView;
use log::debug;
use ratatui::widgets::ListState;
use std::sync::{Arc, RwLock};

/// Navigate up in the visible list
pub fn handle_up(
    selected_index: &mut usize,
    _state: Arc<RwLock<AppState>>,
    list_state: &mut ListState,
) {
    if *selected_index > 0 {
        *selected_index -= 1;
        list_state.select(Some(*selected_index));
    }
}

/// Navigate down in the visible list
pub fn handle_down(
    selected_index: &mut usize,
    state: Arc<RwLock<AppState>>,
    list_state: &mut ListState,
) {
    let state_guard = state.read().unwrap();
    let max_index = count_visible_rows(&state_guard).saturating_sub(1);
    drop(state_guard);

    if *selected_index < max_index {
        *selected_index += 1;
        list_state.select(Some(*selected_index));
    }
}

/// Switch to a view and reload it. A view reloads every time it is shown,
/// including when it is already the visible one.
pub fn handle_switch_view(
    selected_index: &mut usize,
    state: Arc<RwLock<AppState>>,
    list_state: &mut ListState,
    client: &Arc<ApiClient>,
    view: ActiveView,
) {
    apply(state.clone(), AppAction::SwitchView(view));

    // Reset selection to top
    *selected_index = 0;
    list_state.select(Some(0));

    debug!("switched to {view:?} view");

    match view {
        ActiveView::Summaries => tasks::load_summaries_background(state, client.clone()),
        ActiveView::Specializations => {
            tasks::load_specializations_background(state, client.clone())
        }
    }
}

/// Reload whichever view is visible
pub fn handle_reload(state: Arc<RwLock<AppState>>, client: &Arc<ApiClient>) {
    let view = state.read().unwrap().active_view;

    match view {
        ActiveView::Summaries => tasks::load_summaries_background(state, client.clone()),
        ActiveView::Specializations => {
            tasks::load_specializations_background(state, client.clone())
        }
    }
}
