use crate::api::ApiClient;
use crate::config::Config;
use crate::session::TokenStore;
use crate::state::{count_visible_rows, AppState};
use crate::tasks;
use crate::types::{ActiveView, InputMode, Screen};
use crate::ui;
use crate::ui::draw;
use color_eyre::Result;
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Direction, Layout},
    widgets::ListState,
};
use std::sync::{Arc, RwLock};
use std::time::Instant;

#[derive(Debug)]
pub struct App {
    state: Arc<RwLock<AppState>>,
    client: Arc<ApiClient>,
    list_state: ListState,
    spinner_index: usize,
    last_tick: Instant,
    event_handler: ui::EventHandler,
}

impl App {
    pub fn new() -> Result<Self> {
        let mut list_state = ListState::default();
        list_state.select(None);

        // Load config and the persisted session token
        let config = Config::load()?;
        let store = TokenStore::open_default()?;
        let client = Arc::new(ApiClient::new(&config.server.base_url, store));

        // A restored token skips the login form
        let state = if client.is_authenticated() {
            AppState {
                screen: Screen::Dashboard,
                input_mode: InputMode::Normal,
                ..AppState::default()
            }
        } else {
            AppState::default()
        };

        Ok(Self {
            state: Arc::new(RwLock::new(state)),
            client,
            list_state,
            spinner_index: 0,
            last_tick: Instant::now(),
            event_handler: ui::EventHandler::new(),
        })
    }

    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        // A restored session starts loading straight away; a fresh one waits
        // for the login to land on the dashboard
        if self.state.read().unwrap().screen == Screen::Dashboard {
            tasks::load_summaries_background(Arc::clone(&self.state), Arc::clone(&self.client));
        }

        // Main UI loop
        while !self.event_handler.should_quit {
            // Update spinner animation
            if self.last_tick.elapsed().as_millis() > 100 {
                self.spinner_index = (self.spinner_index + 1) % 4;
                self.last_tick = Instant::now();
            }

            terminal.draw(|frame| self.draw(frame))?;

            let state = Arc::clone(&self.state);
            self.event_handler
                .handle_events(state, &mut self.list_state, &self.client)?;
        }

        // Drop any open preview so its temp file is removed before exit
        if let Ok(mut s) = self.state.write() {
            s.close_preview();
        }

        Ok(())
    }

    fn draw(&mut self, frame: &mut Frame) {
        let state = self.state.read().unwrap();

        if state.screen == Screen::Login {
            // Login screen: the form centered over a blank background
            draw::render_login_modal(frame, &state, self.client.base_url());

            if let Some(notice) = &state.notice {
                if state.input_mode == InputMode::Notice {
                    draw::render_notice_modal(frame, &notice.text, notice.kind);
                }
            }
            return;
        }

        // Create main layout: Header, Body, Footer
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Body
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        // Keep the selection inside the visible rows; lists shrink after
        // deletes and reloads
        let rows = count_visible_rows(&state);
        if rows == 0 {
            self.event_handler.selected_index = 0;
            self.list_state.select(None);
        } else {
            if self.event_handler.selected_index >= rows {
                self.event_handler.selected_index = rows - 1;
            }
            self.list_state
                .select(Some(self.event_handler.selected_index));
        }

        let token = self.client.token();
        ui::render_header(
            frame,
            main_chunks[0],
            self.client.base_url(),
            &state,
            token.as_deref(),
        );

        match state.active_view {
            ActiveView::Summaries => {
                ui::render_summaries_panel(
                    frame,
                    main_chunks[1],
                    &state,
                    self.spinner_index,
                    &mut self.list_state,
                );
            }
            ActiveView::Specializations => {
                ui::render_specializations_panel(
                    frame,
                    main_chunks[1],
                    &state,
                    self.spinner_index,
                    &mut self.list_state,
                );
            }
        }

        ui::render_footer(frame, main_chunks[2], &state.active_view);

        // Render modals LAST - after everything else
        match &state.input_mode {
            InputMode::Uploading => {
                draw::render_upload_modal(frame, &state);
            }
            InputMode::AddingSpecialization => {
                draw::render_add_specialization_modal(frame, &state);
            }
            InputMode::ConfirmDelete { name, .. } => {
                draw::render_delete_confirmation_modal(frame, name);
            }
            InputMode::ConfirmLogout => {
                draw::render_logout_confirmation_modal(frame);
            }
            InputMode::Preview => {
                draw::render_preview_modal(frame, &state);
            }
            InputMode::Notice => {
                if let Some(notice) = &state.notice {
                    // Keep the covered form visible under the notice
                    match &notice.return_mode {
                        InputMode::Uploading => draw::render_upload_modal(frame, &state),
                        InputMode::AddingSpecialization => {
                            draw::render_add_specialization_modal(frame, &state)
                        }
                        _ => {}
                    }
                    draw::render_notice_modal(frame, &notice.text, notice.kind);
                }
            }
            InputMode::Normal | InputMode::Login => {}
        }
    }
}
