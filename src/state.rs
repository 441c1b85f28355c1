use crate::api::types::{Specialization, Summary};
use crate::preview::PreviewDoc;
use crate::types::{
    ActiveView, InputMode, LoadingState, LoginField, Notice, NoticeKind, PendingOp, Screen,
    UploadField,
};

#[derive(Debug)]
pub struct AppState {
    pub screen: Screen,
    pub active_view: ActiveView,
    pub summaries: Vec<Summary>,
    pub specializations: Vec<Specialization>,
    pub summaries_loading: LoadingState,
    pub specializations_loading: LoadingState,
    pub input_mode: InputMode,
    pub email_input: String,
    pub password_input: String,
    /// track which login field is active
    pub active_login_field: LoginField,
    pub upload_name_input: String,
    pub upload_file_input: String,
    /// index into `specializations` chosen in the upload form; `None` is
    /// the "Select a Specialization" placeholder
    pub upload_specialization: Option<usize>,
    pub active_upload_field: UploadField,
    pub specialization_name_input: String,
    /// mutating call currently in flight
    pub pending_op: Option<PendingOp>,
    pub notice: Option<Notice>,
    /// open preview document; at most one exists at a time
    pub preview: Option<PreviewDoc>,
    /// preview fetch in flight, blocks a second open
    pub preview_loading: bool,
    /// flash shown briefly after yanking the preview path
    pub path_yanked: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            screen: Screen::Login,
            active_view: ActiveView::Summaries,
            summaries: Vec::new(),
            specializations: Vec::new(),
            summaries_loading: LoadingState::Idle,
            specializations_loading: LoadingState::Idle,
            input_mode: InputMode::Login,
            email_input: String::new(),
            password_input: String::new(),
            active_login_field: LoginField::Email,
            upload_name_input: String::new(),
            upload_file_input: String::new(),
            upload_specialization: None,
            active_upload_field: UploadField::Name,
            specialization_name_input: String::new(),
            pending_op: None,
            notice: None,
            preview: None,
            preview_loading: false,
            path_yanked: false,
        }
    }
}

impl AppState {
    /// Raise the blocking notice modal, remembering the mode to return to
    /// on dismiss. A notice raised over another notice keeps the original
    /// return mode.
    pub fn set_notice(&mut self, text: impl Into<String>, kind: NoticeKind) {
        let return_mode = match &self.notice {
            Some(existing) if self.input_mode == InputMode::Notice => {
                existing.return_mode.clone()
            }
            _ => self.input_mode.clone(),
        };
        self.notice = Some(Notice {
            text: text.into(),
            kind,
            return_mode,
        });
        self.input_mode = InputMode::Notice;
    }

    /// Dismiss the notice and restore the mode it covered.
    pub fn dismiss_notice(&mut self) {
        if let Some(notice) = self.notice.take() {
            self.input_mode = notice.return_mode;
        } else {
            self.input_mode = match self.screen {
                Screen::Login => InputMode::Login,
                Screen::Dashboard => InputMode::Normal,
            };
        }
    }

    /// Install a new preview document, removing any prior one first so at
    /// most one temp file is alive.
    pub fn open_preview(&mut self, doc: PreviewDoc) {
        self.close_preview();
        self.preview = Some(doc);
        self.path_yanked = false;
        self.input_mode = InputMode::Preview;
    }

    /// Close the preview modal and remove its temp file.
    pub fn close_preview(&mut self) {
        if let Some(mut doc) = self.preview.take() {
            doc.close();
        }
        self.path_yanked = false;
        if self.input_mode == InputMode::Preview {
            self.input_mode = InputMode::Normal;
        }
    }

    /// Summary at the given list position, if any.
    pub fn get_selected_summary(&self, index: usize) -> Option<&Summary> {
        self.summaries.get(index)
    }

    /// Clear the upload form after a successful submit.
    pub fn reset_upload_form(&mut self) {
        self.upload_name_input.clear();
        self.upload_file_input.clear();
        self.upload_specialization = None;
        self.active_upload_field = UploadField::Name;
    }

    /// Return to the login screen, dropping everything the session loaded.
    pub fn end_session(&mut self) {
        self.close_preview();
        self.screen = Screen::Login;
        self.input_mode = InputMode::Login;
        self.active_login_field = LoginField::Email;
        self.summaries.clear();
        self.specializations.clear();
        self.summaries_loading = LoadingState::Idle;
        self.specializations_loading = LoadingState::Idle;
        self.upload_specialization = None;
    }
}

/// Helper function to count selectable rows in the active view
pub fn count_visible_rows(state: &AppState) -> usize {
    match state.active_view {
        ActiveView::Summaries => state.summaries.len(),
        ActiveView::Specializations => state.specializations.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_notice_captures_and_restores_mode() {
        let mut state = AppState {
            screen: Screen::Dashboard,
            input_mode: InputMode::Uploading,
            ..AppState::default()
        };

        state.set_notice("Please fill all fields", NoticeKind::Error);
        assert_eq!(state.input_mode, InputMode::Notice);

        state.dismiss_notice();
        assert_eq!(state.input_mode, InputMode::Uploading);
        assert!(state.notice.is_none());
    }

    #[test]
    fn test_stacked_notice_keeps_original_return_mode() {
        let mut state = AppState {
            screen: Screen::Dashboard,
            input_mode: InputMode::Normal,
            ..AppState::default()
        };

        state.set_notice("first", NoticeKind::Info);
        state.set_notice("second", NoticeKind::Error);
        state.dismiss_notice();
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_open_preview_replaces_prior_document() {
        let mut state = AppState::default();
        let first = PreviewDoc::create("first", b"%PDF-1.4").unwrap();
        let second = PreviewDoc::create("second", b"%PDF-1.7").unwrap();

        state.open_preview(first);
        let first_path = state.preview.as_ref().unwrap().path().unwrap().to_path_buf();

        state.open_preview(second);
        assert!(!first_path.exists());
        assert_eq!(state.preview.as_ref().unwrap().summary_name(), "second");

        state.close_preview();
        assert!(state.preview.is_none());
    }

    #[test]
    fn test_close_preview_without_document_is_noop() {
        let mut state = AppState {
            screen: Screen::Dashboard,
            input_mode: InputMode::Normal,
            ..AppState::default()
        };
        state.close_preview();
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_end_session_drops_loaded_data() {
        let mut state = AppState {
            screen: Screen::Dashboard,
            input_mode: InputMode::Normal,
            ..AppState::default()
        };
        state.specializations.push(crate::api::types::Specialization {
            id: 1,
            name: "Cardiology".into(),
        });
        state.upload_specialization = Some(0);

        state.end_session();
        assert_eq!(state.screen, Screen::Login);
        assert_eq!(state.input_mode, InputMode::Login);
        assert!(state.specializations.is_empty());
        assert_eq!(state.upload_specialization, None);
    }

    #[test]
    fn test_count_visible_rows_follows_active_view() {
        let mut state = AppState::default();
        state.specializations.push(crate::api::types::Specialization {
            id: 1,
            name: "Cardiology".into(),
        });

        state.active_view = ActiveView::Summaries;
        assert_eq!(count_visible_rows(&state), 0);

        state.active_view = ActiveView::Specializations;
        assert_eq!(count_visible_rows(&state), 1);
    }
}
