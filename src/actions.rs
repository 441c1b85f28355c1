use crate::state::AppState;
use crate::types::{ActiveView, InputMode, LoginField, UploadField};

/// Represents all possible state-changing actions in the application
/// This pattern separates input handling from state mutations, making the code
/// more testable
#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    // Navigation actions
    SwitchView(ActiveView),

    // Input mode actions
    EnterUploadMode,
    ExitUploadMode,
    EnterAddSpecializationMode,
    ExitAddSpecializationMode,
    EnterConfirmDelete { id: i64, name: String },
    EnterConfirmLogout,
    ExitConfirm,
    DismissNotice,
    ClosePreview,
    Logout,
    SetActiveLoginField(LoginField),
    SetActiveUploadField(UploadField),

    // Text input actions (for the forms)
    AppendToEmailInput(String),
    AppendToPasswordInput(String),
    AppendToUploadNameInput(String),
    AppendToUploadFileInput(String),
    AppendToSpecializationNameInput(String),
    BackspaceEmailInput,
    BackspacePasswordInput,
    BackspaceUploadNameInput,
    BackspaceUploadFileInput,
    BackspaceSpecializationNameInput,
    ClearEmailInput,
    ClearPasswordInput,
    ClearUploadNameInput,
    ClearUploadFileInput,
    ClearSpecializationNameInput,
    DeleteWordEmailInput,
    DeleteWordUploadNameInput,
    DeleteWordUploadFileInput,
    DeleteWordSpecializationNameInput,

    // Specialization picker in the upload form
    NextSpecializationChoice,
    PrevSpecializationChoice,
}

/// Apply an action to the application state
/// This is a pure state transformation function that mutates AppState based on the action
/// All state mutations should go through this function to maintain consistency
pub fn apply_action(action: AppAction, state: &mut AppState) {
    match action {
        // Navigation
        AppAction::SwitchView(view) => {
            state.active_view = view;
        }

        // Input modes
        AppAction::EnterUploadMode => {
            state.input_mode = InputMode::Uploading;
            state.active_upload_field = UploadField::Name;
        }
        AppAction::ExitUploadMode => {
            // keep typed values so a cancelled upload can resume
            state.input_mode = InputMode::Normal;
        }
        AppAction::EnterAddSpecializationMode => {
            state.input_mode = InputMode::AddingSpecialization;
            state.specialization_name_input.clear();
        }
        AppAction::ExitAddSpecializationMode => {
            state.input_mode = InputMode::Normal;
            state.specialization_name_input.clear();
        }
        AppAction::EnterConfirmDelete { id, name } => {
            state.input_mode = InputMode::ConfirmDelete { id, name };
        }
        AppAction::EnterConfirmLogout => {
            state.input_mode = InputMode::ConfirmLogout;
        }
        AppAction::ExitConfirm => {
            state.input_mode = InputMode::Normal;
        }
        AppAction::DismissNotice => {
            state.dismiss_notice();
        }
        AppAction::ClosePreview => {
            state.close_preview();
        }
        AppAction::Logout => {
            state.end_session();
        }
        AppAction::SetActiveLoginField(field) => {
            state.active_login_field = field;
        }
        AppAction::SetActiveUploadField(field) => {
            state.active_upload_field = field;
        }

        // Text input for the forms
        AppAction::AppendToEmailInput(text) => {
            state.email_input.push_str(&text);
        }
        AppAction::AppendToPasswordInput(text) => {
            state.password_input.push_str(&text);
        }
        AppAction::AppendToUploadNameInput(text) => {
            state.upload_name_input.push_str(&text);
        }
        AppAction::AppendToUploadFileInput(text) => {
            state.upload_file_input.push_str(&text);
        }
        AppAction::AppendToSpecializationNameInput(text) => {
            state.specialization_name_input.push_str(&text);
        }
        AppAction::BackspaceEmailInput => {
            state.email_input.pop();
        }
        AppAction::BackspacePasswordInput => {
            state.password_input.pop();
        }
        AppAction::BackspaceUploadNameInput => {
            state.upload_name_input.pop();
        }
        AppAction::BackspaceUploadFileInput => {
            state.upload_file_input.pop();
        }
        AppAction::BackspaceSpecializationNameInput => {
            state.specialization_name_input.pop();
        }
        AppAction::ClearEmailInput => {
            state.email_input.clear();
        }
        AppAction::ClearPasswordInput => {
            state.password_input.clear();
        }
        AppAction::ClearUploadNameInput => {
            state.upload_name_input.clear();
        }
        AppAction::ClearUploadFileInput => {
            state.upload_file_input.clear();
        }
        AppAction::ClearSpecializationNameInput => {
            state.specialization_name_input.clear();
        }
        AppAction::DeleteWordEmailInput => {
            delete_word(&mut state.email_input);
        }
        AppAction::DeleteWordUploadNameInput => {
            delete_word(&mut state.upload_name_input);
        }
        AppAction::DeleteWordUploadFileInput => {
            delete_word(&mut state.upload_file_input);
        }
        AppAction::DeleteWordSpecializationNameInput => {
            delete_word(&mut state.specialization_name_input);
        }

        // Specialization picker
        AppAction::NextSpecializationChoice => {
            if state.specializations.is_empty() {
                state.upload_specialization = None;
            } else {
                let last = state.specializations.len() - 1;
                state.upload_specialization = Some(match state.upload_specialization {
                    Some(i) => (i + 1).min(last),
                    None => 0,
                });
            }
        }
        AppAction::PrevSpecializationChoice => {
            state.upload_specialization = match state.upload_specialization {
                Some(0) | None => None, // back to the placeholder
                Some(i) => Some(i - 1),
            };
        }
    }
}

/// Helper function to delete the last word from a string (Ctrl+W behavior)
fn delete_word(s: &mut String) {
    // Trim trailing whitespace first
    *s = s.trim_end().to_string();

    // Find last whitespace and truncate there
    if let Some(pos) = s.rfind(char::is_whitespace) {
        s.truncate(pos);
    } else {
        // No whitespace found, clear entire string
        s.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::Specialization;
    use crate::types::Screen;

    fn create_test_state() -> AppState {
        AppState {
            screen: Screen::Dashboard,
            input_mode: InputMode::Normal,
            ..AppState::default()
        }
    }

    fn with_specializations(count: i64) -> AppState {
        let mut state = create_test_state();
        state.specializations = (1..=count)
            .map(|id| Specialization {
                id,
                name: format!("spec {id}"),
            })
            .collect();
        state
    }

    #[test]
    fn test_switch_view() {
        let mut state = create_test_state();
        assert_eq!(state.active_view, ActiveView::Summaries);

        apply_action(AppAction::SwitchView(ActiveView::Specializations), &mut state);
        assert_eq!(state.active_view, ActiveView::Specializations);
    }

    #[test]
    fn test_upload_mode_keeps_typed_values_on_exit() {
        let mut state = create_test_state();
        apply_action(AppAction::EnterUploadMode, &mut state);
        assert_eq!(state.input_mode, InputMode::Uploading);

        apply_action(
            AppAction::AppendToUploadNameInput("Anatomy I".to_string()),
            &mut state,
        );
        apply_action(AppAction::ExitUploadMode, &mut state);

        assert_eq!(state.input_mode, InputMode::Normal);
        assert_eq!(state.upload_name_input, "Anatomy I");
    }

    #[test]
    fn test_add_specialization_mode_clears_input_on_enter() {
        let mut state = create_test_state();
        state.specialization_name_input = "stale".to_string();

        apply_action(AppAction::EnterAddSpecializationMode, &mut state);
        assert_eq!(state.input_mode, InputMode::AddingSpecialization);
        assert_eq!(state.specialization_name_input, "");
    }

    #[test]
    fn test_confirm_delete_carries_target() {
        let mut state = create_test_state();
        apply_action(
            AppAction::EnterConfirmDelete {
                id: 7,
                name: "Histology".to_string(),
            },
            &mut state,
        );
        assert_eq!(
            state.input_mode,
            InputMode::ConfirmDelete {
                id: 7,
                name: "Histology".to_string()
            }
        );

        apply_action(AppAction::ExitConfirm, &mut state);
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_text_input_actions() {
        let mut state = create_test_state();

        apply_action(
            AppAction::AppendToEmailInput("admin@".to_string()),
            &mut state,
        );
        apply_action(
            AppAction::AppendToEmailInput("example.com".to_string()),
            &mut state,
        );
        assert_eq!(state.email_input, "admin@example.com");

        apply_action(AppAction::BackspaceEmailInput, &mut state);
        assert_eq!(state.email_input, "admin@example.co");

        apply_action(AppAction::ClearEmailInput, &mut state);
        assert_eq!(state.email_input, "");
    }

    #[test]
    fn test_delete_word() {
        let mut s = "hello world foo".to_string();
        delete_word(&mut s);
        assert_eq!(s, "hello world");

        delete_word(&mut s);
        assert_eq!(s, "hello");

        delete_word(&mut s);
        assert_eq!(s, "");

        delete_word(&mut s);
        assert_eq!(s, "");
    }

    #[test]
    fn test_specialization_choice_starts_at_first() {
        let mut state = with_specializations(3);
        assert_eq!(state.upload_specialization, None);

        apply_action(AppAction::NextSpecializationChoice, &mut state);
        assert_eq!(state.upload_specialization, Some(0));
    }

    #[test]
    fn test_specialization_choice_clamps_at_last() {
        let mut state = with_specializations(2);
        state.upload_specialization = Some(1);

        apply_action(AppAction::NextSpecializationChoice, &mut state);
        assert_eq!(state.upload_specialization, Some(1));
    }

    #[test]
    fn test_specialization_choice_returns_to_placeholder() {
        let mut state = with_specializations(2);
        state.upload_specialization = Some(1);

        apply_action(AppAction::PrevSpecializationChoice, &mut state);
        assert_eq!(state.upload_specialization, Some(0));

        apply_action(AppAction::PrevSpecializationChoice, &mut state);
        assert_eq!(state.upload_specialization, None);

        apply_action(AppAction::PrevSpecializationChoice, &mut state);
        assert_eq!(state.upload_specialization, None);
    }

    #[test]
    fn test_specialization_choice_with_empty_list() {
        let mut state = create_test_state();
        apply_action(AppAction::NextSpecializationChoice, &mut state);
        assert_eq!(state.upload_specialization, None);
    }

    #[test]
    fn test_logout_returns_to_login_screen() {
        let mut state = with_specializations(1);
        apply_action(AppAction::Logout, &mut state);
        assert_eq!(state.screen, Screen::Login);
        assert_eq!(state.input_mode, InputMode::Login);
        assert!(state.specializations.is_empty());
    }
}
