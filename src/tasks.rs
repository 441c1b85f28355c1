use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use log::{debug, error};

use crate::api::types::FilePayload;
use crate::api::{self, ApiClient};
use crate::preview::{self, PreviewDoc};
use crate::state::AppState;
use crate::types::{InputMode, LoadingState, NoticeKind, PendingOp, Screen};

type SharedState = Arc<RwLock<AppState>>;

/// Spawns a background task to load the summaries list
pub fn load_summaries_background(state: SharedState, client: Arc<ApiClient>) {
    tokio::spawn(async move {
        load_summaries(&state, &client).await;
    });
}

/// Spawns a background task to load the specializations list
pub fn load_specializations_background(state: SharedState, client: Arc<ApiClient>) {
    tokio::spawn(async move {
        load_specializations(&state, &client).await;
    });
}

/// Spawns a silent refresh of the upload form's specialization picker.
/// Runs when the upload form opens so the choices are current.
pub fn refresh_picker_background(state: SharedState, client: Arc<ApiClient>) {
    tokio::spawn(async move {
        refresh_picker(&state, &client).await;
    });
}

/// Spawns the login call. On success the session moves to the dashboard
/// and the summaries view starts loading.
pub fn login_background(state: SharedState, client: Arc<ApiClient>, email: String, password: String) {
    if let Ok(mut s) = state.write() {
        s.pending_op = Some(PendingOp::Login);
    }

    tokio::spawn(async move {
        match api::summaries::login(&client, &email, &password).await {
            Ok(()) => {
                if let Ok(mut s) = state.write() {
                    s.pending_op = None;
                    s.screen = Screen::Dashboard;
                    s.input_mode = InputMode::Normal;
                    s.email_input.clear();
                    s.password_input.clear();
                }
                load_summaries(&state, &client).await;
            }
            Err(e) => {
                error!("login failed: {e}");
                if let Ok(mut s) = state.write() {
                    s.pending_op = None;
                    s.set_notice(format!("Login failed: {e}"), NoticeKind::Error);
                }
            }
        }
    });
}

/// Spawns the multipart upload. On success the form resets and both lists
/// refresh; on failure the form stays filled so the user can retry.
pub fn upload_background(
    state: SharedState,
    client: Arc<ApiClient>,
    name: String,
    specialization_id: i64,
    file_path: PathBuf,
) {
    if let Ok(mut s) = state.write() {
        s.pending_op = Some(PendingOp::Upload);
    }

    tokio::spawn(async move {
        match api::summaries::upload_summary(&client, &name, specialization_id, &file_path).await {
            Ok(reply) => {
                debug!("upload reply: {reply:?}");
                if let Ok(mut s) = state.write() {
                    s.pending_op = None;
                    s.reset_upload_form();
                    s.input_mode = InputMode::Normal;
                    s.set_notice("Summary uploaded successfully", NoticeKind::Info);
                }
                refresh_all(&state, &client).await;
            }
            Err(e) => {
                error!("upload failed: {e}");
                if let Ok(mut s) = state.write() {
                    s.pending_op = None;
                    s.set_notice(format!("Failed to upload summary: {e}"), NoticeKind::Error);
                }
            }
        }
    });
}

/// Spawns the delete call, refreshing both lists on success.
pub fn delete_background(state: SharedState, client: Arc<ApiClient>, id: i64) {
    if let Ok(mut s) = state.write() {
        s.pending_op = Some(PendingOp::Delete);
    }

    tokio::spawn(async move {
        match api::summaries::delete_summary(&client, id).await {
            Ok(()) => {
                if let Ok(mut s) = state.write() {
                    s.pending_op = None;
                    s.set_notice("Summary deleted successfully", NoticeKind::Info);
                }
                refresh_all(&state, &client).await;
            }
            Err(e) => {
                error!("delete failed: {e}");
                if let Ok(mut s) = state.write() {
                    s.pending_op = None;
                    s.set_notice(format!("Failed to delete summary: {e}"), NoticeKind::Error);
                }
            }
        }
    });
}

/// Spawns the add-specialization call, refreshing both lists on success.
pub fn add_specialization_background(state: SharedState, client: Arc<ApiClient>, name: String) {
    if let Ok(mut s) = state.write() {
        s.pending_op = Some(PendingOp::AddSpecialization);
    }

    tokio::spawn(async move {
        match api::summaries::add_specialization(&client, &name).await {
            Ok(spec) => {
                debug!("added specialization {} ({})", spec.name, spec.id);
                if let Ok(mut s) = state.write() {
                    s.pending_op = None;
                    s.specialization_name_input.clear();
                    s.input_mode = InputMode::Normal;
                    s.set_notice("Specialization added successfully", NoticeKind::Info);
                }
                refresh_all(&state, &client).await;
            }
            Err(e) => {
                error!("add specialization failed: {e}");
                if let Ok(mut s) = state.write() {
                    s.pending_op = None;
                    s.set_notice(format!("Failed to add specialization: {e}"), NoticeKind::Error);
                }
            }
        }
    });
}

/// Spawns the preview flow: fetch the record, resolve its file payload,
/// decode it, and open the preview modal over the materialized bytes.
pub fn open_preview_background(state: SharedState, client: Arc<ApiClient>, id: i64) {
    {
        // a second Enter while the first fetch runs must not stack
        let mut s = match state.write() {
            Ok(s) => s,
            Err(_) => return,
        };
        if s.preview_loading {
            return;
        }
        s.preview_loading = true;
    }

    tokio::spawn(async move {
        let outcome = match fetch_summary_file(&client, id).await {
            Ok((name, bytes)) => {
                PreviewDoc::create(&name, &bytes).map_err(|e| format!("Failed to prepare preview: {e}"))
            }
            Err(message) => Err(message),
        };

        if let Ok(mut s) = state.write() {
            s.preview_loading = false;
            match outcome {
                Ok(doc) => s.open_preview(doc),
                Err(message) => s.set_notice(message, NoticeKind::Error),
            }
        }
    });
}

/// Spawns a download of a summary's PDF into the current directory.
pub fn download_background(state: SharedState, client: Arc<ApiClient>, id: i64) {
    tokio::spawn(async move {
        let outcome = match fetch_summary_file(&client, id).await {
            Ok((name, bytes)) => {
                let file_name = download_file_name(&name);
                match tokio::fs::write(&file_name, &bytes).await {
                    Ok(()) => Ok(file_name),
                    Err(e) => Err(format!("Failed to save file: {e}")),
                }
            }
            Err(message) => Err(message),
        };

        if let Ok(mut s) = state.write() {
            match outcome {
                Ok(file_name) => {
                    s.set_notice(format!("Saved to ./{file_name}"), NoticeKind::Info)
                }
                Err(message) => s.set_notice(message, NoticeKind::Error),
            }
        }
    });
}

/// Fetch one summary and resolve its file payload to raw PDF bytes.
async fn fetch_summary_file(client: &ApiClient, id: i64) -> Result<(String, Vec<u8>), String> {
    let summary = match api::summaries::summary(client, id).await {
        Ok(Some(summary)) => summary,
        Ok(None) => return Err("Summary not found".to_string()),
        Err(e) => return Err(format!("Failed to load summary: {e}")),
    };

    let payload = match summary.file {
        Some(payload) => payload,
        None => return Err("No file available for this summary".to_string()),
    };

    let bytes = match payload {
        FilePayload::Base64(text) => preview::decode_base64_payload(&text)
            .map_err(|e| format!("Failed to load summary file: {e}"))?,
        FilePayload::Bytes(bytes) => bytes,
        FilePayload::Remote(url) => {
            if url::Url::parse(&url).is_err() {
                return Err(format!("Summary file URL is invalid: {url}"));
            }
            client
                .get_bytes(&url)
                .await
                .map_err(|e| format!("Failed to fetch summary file: {e}"))?
        }
    };

    Ok((summary.name, bytes))
}

/// File name for a downloaded summary: the display name with characters
/// that are unsafe in paths replaced, plus the `.pdf` extension.
fn download_file_name(summary_name: &str) -> String {
    let cleaned: String = summary_name
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let base = if cleaned.is_empty() {
        "summary".to_string()
    } else {
        cleaned
    };
    format!("{base}.pdf")
}

async fn load_summaries(state: &SharedState, client: &ApiClient) {
    if let Ok(mut s) = state.write() {
        s.summaries_loading = LoadingState::Loading;
    }

    match api::summaries::summaries(client).await {
        Ok(list) => {
            debug!("loaded {} summaries", list.len());
            if let Ok(mut s) = state.write() {
                s.summaries = list;
                s.summaries_loading = LoadingState::Complete;
            }
        }
        Err(e) => {
            error!("failed to load summaries: {e}");
            if let Ok(mut s) = state.write() {
                s.summaries_loading = LoadingState::Error(e.to_string());
            }
        }
    }

    // keep the upload form's picker in step with the list
    refresh_picker(state, client).await;
}

async fn load_specializations(state: &SharedState, client: &ApiClient) {
    if let Ok(mut s) = state.write() {
        s.specializations_loading = LoadingState::Loading;
    }

    match api::summaries::specializations(client).await {
        Ok(list) => {
            if let Ok(mut s) = state.write() {
                clamp_picker_choice(&mut s, list.len());
                s.specializations = list;
                s.specializations_loading = LoadingState::Complete;
            }
        }
        Err(e) => {
            error!("failed to load specializations: {e}");
            if let Ok(mut s) = state.write() {
                s.specializations_loading = LoadingState::Error(e.to_string());
            }
        }
    }
}

/// Refresh the specialization choices without touching the view's loading
/// state. A failure here only logs: the picker keeps its old choices.
async fn refresh_picker(state: &SharedState, client: &ApiClient) {
    match api::summaries::specializations(client).await {
        Ok(list) => {
            if let Ok(mut s) = state.write() {
                clamp_picker_choice(&mut s, list.len());
                s.specializations = list;
            }
        }
        Err(e) => {
            error!("failed to refresh specializations: {e}");
        }
    }
}

/// Reload both lists after a mutation. The two fetches run concurrently
/// and land in whatever order the server answers.
async fn refresh_all(state: &SharedState, client: &ApiClient) {
    tokio::join!(
        load_summaries(state, client),
        load_specializations(state, client),
    );
}

fn clamp_picker_choice(state: &mut AppState, len: usize) {
    if let Some(i) = state.upload_specialization {
        if i >= len {
            state.upload_specialization = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_download_file_name_keeps_plain_names() {
        assert_eq!(download_file_name("Anatomy I"), "Anatomy I.pdf");
    }

    #[test]
    fn test_download_file_name_replaces_path_characters() {
        assert_eq!(
            download_file_name("notes/2024: draft?"),
            "notes_2024_ draft_.pdf"
        );
    }

    #[test]
    fn test_download_file_name_never_empty() {
        assert_eq!(download_file_name("  "), "summary.pdf");
    }

    #[test]
    fn test_clamp_picker_choice_drops_stale_index() {
        let mut state = AppState::default();
        state.upload_specialization = Some(4);

        clamp_picker_choice(&mut state, 3);
        assert_eq!(state.upload_specialization, None);

        state.upload_specialization = Some(1);
        clamp_picker_choice(&mut state, 3);
        assert_eq!(state.upload_specialization, Some(1));
    }
}
