use std::path::Path;

use log::{debug, info, warn};
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;

use super::client::ApiClient;
use super::error::ApiError;
use super::types::{
    LoginRequest, LoginResponse, NewSpecialization, RawSummary, Specialization, Summary,
};

/// POST /Authentication/login.
///
/// On success the token is stored on the client (memory and disk) so every
/// later call carries it. A 2xx response without a token is still a
/// failure.
pub async fn login(client: &ApiClient, email: &str, password: &str) -> Result<(), ApiError> {
    debug!("login attempt for {email}");
    let body = LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
    };
    let resp = client.post_json("/Authentication/login", &body).await?;

    let status = resp.status();
    let text = resp.text().await?;
    if !status.is_success() {
        return Err(ApiError::http(status.as_u16(), &text));
    }

    let parsed: LoginResponse = serde_json::from_str(&text)?;
    match parsed.token {
        Some(token) if !token.is_empty() => {
            client.set_token(token);
            info!("login succeeded for {email}");
            Ok(())
        }
        _ => Err(ApiError::MissingToken),
    }
}

/// GET /summaries, normalized into canonical records.
pub async fn summaries(client: &ApiClient) -> Result<Vec<Summary>, ApiError> {
    let resp = client.get("/summaries").await?;
    let status = resp.status();
    let text = resp.text().await?;
    if !status.is_success() {
        return Err(ApiError::http(status.as_u16(), &text));
    }
    let raw: Vec<RawSummary> = serde_json::from_str(&text)?;
    debug!("fetched {} summaries", raw.len());
    Ok(raw.into_iter().map(RawSummary::normalize).collect())
}

/// GET /Summary/{id}. A 404 means the record is absent, not that the call
/// failed.
pub async fn summary(client: &ApiClient, id: i64) -> Result<Option<Summary>, ApiError> {
    let resp = client.get(&format!("/Summary/{id}")).await?;
    let status = resp.status();
    if status == StatusCode::NOT_FOUND {
        debug!("summary {id} not found");
        return Ok(None);
    }
    let text = resp.text().await?;
    if !status.is_success() {
        return Err(ApiError::http(status.as_u16(), &text));
    }
    let raw: RawSummary = serde_json::from_str(&text)?;
    Ok(Some(raw.normalize()))
}

/// What POST /Summary/upload answered with on success. The backend is not
/// consistent here: sometimes a JSON document, sometimes a bare string.
#[derive(Debug, Clone, PartialEq)]
pub enum UploadReply {
    Json(serde_json::Value),
    Text(String),
}

/// POST /Summary/upload as a multipart form with `name`,
/// `specializationId`, and `file` parts. The file part carries the original
/// file name and a fixed PDF MIME type.
pub async fn upload_summary(
    client: &ApiClient,
    name: &str,
    specialization_id: i64,
    file_path: &Path,
) -> Result<UploadReply, ApiError> {
    let file_name = file_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "summary.pdf".to_string());
    let bytes = tokio::fs::read(file_path).await?;
    debug!("uploading {file_name} ({} bytes) as '{name}'", bytes.len());

    let part = Part::bytes(bytes)
        .file_name(file_name)
        .mime_str("application/pdf")?;
    let form = Form::new()
        .text("name", name.to_string())
        .text("specializationId", specialization_id.to_string())
        .part("file", part);

    let resp = client.post_multipart("/Summary/upload", form).await?;
    let status = resp.status();
    let is_json = resp
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.contains("application/json"))
        .unwrap_or(false);
    let text = resp.text().await?;

    if !status.is_success() {
        return Err(ApiError::http(status.as_u16(), &text));
    }
    info!("uploaded summary '{name}'");
    Ok(interpret_upload_body(is_json, text))
}

/// Interpret the upload response body by its declared content type, falling
/// back to raw text when a declared-JSON body does not actually parse.
fn interpret_upload_body(is_json: bool, text: String) -> UploadReply {
    if is_json {
        match serde_json::from_str(&text) {
            Ok(value) => UploadReply::Json(value),
            Err(e) => {
                warn!("upload reply declared JSON but did not parse: {e}");
                UploadReply::Text(text)
            }
        }
    } else {
        UploadReply::Text(text)
    }
}

/// DELETE /Summary/{id}.
pub async fn delete_summary(client: &ApiClient, id: i64) -> Result<(), ApiError> {
    let resp = client.delete(&format!("/Summary/{id}")).await?;
    let status = resp.status();
    if !status.is_success() {
        let text = resp.text().await.unwrap_or_default();
        return Err(ApiError::http(status.as_u16(), &text));
    }
    info!("deleted summary {id}");
    Ok(())
}

/// GET /Summary/specializations.
pub async fn specializations(client: &ApiClient) -> Result<Vec<Specialization>, ApiError> {
    let resp = client.get("/Summary/specializations").await?;
    let status = resp.status();
    let text = resp.text().await?;
    if !status.is_success() {
        return Err(ApiError::http(status.as_u16(), &text));
    }
    Ok(serde_json::from_str(&text)?)
}

/// POST /Summary/specialization. Requires a held token: fails before any
/// network traffic when there is none.
pub async fn add_specialization(
    client: &ApiClient,
    name: &str,
) -> Result<Specialization, ApiError> {
    if !client.is_authenticated() {
        return Err(ApiError::NotAuthenticated);
    }
    let body = NewSpecialization {
        name: name.to_string(),
    };
    let resp = client.post_json("/Summary/specialization", &body).await?;
    let status = resp.status();
    let text = resp.text().await?;
    if !status.is_success() {
        return Err(ApiError::http(status.as_u16(), &text));
    }
    info!("added specialization '{name}'");
    Ok(serde_json::from_str(&text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::TokenStore;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};
    use tempfile::TempDir;

    /// Serve one canned JSON response per connection, capturing each raw
    /// request for assertions. Stands in for the backend so the wire tests
    /// need no extra dependencies.
    fn canned_json_server(
        listener: TcpListener,
        bodies: Vec<&'static str>,
    ) -> JoinHandle<Vec<String>> {
        thread::spawn(move || {
            let mut requests = Vec::new();
            for body in bodies {
                let (mut stream, _) = listener.accept().unwrap();

                let mut raw = Vec::new();
                let mut buf = [0u8; 1024];
                loop {
                    let n = stream.read(&mut buf).unwrap();
                    raw.extend_from_slice(&buf[..n]);
                    if let Some(end) = raw.windows(4).position(|w| w == b"\r\n\r\n") {
                        if raw.len() >= end + 4 + declared_body_length(&raw[..end]) {
                            break;
                        }
                    }
                    if n == 0 {
                        break;
                    }
                }
                requests.push(String::from_utf8_lossy(&raw).into_owned());

                let response = format!(
                    "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                    body.len()
                );
                stream.write_all(response.as_bytes()).unwrap();
            }
            requests
        })
    }

    fn declared_body_length(headers: &[u8]) -> usize {
        String::from_utf8_lossy(headers)
            .lines()
            .filter_map(|line| line.split_once(':'))
            .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
            .and_then(|(_, value)| value.trim().parse().ok())
            .unwrap_or(0)
    }

    #[tokio::test]
    async fn test_login_stores_token_and_authorizes_later_calls() {
        let dir = TempDir::new().unwrap();
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let server = canned_json_server(listener, vec![r#"{"token":"tok-1234567890"}"#, "[]"]);

        let client = ApiClient::new(&base_url, TokenStore::at_dir(dir.path()));
        login(&client, "admin@example.com", "hunter2").await.unwrap();
        assert_eq!(client.token().as_deref(), Some("tok-1234567890"));
        assert_eq!(
            TokenStore::at_dir(dir.path()).load().unwrap().as_deref(),
            Some("tok-1234567890")
        );

        // The next call must carry the token login just stored
        let list = summaries(&client).await.unwrap();
        assert!(list.is_empty());

        let requests = server.join().unwrap();
        assert!(requests[0].starts_with("POST /Authentication/login"));
        assert!(requests[1]
            .to_lowercase()
            .contains("authorization: bearer tok-1234567890"));
    }

    #[tokio::test]
    async fn test_login_reply_without_token_keeps_prior_token() {
        let dir = TempDir::new().unwrap();
        let store = TokenStore::at_dir(dir.path());
        store.save("prior-token-1234567890").unwrap();

        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let server = canned_json_server(listener, vec!["{}"]);

        let client = ApiClient::new(&base_url, store);
        let err = login(&client, "admin@example.com", "hunter2")
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::MissingToken));
        assert_eq!(client.token().as_deref(), Some("prior-token-1234567890"));
        assert_eq!(
            TokenStore::at_dir(dir.path()).load().unwrap().as_deref(),
            Some("prior-token-1234567890")
        );
        server.join().unwrap();
    }

    #[tokio::test]
    async fn test_add_specialization_fails_fast_without_token() {
        let dir = TempDir::new().unwrap();
        // A port nothing listens on: if the guard ever regresses this test
        // fails with a network error instead of NotAuthenticated.
        let client = ApiClient::new("http://127.0.0.1:9/api", TokenStore::at_dir(dir.path()));

        let err = add_specialization(&client, "Cardiology").await.unwrap_err();
        assert!(matches!(err, ApiError::NotAuthenticated));
    }

    #[test]
    fn test_interpret_upload_body_parses_declared_json() {
        let reply = interpret_upload_body(true, r#"{"id": 7}"#.to_string());
        assert_eq!(reply, UploadReply::Json(serde_json::json!({"id": 7})));
    }

    #[test]
    fn test_interpret_upload_body_keeps_text_when_json_lies() {
        let reply = interpret_upload_body(true, "Summary Uploaded Successfully".to_string());
        assert_eq!(
            reply,
            UploadReply::Text("Summary Uploaded Successfully".to_string())
        );
    }

    #[test]
    fn test_interpret_upload_body_plain_text() {
        let reply = interpret_upload_body(false, "ok".to_string());
        assert_eq!(reply, UploadReply::Text("ok".to_string()));
    }
}
