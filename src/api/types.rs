use serde::{Deserialize, Serialize};

/// Body for POST /Authentication/login.
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response. The token field is required for a usable session, but
/// deserialization tolerates its absence so the caller can raise a precise
/// error instead of a parse failure.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    #[serde(default, alias = "accessToken", alias = "access_token")]
    pub token: Option<String>,
}

/// Body for POST /Summary/specialization.
#[derive(Debug, Serialize)]
pub struct NewSpecialization {
    pub name: String,
}

/// A named category used to classify summaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Specialization {
    pub id: i64,
    pub name: String,
}

/// Canonical summary record used everywhere above the wire layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub id: i64,
    pub name: String,
    pub specialization: Option<Specialization>,
    pub file: Option<FilePayload>,
}

impl Summary {
    /// Specialization name for display, "N/A" when the record has none.
    pub fn specialization_label(&self) -> &str {
        self.specialization
            .as_ref()
            .map(|s| s.name.as_str())
            .unwrap_or("N/A")
    }
}

/// File bytes exactly as they arrived on the wire: either a base64 string
/// or a plain JSON array of bytes. Any other JSON type the backend puts in
/// a file field lands in the catch-all and is skipped by the probe, so one
/// drifted record cannot fail the whole list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FileField {
    Text(String),
    Bytes(Vec<u8>),
    Other(serde_json::Value),
}

/// Normalized file payload, resolved from whichever field the backend used.
#[derive(Debug, Clone, PartialEq)]
pub enum FilePayload {
    /// Base64-encoded PDF bytes. May contain stray CR/LF.
    Base64(String),
    /// Raw bytes serialized as a JSON array.
    Bytes(Vec<u8>),
    /// The backend stored the file elsewhere and returned its URL.
    Remote(String),
}

/// Wire shape of GET /Summary/{id} and the items of GET /summaries.
///
/// The backend's schema has drifted over time: the PDF payload has been
/// observed under `file`, `fileBase64`, `fileContent`, and as a bare
/// `fileUrl`/`url` pointing at remote storage, with PascalCase variants of
/// each. All candidates are captured here and collapsed by [`normalize`].
///
/// [`normalize`]: RawSummary::normalize
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSummary {
    #[serde(alias = "Id")]
    pub id: i64,
    #[serde(default, alias = "Name")]
    pub name: String,
    #[serde(default, alias = "Specialization")]
    pub specialization: Option<Specialization>,
    #[serde(default, alias = "File")]
    pub file: Option<FileField>,
    #[serde(default, alias = "FileBase64")]
    pub file_base64: Option<String>,
    #[serde(default, alias = "FileContent")]
    pub file_content: Option<FileField>,
    #[serde(default, alias = "FileUrl")]
    pub file_url: Option<String>,
    #[serde(default, alias = "Url")]
    pub url: Option<String>,
}

impl RawSummary {
    /// Collapse the drift-prone wire fields into the canonical record.
    ///
    /// Candidates are probed in a fixed priority order (`file`, then
    /// `fileBase64`, then `fileContent`, then `fileUrl`/`url`) and the
    /// first usable one wins. Empty text fields count as absent.
    pub fn normalize(self) -> Summary {
        let file = probe_file_payload(
            self.file,
            self.file_base64,
            self.file_content,
            self.file_url,
            self.url,
        );
        Summary {
            id: self.id,
            name: self.name,
            specialization: self.specialization,
            file,
        }
    }
}

fn probe_file_payload(
    file: Option<FileField>,
    file_base64: Option<String>,
    file_content: Option<FileField>,
    file_url: Option<String>,
    url: Option<String>,
) -> Option<FilePayload> {
    if let Some(payload) = file.and_then(usable_field) {
        return Some(payload);
    }
    if let Some(b64) = file_base64.filter(|s| !s.is_empty()) {
        return Some(FilePayload::Base64(b64));
    }
    if let Some(payload) = file_content.and_then(usable_field) {
        return Some(payload);
    }
    if let Some(remote) = file_url.or(url).filter(|s| !s.is_empty()) {
        return Some(FilePayload::Remote(remote));
    }
    None
}

fn usable_field(field: FileField) -> Option<FilePayload> {
    match field {
        FileField::Text(s) if s.is_empty() => None,
        FileField::Text(s) => Some(FilePayload::Base64(s)),
        FileField::Bytes(b) => Some(FilePayload::Bytes(b)),
        FileField::Other(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Summary {
        serde_json::from_str::<RawSummary>(json)
            .expect("raw summary should parse")
            .normalize()
    }

    #[test]
    fn test_normalize_base64_file_field() {
        let summary = parse(r#"{"id": 1, "name": "Anatomy I", "file": "JVBERi0xLjc="}"#);
        assert_eq!(summary.file, Some(FilePayload::Base64("JVBERi0xLjc=".into())));
    }

    #[test]
    fn test_normalize_byte_array_file_field() {
        let summary = parse(r#"{"id": 2, "name": "Histology", "file": [37, 80, 68, 70]}"#);
        assert_eq!(summary.file, Some(FilePayload::Bytes(vec![37, 80, 68, 70])));
    }

    #[test]
    fn test_normalize_falls_back_to_file_base64() {
        let summary = parse(r#"{"id": 3, "name": "Notes", "fileBase64": "QUJD"}"#);
        assert_eq!(summary.file, Some(FilePayload::Base64("QUJD".into())));
    }

    #[test]
    fn test_normalize_falls_back_to_file_content() {
        let summary = parse(r#"{"id": 4, "name": "Notes", "fileContent": [1, 2, 3]}"#);
        assert_eq!(summary.file, Some(FilePayload::Bytes(vec![1, 2, 3])));
    }

    #[test]
    fn test_normalize_falls_back_to_remote_url() {
        let summary = parse(r#"{"id": 5, "name": "Notes", "fileUrl": "http://files.example/5.pdf"}"#);
        assert_eq!(
            summary.file,
            Some(FilePayload::Remote("http://files.example/5.pdf".into()))
        );
    }

    #[test]
    fn test_normalize_prefers_file_over_later_candidates() {
        let summary = parse(
            r#"{"id": 6, "name": "Notes", "file": "QQ==", "fileBase64": "Qg==", "url": "http://x/y"}"#,
        );
        assert_eq!(summary.file, Some(FilePayload::Base64("QQ==".into())));
    }

    #[test]
    fn test_normalize_skips_empty_text_candidates() {
        let summary = parse(r#"{"id": 7, "name": "Notes", "file": "", "fileBase64": "QUJD"}"#);
        assert_eq!(summary.file, Some(FilePayload::Base64("QUJD".into())));
    }

    #[test]
    fn test_normalize_skips_unrecognized_file_values() {
        // a drifted backend may put any JSON type in a file field; the
        // record must still decode and later candidates must still win
        let summary = parse(r#"{"id": 12, "name": "Notes", "file": 123, "fileBase64": "QUJD"}"#);
        assert_eq!(summary.file, Some(FilePayload::Base64("QUJD".into())));

        let none = parse(r#"{"id": 13, "name": "Notes", "file": {"stored": true}}"#);
        assert_eq!(none.file, None);
    }

    #[test]
    fn test_normalize_without_any_payload() {
        let summary = parse(r#"{"id": 8, "name": "Notes"}"#);
        assert_eq!(summary.file, None);
    }

    #[test]
    fn test_normalize_accepts_pascal_case_fields() {
        let summary = parse(r#"{"Id": 9, "Name": "Notes", "FileBase64": "QUJD"}"#);
        assert_eq!(summary.id, 9);
        assert_eq!(summary.name, "Notes");
        assert_eq!(summary.file, Some(FilePayload::Base64("QUJD".into())));
    }

    #[test]
    fn test_specialization_label_defaults_to_na() {
        let with = parse(
            r#"{"id": 10, "name": "Notes", "specialization": {"id": 2, "name": "Cardiology"}}"#,
        );
        let without = parse(r#"{"id": 11, "name": "Notes", "specialization": null}"#);
        assert_eq!(with.specialization_label(), "Cardiology");
        assert_eq!(without.specialization_label(), "N/A");
    }

    #[test]
    fn test_login_response_token_aliases() {
        let direct: LoginResponse = serde_json::from_str(r#"{"token": "abc"}"#).unwrap();
        let access: LoginResponse = serde_json::from_str(r#"{"accessToken": "def"}"#).unwrap();
        let snake: LoginResponse = serde_json::from_str(r#"{"access_token": "ghi"}"#).unwrap();
        let missing: LoginResponse = serde_json::from_str(r#"{"expires": 3600}"#).unwrap();
        assert_eq!(direct.token.as_deref(), Some("abc"));
        assert_eq!(access.token.as_deref(), Some("def"));
        assert_eq!(snake.token.as_deref(), Some("ghi"));
        assert_eq!(missing.token, None);
    }
}
