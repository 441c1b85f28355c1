use thiserror::Error;

/// Unified failure type for every backend call.
///
/// The backend reports failures in several shapes (JSON problem documents,
/// plain text, empty bodies), so everything is folded into one enum that
/// call sites can match on and display directly.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Non-2xx response with a best-effort readable body.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("response did not include a token")]
    MissingToken,

    #[error("not authenticated, log in first")]
    NotAuthenticated,

    #[error("could not decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("could not read file: {0}")]
    File(#[from] std::io::Error),
}

impl ApiError {
    /// Build an `Http` error from a status code and raw body text.
    ///
    /// JSON bodies are re-serialized compactly so multi-line problem
    /// documents stay on one line; anything else is passed through trimmed.
    pub fn http(status: u16, body: &str) -> Self {
        let body = match serde_json::from_str::<serde_json::Value>(body) {
            Ok(value) => value.to_string(),
            Err(_) => body.trim().to_string(),
        };
        ApiError::Http { status, body }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_compacts_json_body() {
        let err = ApiError::http(400, "{\n  \"title\": \"Bad Request\"\n}");
        match err {
            ApiError::Http { status, body } => {
                assert_eq!(status, 400);
                assert_eq!(body, r#"{"title":"Bad Request"}"#);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_http_error_passes_text_body_through() {
        let err = ApiError::http(500, "  Internal Server Error \n");
        match err {
            ApiError::Http { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "Internal Server Error");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_display_includes_status_and_body() {
        let err = ApiError::http(404, "missing");
        assert_eq!(err.to_string(), "HTTP 404: missing");
    }
}
