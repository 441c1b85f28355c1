use std::sync::RwLock;

use log::warn;
use reqwest::multipart::Form;
use reqwest::{Client, Response};
use serde::Serialize;

use crate::session::TokenStore;

/// HTTP client for the summaries backend.
///
/// Owns both copies of the session token: the in-memory one attached to
/// requests and the durable one in the [`TokenStore`]. Both are updated
/// together so they never disagree.
#[derive(Debug)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    token: RwLock<Option<String>>,
    store: TokenStore,
}

impl ApiClient {
    /// Create a client for the given API origin, adopting any previously
    /// persisted token so an old session resumes without a fresh login.
    pub fn new(base_url: &str, store: TokenStore) -> Self {
        let token = match store.load() {
            Ok(token) => token,
            Err(e) => {
                warn!("could not read persisted token: {e}");
                None
            }
        };
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: RwLock::new(token),
            store,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.read().unwrap().is_some()
    }

    pub fn token(&self) -> Option<String> {
        self.token.read().unwrap().clone()
    }

    /// Store the token in memory and on disk together.
    pub fn set_token(&self, token: String) {
        if let Err(e) = self.store.save(&token) {
            warn!("could not persist token: {e}");
        }
        *self.token.write().unwrap() = Some(token);
    }

    /// Drop the token from memory and disk together.
    pub fn clear_token(&self) {
        if let Err(e) = self.store.clear() {
            warn!("could not clear persisted token: {e}");
        }
        *self.token.write().unwrap() = None;
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET a relative API path with the bearer token when one is held.
    pub async fn get(&self, path: &str) -> Result<Response, reqwest::Error> {
        let mut builder = self.http.get(self.url(path));
        if let Some(token) = self.token() {
            builder = builder.bearer_auth(token);
        }
        builder.send().await
    }

    /// POST a JSON body to a relative API path with the bearer token when
    /// one is held.
    pub async fn post_json<T: Serialize>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<Response, reqwest::Error> {
        let mut builder = self.http.post(self.url(path)).json(body);
        if let Some(token) = self.token() {
            builder = builder.bearer_auth(token);
        }
        builder.send().await
    }

    /// POST a multipart form. The content type is left to the HTTP layer so
    /// the boundary is generated correctly.
    pub async fn post_multipart(&self, path: &str, form: Form) -> Result<Response, reqwest::Error> {
        let mut builder = self.http.post(self.url(path)).multipart(form);
        if let Some(token) = self.token() {
            builder = builder.bearer_auth(token);
        }
        builder.send().await
    }

    /// DELETE a relative API path with the bearer token when one is held.
    pub async fn delete(&self, path: &str) -> Result<Response, reqwest::Error> {
        let mut builder = self.http.delete(self.url(path));
        if let Some(token) = self.token() {
            builder = builder.bearer_auth(token);
        }
        builder.send().await
    }

    /// Fetch raw bytes from an absolute URL. Used for summaries whose file
    /// payload lives in remote storage instead of the response body.
    pub async fn get_bytes(&self, url: &str) -> Result<Vec<u8>, reqwest::Error> {
        let resp = self.http.get(url).send().await?.error_for_status()?;
        let bytes = resp.bytes().await?;
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn client_in(dir: &TempDir) -> ApiClient {
        ApiClient::new("http://localhost:9/api/", TokenStore::at_dir(dir.path()))
    }

    #[test]
    fn test_new_trims_trailing_slash() {
        let dir = TempDir::new().unwrap();
        let client = client_in(&dir);
        assert_eq!(client.base_url(), "http://localhost:9/api");
        assert_eq!(client.url("/summaries"), "http://localhost:9/api/summaries");
    }

    #[test]
    fn test_new_adopts_persisted_token() {
        let dir = TempDir::new().unwrap();
        let store = TokenStore::at_dir(dir.path());
        store.save("persisted-token-1234567890").unwrap();

        let client = ApiClient::new("http://localhost:9/api", store);
        assert!(client.is_authenticated());
        assert_eq!(client.token().as_deref(), Some("persisted-token-1234567890"));
    }

    #[test]
    fn test_set_token_updates_memory_and_disk() {
        let dir = TempDir::new().unwrap();
        let client = client_in(&dir);
        assert!(!client.is_authenticated());

        client.set_token("fresh-token".into());
        assert!(client.is_authenticated());
        assert_eq!(
            TokenStore::at_dir(dir.path()).load().unwrap().as_deref(),
            Some("fresh-token")
        );
    }

    #[test]
    fn test_clear_token_updates_memory_and_disk() {
        let dir = TempDir::new().unwrap();
        let client = client_in(&dir);
        client.set_token("short-lived".into());

        client.clear_token();
        assert!(!client.is_authenticated());
        assert_eq!(TokenStore::at_dir(dir.path()).load().unwrap(), None);
    }
}
