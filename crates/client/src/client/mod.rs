//! HTTP client for the library API.

pub mod books;
pub mod genres;

use std::fmt;
use std::sync::Arc;

use reqwest::Method;

use crate::error::{ClientError, Result};

/// Supplies the bearer credential attached to outgoing requests.
///
/// Token acquisition and refresh live outside this crate; the client only
/// asks for the current value before each request.
pub trait TokenSource: Send + Sync + fmt::Debug {
    /// Returns the current access token, if any.
    fn access_token(&self) -> Option<String>;
}

/// A fixed token, e.g. read from the environment.
#[derive(Clone)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl fmt::Debug for StaticToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StaticToken(***)")
    }
}

impl TokenSource for StaticToken {
    fn access_token(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

/// HTTP client for the library API.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<Arc<dyn TokenSource>>,
}

impl CatalogClient {
    /// Create a new client with the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Attach a token source; every request will carry its bearer token.
    pub fn with_token_source(mut self, token: Arc<dyn TokenSource>) -> Self {
        self.token = Some(token);
        self
    }

    /// Attach a fixed bearer token.
    pub fn with_token(self, token: impl Into<String>) -> Self {
        self.with_token_source(Arc::new(StaticToken::new(token)))
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a URL for an endpoint.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Start a request, adding the bearer header when a token is available.
    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let builder = self.client.request(method, self.url(path));
        match self.token.as_ref().and_then(|t| t.access_token()) {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Handle error responses.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
        resource: impl Into<String>,
    ) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| ClientError::InvalidResponse(e.to_string()))
        } else {
            Err(Self::error_from(response, resource.into()).await)
        }
    }

    /// Handle delete responses (no body expected).
    async fn handle_delete_response(
        &self,
        response: reqwest::Response,
        resource: impl Into<String>,
    ) -> Result<()> {
        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::error_from(response, resource.into()).await)
        }
    }

    async fn error_from(response: reqwest::Response, resource: String) -> ClientError {
        let status = response.status();
        if status.as_u16() == 404 {
            return ClientError::NotFound { resource };
        }
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        ClientError::ServerError {
            status: status.as_u16(),
            message,
        }
    }
}
