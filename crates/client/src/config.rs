use std::env;

use url::Url;

use crate::client::CatalogClient;
use crate::error::{ClientError, Result};
use catalog_core::catalog::DEFAULT_FALLBACK_LABEL;

/// Path of the book update feed on the server.
pub const LIVE_CHANNEL_PATH: &str = "/ws/books/";

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// API base URL (default: "http://localhost:8000")
    pub base_url: String,
    /// Live channel URL (default: derived from `base_url`)
    pub ws_url: String,
    /// Bearer token attached to API requests
    pub token: Option<String>,
    /// Label shown for genres that fail to resolve (default: "Unknown")
    pub fallback_label: String,
}

impl Config {
    /// Creates a configuration for `base_url`, deriving the live channel URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into();
        let ws_url = derive_ws_url(&base_url)?;
        Ok(Self {
            base_url,
            ws_url,
            token: None,
            fallback_label: DEFAULT_FALLBACK_LABEL.to_string(),
        })
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `CATALOG_URL` - API base URL (default: "http://localhost:8000")
    /// - `CATALOG_WS_URL` - Live channel URL (default: derived from the base URL)
    /// - `CATALOG_TOKEN` - Bearer token (default: none)
    /// - `CATALOG_FALLBACK_LABEL` - Unresolved genre label (default: "Unknown")
    pub fn from_env() -> Result<Self> {
        let base_url =
            env::var("CATALOG_URL").unwrap_or_else(|_| "http://localhost:8000".to_string());

        let mut config = Self::new(base_url)?
            .with_ws_url(env::var("CATALOG_WS_URL").ok())
            .with_token(env::var("CATALOG_TOKEN").ok());
        if let Ok(label) = env::var("CATALOG_FALLBACK_LABEL") {
            config = config.with_fallback_label(label);
        }
        Ok(config)
    }

    /// Overrides the derived live channel URL when one is given.
    pub fn with_ws_url(mut self, ws_url: Option<String>) -> Self {
        if let Some(url) = ws_url {
            self.ws_url = url;
        }
        self
    }

    /// Sets the bearer token. Empty tokens are ignored.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.is_empty());
        self
    }

    /// Sets the label used for unresolved genres.
    pub fn with_fallback_label(mut self, label: impl Into<String>) -> Self {
        self.fallback_label = label.into();
        self
    }

    /// Builds an API client from this configuration.
    pub fn client(&self) -> CatalogClient {
        let client = CatalogClient::new(&self.base_url);
        match &self.token {
            Some(token) => client.with_token(token.clone()),
            None => client,
        }
    }
}

/// Derives the live channel URL from the API base URL.
///
/// `http` becomes `ws`, `https` becomes `wss`, and the path is replaced with
/// the book update feed path.
pub fn derive_ws_url(base_url: &str) -> Result<String> {
    let mut url = Url::parse(base_url)
        .map_err(|e| ClientError::InvalidInput(format!("{}: {}", base_url, e)))?;

    let scheme = match url.scheme() {
        "http" => "ws",
        "https" => "wss",
        other => {
            return Err(ClientError::InvalidInput(format!(
                "Unsupported scheme for live channel: {}",
                other
            )))
        }
    };
    url.set_scheme(scheme)
        .map_err(|_| ClientError::InvalidInput(format!("Cannot use scheme {}", scheme)))?;
    url.set_path(LIVE_CHANNEL_PATH);
    url.set_query(None);

    Ok(url.to_string())
}
