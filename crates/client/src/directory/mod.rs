//! Meteoprog informer directory client.
//!
//! Fetches the informer list registered for an API key from the billing
//! service and normalizes the response.
//!
//! ### Contract
//!
//! - **Endpoint**: `GET https://billing.meteoprog.com/api/informers`
//! - **Authentication**: `Authorization: Bearer <key>`; an empty key never
//!   reaches the network.
//! - **Identification**: `X-Site-Domain` carries the lower-cased site host,
//!   `User-Agent` is `MeteoprogWPPlugin/<version> (+https://meteoprog.com)`.
//! - **Shapes**: `{"informers": [...]}` or a bare array of objects. Anything
//!   else is treated as an empty directory.
//! - **Failures**: timeouts, transport errors and non-200 statuses are logged
//!   and yield an empty list. Nothing is retried.

pub mod error;
pub mod transport;

pub use error::DirectoryError;
pub use transport::{DirectoryRequest, HttpTransport, RawResponse, Transport};

use informers_core::{AppConfig, InformerRecord};
use serde_json::Value;
use std::sync::{Arc, OnceLock};
use std::time::{Duration, Instant};

static USER_AGENT: OnceLock<String> = OnceLock::new();

/// Product user agent, built from the first version seen by the process.
pub fn user_agent(version: &str) -> &'static str {
    USER_AGENT.get_or_init(|| format!("MeteoprogWPPlugin/{version} (+https://meteoprog.com)"))
}

/// Directory client configuration.
#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    pub api_url: String,
    /// Lower-cased host sent in `X-Site-Domain`.
    pub site_host: String,
    pub timeout: Duration,
    pub plugin_version: String,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            api_url: informers_core::config::DEFAULT_API_URL.to_string(),
            site_host: "localhost".to_string(),
            timeout: Duration::from_secs(15),
            plugin_version: "1.0".to_string(),
        }
    }
}

impl From<&AppConfig> for DirectoryConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            api_url: config.api_url.clone(),
            site_host: config.site_host(),
            timeout: config.timeout(),
            plugin_version: config.plugin_version.clone(),
        }
    }
}

/// Informer directory client.
#[derive(Clone)]
pub struct DirectoryClient {
    transport: Arc<dyn Transport>,
    config: DirectoryConfig,
}

impl std::fmt::Debug for DirectoryClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectoryClient").field("config", &self.config).finish_non_exhaustive()
    }
}

impl DirectoryClient {
    pub fn new(transport: Arc<dyn Transport>, config: DirectoryConfig) -> Self {
        Self { transport, config }
    }

    /// Client over the real HTTP transport.
    pub fn http(config: DirectoryConfig) -> Result<Self, DirectoryError> {
        Ok(Self::new(Arc::new(HttpTransport::new()?), config))
    }

    pub fn config(&self) -> &DirectoryConfig {
        &self.config
    }

    /// Fetch the informers registered for `api_key`.
    ///
    /// Never fails: every error is logged and becomes an empty list.
    pub async fn fetch_informers(&self, api_key: &str) -> Vec<InformerRecord> {
        match self.try_fetch(api_key).await {
            Ok(informers) => informers,
            Err(DirectoryError::MissingApiKey) => {
                tracing::debug!("no API key configured, skipping directory fetch");
                Vec::new()
            }
            Err(e) => {
                tracing::warn!("directory fetch failed: {e}");
                Vec::new()
            }
        }
    }

    /// True iff the directory returns at least one informer for `candidate`.
    ///
    /// Always goes to the network; callers must not consult the cache.
    pub async fn validate_key(&self, candidate: &str) -> bool {
        !self.fetch_informers(candidate).await.is_empty()
    }

    /// Fetch with the full error taxonomy.
    ///
    /// The key is sent as stored; only an empty key skips the network.
    pub async fn try_fetch(&self, api_key: &str) -> Result<Vec<InformerRecord>, DirectoryError> {
        if api_key.is_empty() {
            return Err(DirectoryError::MissingApiKey);
        }

        let start = Instant::now();
        let request = self.build_request(api_key);
        let response = self.transport.get(&request).await?;

        if response.status != 200 {
            return Err(DirectoryError::HttpStatus { status: response.status });
        }

        let informers = parse_directory(&response.body)?;
        tracing::debug!("directory fetch completed in {:?}, {} informers", start.elapsed(), informers.len());
        Ok(informers)
    }

    fn build_request(&self, api_key: &str) -> DirectoryRequest {
        DirectoryRequest {
            url: self.config.api_url.clone(),
            headers: vec![
                ("Authorization", format!("Bearer {api_key}")),
                ("Accept", "application/json".to_string()),
                ("X-Site-Domain", self.config.site_host.to_lowercase()),
                ("User-Agent", user_agent(&self.config.plugin_version).to_string()),
            ],
            timeout: self.config.timeout,
        }
    }
}

/// Normalize a directory response body.
///
/// Accepts `{"informers": [...]}` or a bare array. Elements that are not
/// objects, or that cannot be read as a record, are skipped.
pub fn parse_directory(body: &[u8]) -> Result<Vec<InformerRecord>, DirectoryError> {
    let value: Value = serde_json::from_slice(body).map_err(|e| DirectoryError::Parse(e.to_string()))?;

    let items = match value {
        Value::Object(mut map) => match map.remove("informers") {
            Some(Value::Array(items)) => items,
            _ => return Err(DirectoryError::UnrecognizedShape),
        },
        Value::Array(items) => items,
        _ => return Err(DirectoryError::UnrecognizedShape),
    };

    Ok(items
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|item| match serde_json::from_value::<InformerRecord>(item) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::debug!("skipping unreadable informer record: {e}");
                None
            }
        })
        .collect())
}
