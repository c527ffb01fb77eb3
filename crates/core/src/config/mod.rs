//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (METEOPROG_*)
//! 2. TOML config file (if METEOPROG_CONFIG_FILE set)
//! 3. Built-in defaults

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::text::host_from_url;

mod validation;

pub use validation::ConfigError;

/// Informer directory endpoint on the billing service.
pub const DEFAULT_API_URL: &str = "https://billing.meteoprog.com/api/informers";

/// External loader script hydrating informer containers.
pub const DEFAULT_LOADER_URL: &str = "https://cdn.meteoprog.net/informerv4/loader.js";

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (METEOPROG_*)
/// 2. TOML config file (if METEOPROG_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Informer directory endpoint.
    ///
    /// Set via METEOPROG_API_URL environment variable.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Home URL of the site embedding the informers.
    ///
    /// Its host identifies the site to the directory and drives domain badges.
    /// Set via METEOPROG_SITE_URL environment variable.
    #[serde(default = "default_site_url")]
    pub site_url: String,

    /// Path to SQLite store database.
    ///
    /// Set via METEOPROG_DB_PATH environment variable.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// HTTP request timeout in milliseconds.
    ///
    /// Set via METEOPROG_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Version reported in the user agent and used as the loader version tag.
    #[serde(default = "default_plugin_version")]
    pub plugin_version: String,

    /// Lifetime of a directory snapshot in seconds.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Serve the local fixture instead of calling the directory.
    ///
    /// Set via METEOPROG_DEBUG environment variable.
    #[serde(default)]
    pub debug: bool,

    /// Key pushed into the store at startup; forces live requests.
    ///
    /// Set via METEOPROG_DEBUG_API_KEY environment variable.
    #[serde(default)]
    pub debug_api_key: Option<String>,

    /// Operator overrides for the extension points.
    #[serde(default)]
    pub hooks: HookOverrides,

    /// Capabilities of the host page stack.
    #[serde(default)]
    pub features: Features,

    /// Address the HTTP server binds to.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Credential for editor-tier endpoints (directory listing).
    #[serde(default)]
    pub editor_token: Option<String>,

    /// Credential for administrative actions.
    #[serde(default)]
    pub admin_token: Option<String>,
}

/// Values applied by [`crate::hooks::ConfigHooks`] on top of computed defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HookOverrides {
    #[serde(default)]
    pub debug_mode: Option<bool>,
    #[serde(default)]
    pub loader_url: Option<String>,
    #[serde(default)]
    pub loader_version: Option<String>,
}

/// Integration surfaces the host supports.
///
/// Decided once at bootstrap, not re-checked per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Features {
    #[serde(default = "default_true")]
    pub block_editor: bool,
    #[serde(default = "default_true")]
    pub page_builder: bool,
    #[serde(default = "default_true")]
    pub shortcodes_ultimate: bool,
}

impl Default for Features {
    fn default() -> Self {
        Self { block_editor: true, page_builder: true, shortcodes_ultimate: true }
    }
}

fn default_api_url() -> String {
    DEFAULT_API_URL.into()
}

fn default_site_url() -> String {
    "http://localhost".into()
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./meteoprog-informers.sqlite")
}

fn default_timeout_ms() -> u64 {
    15_000
}

fn default_plugin_version() -> String {
    "1.0".into()
}

fn default_cache_ttl_secs() -> u64 {
    180
}

fn default_bind_addr() -> String {
    "127.0.0.1:8080".into()
}

fn default_true() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            site_url: default_site_url(),
            db_path: default_db_path(),
            timeout_ms: default_timeout_ms(),
            plugin_version: default_plugin_version(),
            cache_ttl_secs: default_cache_ttl_secs(),
            debug: false,
            debug_api_key: None,
            hooks: HookOverrides::default(),
            features: Features::default(),
            bind_addr: default_bind_addr(),
            editor_token: None,
            admin_token: None,
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Snapshot lifetime as Duration.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Lower-cased host of the site URL.
    ///
    /// Falls back to the whole URL, lower-cased, when it has no host part.
    pub fn site_host(&self) -> String {
        let host = host_from_url(&self.site_url);
        if host.is_empty() { self.site_url.to_lowercase() } else { host }
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `METEOPROG_`
    /// 2. TOML file from `METEOPROG_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("METEOPROG_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("METEOPROG_")
                .ignore(&["CONFIG_FILE"])
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }

    /// Admin credential, required before any administrative action.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if no admin token is configured.
    pub fn require_admin_token(&self) -> Result<&str, ConfigError> {
        self.admin_token.as_deref().ok_or_else(|| ConfigError::Missing {
            field: "admin_token".into(),
            hint: "Set METEOPROG_ADMIN_TOKEN environment variable".into(),
        })
    }
}
