//! External loader asset reference.

use informers_core::config::DEFAULT_LOADER_URL;
use informers_core::{AppConfig, Hooks};
use serde::{Deserialize, Serialize};

use super::escape::inline_json;

/// Where the loader script lives and which version tag it carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoaderSettings {
    pub url: String,
    pub version: String,
}

impl Default for LoaderSettings {
    fn default() -> Self {
        Self { url: DEFAULT_LOADER_URL.to_string(), version: "1.0".to_string() }
    }
}

impl LoaderSettings {
    /// Defaults passed through the `loader_url` and `loader_version` hooks.
    pub fn resolve(config: &AppConfig, hooks: &dyn Hooks) -> Self {
        Self {
            url: hooks.loader_url(DEFAULT_LOADER_URL.to_string()),
            version: hooks.loader_version(config.plugin_version.clone()),
        }
    }

    /// Scheme and host of the loader URL, e.g. `https://cdn.meteoprog.net`.
    pub fn origin(&self) -> Option<String> {
        let url = url::Url::parse(&self.url).ok()?;
        if url.host_str().is_none() {
            return None;
        }
        Some(url.origin().ascii_serialization())
    }

    /// Config object followed by the async injector.
    pub fn markup(&self) -> String {
        let config = serde_json::json!({ "url": self.url, "version": self.version });
        format!(
            "<script>var MeteoprogLoaderConfig = {};</script>\n\
             <script>(function(){{if(typeof MeteoprogLoaderConfig==='undefined')return;\
             var s=document.createElement('script');s.src=MeteoprogLoaderConfig.url;s.async=true;\
             document.head.appendChild(s);}})();</script>\n",
            inline_json(&config.to_string())
        )
    }
}
