//! Effective informer ID resolution.
//!
//! An explicit, non-empty ID always wins, whitespace included; trimming
//! happens only when the container is built. Otherwise the stored default is
//! used; it is read at most once per request and can be invalidated after
//! an admin change. An empty result means "no informer".

use informers_core::StoreDb;
use std::sync::Arc;

/// Source of the site-wide default informer ID.
#[async_trait::async_trait]
pub trait DefaultIdSource: Send + Sync {
    /// The stored default, or an empty string.
    async fn load_default_id(&self) -> String;
}

#[async_trait::async_trait]
impl DefaultIdSource for StoreDb {
    async fn load_default_id(&self) -> String {
        match self.default_informer_id().await {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!("cannot read default informer ID: {e}");
                String::new()
            }
        }
    }
}

/// Pure precedence rule: explicit, then default, then empty.
pub fn resolve_id<'a>(explicit: &'a str, default: &'a str) -> &'a str {
    if !explicit.is_empty() { explicit } else { default.trim() }
}

/// Request-scoped resolver with a memoized default.
#[derive(Clone)]
pub struct IdResolver {
    source: Arc<dyn DefaultIdSource>,
    default_id: Option<String>,
}

impl std::fmt::Debug for IdResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdResolver").field("default_id", &self.default_id).finish_non_exhaustive()
    }
}

impl IdResolver {
    pub fn new(source: Arc<dyn DefaultIdSource>) -> Self {
        Self { source, default_id: None }
    }

    /// The default ID, loaded on first use.
    pub async fn default_id(&mut self) -> &str {
        if self.default_id.is_none() {
            let id = self.source.load_default_id().await;
            self.default_id = Some(id.trim().to_string());
        }
        self.default_id.as_deref().unwrap_or_default()
    }

    /// Effective ID for an explicit value that may be empty.
    pub async fn resolve(&mut self, explicit: &str) -> String {
        if !explicit.is_empty() {
            return explicit.to_string();
        }
        self.default_id().await.to_string()
    }

    /// Forget the memoized default; the next lookup reads the source again.
    pub fn invalidate(&mut self) {
        self.default_id = None;
    }
}
