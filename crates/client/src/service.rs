//! Cached access to the informer directory.
//!
//! Wraps [`DirectoryClient`] with a snapshot per API-key fingerprint stored in
//! SQLite. Snapshots live for the configured TTL (3 minutes by default) and
//! are never served stale. Empty results are cached too so a rejected key is
//! not retried on every page view. Debug mode bypasses the cache and the
//! network and serves the local fixture.

use std::time::Duration;

use informers_core::text::{is_masked, mask_api_key};
use informers_core::{AppConfig, Error, Hooks, InformerRecord, StoreDb, directory_cache_key};

use crate::debug::resolve_debug_mode;
use crate::directory::{DirectoryClient, DirectoryConfig};
use crate::fixture;

/// Outcome of submitting an API key from an admin surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyUpdate {
    /// The submitted value was the masked echo; stored key untouched.
    Unchanged,
    /// The directory returned nothing for the key; stored key untouched.
    Invalid,
    Saved,
}

/// Cache layer over the informer directory.
#[derive(Debug, Clone)]
pub struct InformerService {
    store: StoreDb,
    directory: DirectoryClient,
    debug: bool,
    ttl: Duration,
}

impl InformerService {
    pub fn new(store: StoreDb, directory: DirectoryClient, debug: bool, ttl: Duration) -> Self {
        Self { store, directory, debug, ttl }
    }

    /// Build the service from configuration over the HTTP transport.
    ///
    /// Resolves debug mode, which may write `debug_api_key` into the store.
    pub async fn from_config(config: &AppConfig, hooks: &dyn Hooks, store: StoreDb) -> Result<Self, Error> {
        let debug = resolve_debug_mode(config, hooks, &store).await?;
        let directory = DirectoryClient::http(DirectoryConfig::from(config))
            .map_err(|e| Error::Config(format!("cannot build HTTP client: {e}")))?;
        Ok(Self::new(store, directory, debug, config.cache_ttl()))
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    pub fn store(&self) -> &StoreDb {
        &self.store
    }

    /// Informers for the stored API key.
    ///
    /// Never fails. Store errors degrade to a fetch; fetch errors to an empty list.
    pub async fn get_informers(&self) -> Vec<InformerRecord> {
        if self.debug {
            return fixture::informers();
        }

        let api_key = match self.store.api_key().await {
            Ok(key) => key,
            Err(e) => {
                tracing::warn!("cannot read API key: {e}");
                return Vec::new();
            }
        };
        let cache_key = directory_cache_key(&api_key);

        match self.store.get_directory(&cache_key).await {
            Ok(Some(informers)) => {
                tracing::debug!("directory cache hit: {} informers", informers.len());
                return informers;
            }
            Ok(None) => tracing::debug!("directory cache miss"),
            Err(e) => tracing::warn!("directory cache read failed: {e}"),
        }

        let informers = self.directory.fetch_informers(&api_key).await;

        if let Err(e) = self.store.put_directory(&cache_key, &informers, self.ttl).await {
            tracing::warn!("directory cache write failed: {e}");
        }

        informers
    }

    /// Drop the snapshot for the current API key only.
    ///
    /// Returns whether a snapshot was removed.
    pub async fn clear_cache(&self) -> Result<bool, Error> {
        let api_key = self.store.api_key().await?;
        self.store.delete_directory(&directory_cache_key(&api_key)).await
    }

    /// Clear the current snapshot and fetch again.
    ///
    /// # Errors
    ///
    /// Returns `Error::RefreshFailed` when the fresh list is empty.
    pub async fn refresh(&self) -> Result<Vec<InformerRecord>, Error> {
        self.clear_cache().await?;
        let informers = self.get_informers().await;
        if informers.is_empty() {
            return Err(Error::RefreshFailed);
        }
        tracing::info!("directory refreshed: {} informers", informers.len());
        Ok(informers)
    }

    /// Whether `candidate` unlocks a non-empty directory. Bypasses the cache.
    pub async fn validate_key(&self, candidate: &str) -> bool {
        if self.debug {
            return !fixture::informers().is_empty();
        }
        self.directory.validate_key(candidate).await
    }

    /// Save a submitted API key after validating it.
    ///
    /// A value containing the mask marker is the admin form echoing the masked
    /// key back; it is ignored without validation.
    pub async fn update_api_key(&self, submitted: &str) -> Result<KeyUpdate, Error> {
        let submitted = submitted.trim();

        if is_masked(submitted) {
            return Ok(KeyUpdate::Unchanged);
        }

        if !self.validate_key(submitted).await {
            tracing::info!("rejected API key {}", mask_api_key(submitted));
            return Ok(KeyUpdate::Invalid);
        }

        self.store.set_api_key(submitted).await?;
        tracing::info!("saved API key {}", mask_api_key(submitted));
        Ok(KeyUpdate::Saved)
    }

    pub async fn api_key(&self) -> Result<String, Error> {
        self.store.api_key().await
    }

    pub async fn masked_api_key(&self) -> Result<String, Error> {
        Ok(mask_api_key(&self.store.api_key().await?))
    }
}
