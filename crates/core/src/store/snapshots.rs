//! Directory snapshot operations.
//!
//! A snapshot is the informer list fetched for one API-key fingerprint.
//! Expiry is checked lazily on read: an expired row is a miss and is never
//! served stale.

use super::connection::StoreDb;
use crate::{Error, InformerRecord};
use chrono::Utc;
use std::time::Duration;
use tokio_rusqlite::params;

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

impl StoreDb {
    /// Get a live snapshot by cache key.
    ///
    /// Returns None if the key doesn't exist or the snapshot has expired.
    pub async fn get_directory(&self, cache_key: &str) -> Result<Option<Vec<InformerRecord>>, Error> {
        let cache_key = cache_key.to_string();
        let now = now_millis();
        let json = self
            .conn
            .call(move |conn| -> Result<Option<String>, Error> {
                let mut stmt =
                    conn.prepare("SELECT informers_json FROM directory_cache WHERE cache_key = ?1 AND expires_at > ?2")?;
                match stmt.query_row(params![cache_key, now], |row| row.get(0)) {
                    Ok(json) => Ok(Some(json)),
                    Err(tokio_rusqlite::rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(Error::from)?;

        match json {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// Insert or replace the snapshot for a cache key.
    ///
    /// Empty lists are stored like any other. Concurrent writers to the same
    /// key resolve last-write-wins.
    pub async fn put_directory(&self, cache_key: &str, informers: &[InformerRecord], ttl: Duration) -> Result<(), Error> {
        let cache_key = cache_key.to_string();
        let informers_json = serde_json::to_string(informers)?;
        let fetched_at = Utc::now().to_rfc3339();
        let ttl_ms = i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX);
        let expires_at = now_millis().saturating_add(ttl_ms);

        self.conn
            .call(move |conn| -> Result<(), Error> {
                conn.execute(
                    "INSERT INTO directory_cache (cache_key, informers_json, fetched_at, expires_at)
                    VALUES (?1, ?2, ?3, ?4)
                    ON CONFLICT(cache_key) DO UPDATE SET
                        informers_json = excluded.informers_json,
                        fetched_at = excluded.fetched_at,
                        expires_at = excluded.expires_at",
                    params![cache_key, informers_json, fetched_at, expires_at],
                )?;
                Ok(())
            })
            .await
            .map_err(Error::from)
    }

    /// Delete the snapshot for one cache key. Returns true if a row was removed.
    pub async fn delete_directory(&self, cache_key: &str) -> Result<bool, Error> {
        let cache_key = cache_key.to_string();
        self.conn
            .call(move |conn| -> Result<bool, Error> {
                let count = conn.execute("DELETE FROM directory_cache WHERE cache_key = ?1", params![cache_key])?;
                Ok(count > 0)
            })
            .await
            .map_err(Error::from)
    }

    /// Delete expired snapshots on operator request.
    ///
    /// Reads never depend on this; it only reclaims space. Returns the number
    /// of deleted entries.
    pub async fn purge_expired_directories(&self) -> Result<u64, Error> {
        let now = now_millis();
        self.conn
            .call(move |conn| -> Result<u64, Error> {
                let count = conn.execute("DELETE FROM directory_cache WHERE expires_at <= ?1", params![now])?;
                Ok(count as u64)
            })
            .await
            .map_err(Error::from)
    }

    /// Delete every cached snapshot, leaving options untouched.
    pub async fn purge_all_directories(&self) -> Result<u64, Error> {
        self.conn
            .call(move |conn| -> Result<u64, Error> {
                let count = conn.execute("DELETE FROM directory_cache", [])?;
                Ok(count as u64)
            })
            .await
            .map_err(Error::from)
    }
}
