//! SQLite-backed store for site settings and informer directory snapshots.
//!
//! This module provides the persistent key-value state the informer core
//! consumes, using SQLite with async access via tokio-rusqlite:
//!
//! - Site options (API key, default informer ID)
//! - Directory snapshots keyed by a SHA-256 fingerprint of the API key
//! - Lazy TTL expiry checked on read, never swept in the background
//! - Automatic schema migrations

pub mod connection;
pub mod hash;
pub mod migrations;
pub mod options;
pub mod snapshots;

pub use crate::Error;

pub use connection::StoreDb;
pub use hash::{CACHE_KEY_PREFIX, directory_cache_key};
pub use options::{OPT_API_KEY, OPT_DEFAULT_ID};
