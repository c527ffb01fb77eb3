//! Core types and shared functionality for the Meteoprog informers workspace.
//!
//! This crate provides:
//! - SQLite-backed store for settings and directory snapshots
//! - Unified error types
//! - Layered configuration and operator hooks
//! - The informer record model and display helpers

pub mod config;
pub mod error;
pub mod hooks;
pub mod informer;
pub mod store;
pub mod text;

pub use config::{AppConfig, ConfigError, Features};
pub use error::Error;
pub use hooks::{ConfigHooks, Hooks, NoHooks};
pub use informer::{InformerRecord, find_informer};
pub use store::{StoreDb, directory_cache_key};
