//! Endpoint implementations.
//!
//! Handlers take axum extractors directly so tests can call them without a
//! running server.

pub mod cache;
pub mod informers;
pub mod render;
pub mod settings;
