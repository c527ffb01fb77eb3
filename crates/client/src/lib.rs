//! Client code for Meteoprog informers.
//!
//! This crate provides the remote directory client, the cached informer
//! service, and HTML rendering shared by the server and CLI.

pub mod debug;
pub mod directory;
pub mod fixture;
pub mod render;
pub mod service;

pub use debug::resolve_debug_mode;
pub use directory::{DirectoryClient, DirectoryConfig, DirectoryError, HttpTransport, Transport};
pub use render::{LoaderSettings, PageKind, PageOutput, PageRequest, RenderContext};
pub use service::{InformerService, KeyUpdate};
