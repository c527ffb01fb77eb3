//! Debug mode resolution.
//!
//! Three tiers, highest precedence first:
//!
//! 1. `debug_api_key`: written to the store as the API key and forces live
//!    requests.
//! 2. `debug`: serve the local fixture.
//! 3. The `debug_mode` hook, which sees the value computed above and has the
//!    final say.

use informers_core::{AppConfig, Error, Hooks, StoreDb};

/// Resolve debug mode once at startup.
///
/// # Errors
///
/// Returns an error only when the forced API key cannot be written.
pub async fn resolve_debug_mode(config: &AppConfig, hooks: &dyn Hooks, store: &StoreDb) -> Result<bool, Error> {
    let mut debug = config.debug;

    if let Some(key) = config.debug_api_key.as_deref().map(str::trim).filter(|k| !k.is_empty()) {
        store.set_api_key(key).await?;
        tracing::info!("debug API key installed, forcing live directory requests");
        debug = false;
    }

    let debug = hooks.debug_mode(debug);
    if debug {
        tracing::info!("debug mode active, serving local informer fixture");
    }
    Ok(debug)
}
