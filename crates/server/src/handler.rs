//! HTTP server handler.
//!
//! Holds the shared state and routes requests to the endpoint modules.
//! Permission checks live here so every route applies them the same way.

use std::sync::Arc;

use axum::Router;
use axum::http::{HeaderMap, header};
use axum::routing::{delete, get, post, put};
use informers_client::{InformerService, LoaderSettings};
use informers_core::AppConfig;
use subtle::ConstantTimeEq;

use crate::error::ApiError;
use crate::routes::{cache, informers, render, settings};

/// Capability tier required by an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// Edit posts: read the directory and selector options.
    Editor,
    /// Manage options: keys, defaults, cache and data removal.
    Admin,
}

/// State shared by all requests.
///
/// Nothing here is request-scoped; each render builds its own context.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub service: InformerService,
    pub loader: LoaderSettings,
    pub site_host: String,
}

impl AppState {
    pub fn new(config: AppConfig, service: InformerService, loader: LoaderSettings) -> Self {
        let site_host = config.site_host();
        Self { config: Arc::new(config), service, loader, site_host }
    }

    /// Check the bearer token against the tier's configured token.
    ///
    /// The admin token also satisfies the editor tier. A tier without a
    /// configured token admits nobody.
    pub fn authorize(&self, headers: &HeaderMap, tier: Tier) -> Result<(), ApiError> {
        let provided = bearer_token(headers).ok_or_else(|| ApiError::Forbidden("missing bearer token".into()))?;

        let admin = self.config.admin_token.as_deref().filter(|t| !t.is_empty());
        let editor = self.config.editor_token.as_deref().filter(|t| !t.is_empty());

        let allowed = match tier {
            Tier::Admin => token_matches(admin, provided),
            Tier::Editor => token_matches(admin, provided) | token_matches(editor, provided),
        };

        if allowed {
            Ok(())
        } else {
            tracing::info!("rejected request for {tier:?} tier");
            Err(ApiError::Forbidden("insufficient permissions".into()))
        }
    }
}

/// Constant-time comparison against a configured token.
fn token_matches(expected: Option<&str>, provided: &str) -> bool {
    expected.is_some_and(|token| token.as_bytes().ct_eq(provided.as_bytes()).into())
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// All routes of the informers API.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/v1/informers", get(informers::list_informers))
        .route("/v1/informers/options", get(informers::informer_options))
        .route("/v1/informers/{id}", get(informers::get_informer))
        .route("/v1/render", post(render::render_page))
        .route("/v1/settings/api-key", put(settings::put_api_key))
        .route("/v1/settings/default-informer", put(settings::put_default_informer))
        .route("/v1/cache/refresh", post(cache::refresh))
        .route("/v1/cache", delete(cache::clear_cache))
        .route("/v1/data", delete(cache::remove_data))
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}
