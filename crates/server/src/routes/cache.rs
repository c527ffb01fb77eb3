//! Cache and data maintenance endpoints.

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use informers_core::InformerRecord;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::handler::{AppState, Tier};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshOutput {
    pub informers: Vec<InformerRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClearCacheOutput {
    /// Whether a snapshot existed for the current key.
    pub cleared: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoveDataOutput {
    /// Rows deleted across settings and snapshots.
    pub deleted: u64,
}

/// `POST /v1/cache/refresh`: drop the current snapshot and fetch again.
pub async fn refresh(State(state): State<AppState>, headers: HeaderMap) -> Result<Json<RefreshOutput>, ApiError> {
    state.authorize(&headers, Tier::Admin)?;
    let informers = state.service.refresh().await?;
    Ok(Json(RefreshOutput { informers }))
}

/// `DELETE /v1/cache`: drop the snapshot for the current key.
pub async fn clear_cache(
    State(state): State<AppState>, headers: HeaderMap,
) -> Result<Json<ClearCacheOutput>, ApiError> {
    state.authorize(&headers, Tier::Admin)?;
    let cleared = state.service.clear_cache().await?;
    tracing::info!("directory cache cleared: {cleared}");
    Ok(Json(ClearCacheOutput { cleared }))
}

/// `DELETE /v1/data`: remove stored settings and every snapshot.
pub async fn remove_data(
    State(state): State<AppState>, headers: HeaderMap,
) -> Result<Json<RemoveDataOutput>, ApiError> {
    state.authorize(&headers, Tier::Admin)?;
    let deleted = state.service.store().delete_all_data().await?;
    tracing::info!("removed all informer data ({deleted} rows)");
    Ok(Json(RemoveDataOutput { deleted }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::tests::{ADMIN, EDITOR, auth, fixture_state, state_with};

    const BODY: &str = r#"[{"informer_id":"z1","domain":"https://a.test"}]"#;

    #[tokio::test]
    async fn test_refresh_returns_fresh_list() {
        let state = state_with(BODY, false).await;
        state.service.store().set_api_key("abc123").await.unwrap();

        let Json(out) = refresh(State(state), auth(ADMIN)).await.unwrap();
        assert_eq!(out.informers.len(), 1);
    }

    #[tokio::test]
    async fn test_refresh_empty_is_upstream_error() {
        let state = state_with("[]", false).await;
        state.service.store().set_api_key("abc123").await.unwrap();

        let err = refresh(State(state), auth(ADMIN)).await.unwrap_err();
        assert!(matches!(err, ApiError::Upstream(_)));
    }

    #[tokio::test]
    async fn test_clear_cache_reports_existing_snapshot() {
        let state = state_with(BODY, false).await;
        state.service.store().set_api_key("abc123").await.unwrap();
        state.service.get_informers().await;

        let Json(out) = clear_cache(State(state.clone()), auth(ADMIN)).await.unwrap();
        assert!(out.cleared);

        let Json(out) = clear_cache(State(state), auth(ADMIN)).await.unwrap();
        assert!(!out.cleared);
    }

    #[tokio::test]
    async fn test_remove_data_clears_settings() {
        let state = fixture_state().await;
        state.service.store().set_api_key("abc123").await.unwrap();
        state.service.store().set_default_informer_id("d1").await.unwrap();

        let Json(out) = remove_data(State(state.clone()), auth(ADMIN)).await.unwrap();

        assert!(out.deleted >= 2);
        assert_eq!(state.service.api_key().await.unwrap(), "");
        assert_eq!(state.service.store().default_informer_id().await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_maintenance_requires_admin() {
        let state = fixture_state().await;
        assert!(matches!(refresh(State(state.clone()), auth(EDITOR)).await, Err(ApiError::Forbidden(_))));
        assert!(matches!(clear_cache(State(state.clone()), auth(EDITOR)).await, Err(ApiError::Forbidden(_))));
        assert!(matches!(remove_data(State(state), auth(EDITOR)).await, Err(ApiError::Forbidden(_))));
    }
}
