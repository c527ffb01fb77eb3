//! Administrative settings endpoints.

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use informers_client::KeyUpdate;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::handler::{AppState, Tier};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiKeyParams {
    /// New key, or the masked echo of the current one.
    pub api_key: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApiKeyOutput {
    /// `saved` or `unchanged`.
    pub status: &'static str,
    /// The stored key, masked.
    pub api_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultInformerParams {
    /// Informer ID; empty clears the default.
    #[serde(default)]
    pub informer_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultInformerOutput {
    pub informer_id: String,
}

/// `PUT /v1/settings/api-key`: validate against the directory, then store.
pub async fn put_api_key(
    State(state): State<AppState>, headers: HeaderMap, Json(params): Json<ApiKeyParams>,
) -> Result<Json<ApiKeyOutput>, ApiError> {
    state.authorize(&headers, Tier::Admin)?;

    if params.api_key.trim().is_empty() {
        return Err(ApiError::InvalidInput("api_key cannot be empty".into()));
    }

    let status = match state.service.update_api_key(&params.api_key).await? {
        KeyUpdate::Saved => "saved",
        KeyUpdate::Unchanged => "unchanged",
        KeyUpdate::Invalid => return Err(ApiError::InvalidKey("API key rejected by the directory".into())),
    };

    Ok(Json(ApiKeyOutput { status, api_key: state.service.masked_api_key().await? }))
}

/// `PUT /v1/settings/default-informer`
pub async fn put_default_informer(
    State(state): State<AppState>, headers: HeaderMap, Json(params): Json<DefaultInformerParams>,
) -> Result<Json<DefaultInformerOutput>, ApiError> {
    state.authorize(&headers, Tier::Admin)?;

    let id = params.informer_id.trim();
    state.service.store().set_default_informer_id(id).await?;
    tracing::info!("default informer set to {id:?}");

    Ok(Json(DefaultInformerOutput { informer_id: id.to_string() }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::tests::{ADMIN, EDITOR, auth, fixture_state, state_with};

    const KEY: &str = "550e8400-e29b-41d4-a716-446655440000";

    fn key_params(value: &str) -> Json<ApiKeyParams> {
        Json(ApiKeyParams { api_key: value.into() })
    }

    #[tokio::test]
    async fn test_save_valid_key() {
        let state = fixture_state().await;
        let Json(out) = put_api_key(State(state.clone()), auth(ADMIN), key_params(KEY)).await.unwrap();

        assert_eq!(out.status, "saved");
        assert_eq!(out.api_key, "550e********440000");
        assert_eq!(state.service.api_key().await.unwrap(), KEY);
    }

    #[tokio::test]
    async fn test_masked_echo_keeps_key() {
        let state = fixture_state().await;
        state.service.store().set_api_key(KEY).await.unwrap();

        let Json(out) = put_api_key(State(state.clone()), auth(ADMIN), key_params("550e********440000")).await.unwrap();

        assert_eq!(out.status, "unchanged");
        assert_eq!(state.service.api_key().await.unwrap(), KEY);
    }

    #[tokio::test]
    async fn test_rejected_key_not_stored() {
        let state = state_with("[]", false).await;
        state.service.store().set_api_key("old-key").await.unwrap();

        let err = put_api_key(State(state.clone()), auth(ADMIN), key_params("bad-key")).await.unwrap_err();

        assert!(matches!(err, ApiError::InvalidKey(_)));
        assert_eq!(state.service.api_key().await.unwrap(), "old-key");
    }

    #[tokio::test]
    async fn test_empty_key_rejected() {
        let state = fixture_state().await;
        let err = put_api_key(State(state), auth(ADMIN), key_params("  ")).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_editor_cannot_change_settings() {
        let state = fixture_state().await;
        let err = put_api_key(State(state.clone()), auth(EDITOR), key_params(KEY)).await.unwrap_err();
        assert!(matches!(err, ApiError::Forbidden(_)));

        let params = Json(DefaultInformerParams { informer_id: "x".into() });
        let err = put_default_informer(State(state), auth(EDITOR), params).await.unwrap_err();
        assert!(matches!(err, ApiError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_default_informer_trimmed() {
        let state = fixture_state().await;
        let params = Json(DefaultInformerParams { informer_id: "  abc  ".into() });

        let Json(out) = put_default_informer(State(state.clone()), auth(ADMIN), params).await.unwrap();

        assert_eq!(out.informer_id, "abc");
        assert_eq!(state.service.store().default_informer_id().await.unwrap(), "abc");
    }
}
