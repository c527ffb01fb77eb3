//! Directory read endpoints for editors.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use informers_client::render::{DomainStatus, SelectOption, domain_status, informer_options as build_options};
use informers_core::{InformerRecord, find_informer};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::handler::{AppState, Tier};

/// One informer with its domain badge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InformerDetail {
    pub informer: InformerRecord,
    pub domain_status: Option<DomainStatus>,
}

/// `GET /v1/informers`: the cached directory snapshot.
pub async fn list_informers(
    State(state): State<AppState>, headers: HeaderMap,
) -> Result<Json<Vec<InformerRecord>>, ApiError> {
    state.authorize(&headers, Tier::Editor)?;
    Ok(Json(state.service.get_informers().await))
}

/// `GET /v1/informers/options`: selector entries with domain badges.
pub async fn informer_options(
    State(state): State<AppState>, headers: HeaderMap,
) -> Result<Json<Vec<SelectOption>>, ApiError> {
    state.authorize(&headers, Tier::Editor)?;
    let informers = state.service.get_informers().await;
    Ok(Json(build_options(&informers, &state.site_host)))
}

/// `GET /v1/informers/{id}`
pub async fn get_informer(
    State(state): State<AppState>, headers: HeaderMap, Path(id): Path<String>,
) -> Result<Json<InformerDetail>, ApiError> {
    state.authorize(&headers, Tier::Editor)?;

    let id = id.trim();
    if id.is_empty() {
        return Err(ApiError::InvalidInput("informer id cannot be empty".into()));
    }

    let informers = state.service.get_informers().await;
    let informer = find_informer(&informers, id)
        .cloned()
        .ok_or_else(|| ApiError::NotFound(format!("no informer {id}")))?;
    let status = domain_status(&informers, id, &state.site_host);

    Ok(Json(InformerDetail { informer, domain_status: status }))
}
