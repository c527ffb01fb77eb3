//! Page rendering endpoint.

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use informers_client::{PageKind, PageOutput, PageRequest, RenderContext};

use crate::error::ApiError;
use crate::handler::{AppState, Tier};

/// `POST /v1/render`: render every informer surface of one page.
///
/// Public pages need no token. Admin and builder-editor pages show previews
/// backed by the directory, so they require the editor tier. Each call owns
/// a fresh render context.
pub async fn render_page(
    State(state): State<AppState>, headers: HeaderMap, Json(request): Json<PageRequest>,
) -> Result<Json<PageOutput>, ApiError> {
    if request.page != PageKind::Public {
        state.authorize(&headers, Tier::Editor)?;
    }
    let mut ctx = RenderContext::new(
        state.service.clone(),
        request.page,
        state.loader.clone(),
        state.site_host.as_str(),
        state.config.features,
    );
    Ok(Json(ctx.render_page(&request).await))
}
