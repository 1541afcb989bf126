//! Sync handlers: profile listing, info/import/reimport, progress.

use super::{ImportResponse, InfoResponse};
use crate::api::AppState;
use crate::error::Error;
use crate::types::{ProfileSummary, ProgressMessage};
use axum::{
    Json,
    extract::{Path, State},
};

/// GET /configs - List configured profiles
#[utoipa::path(
    get,
    path = "/api/v1/configs",
    tag = "sync",
    responses(
        (status = 200, description = "Configured profiles, tokens omitted", body = Vec<ProfileSummary>)
    )
)]
pub async fn list_configs(State(state): State<AppState>) -> Json<Vec<ProfileSummary>> {
    Json(state.sync.profiles())
}

/// POST /info/:index - Count available and already-stored assets
#[utoipa::path(
    post,
    path = "/api/v1/info/{index}",
    tag = "sync",
    params(
        ("index" = usize, Path, description = "Profile index")
    ),
    responses(
        (status = 200, description = "Asset counts", body = InfoResponse),
        (status = 400, description = "Invalid configuration", body = crate::error::ApiError),
        (status = 404, description = "Profile, container, page or frame not found", body = crate::error::ApiError),
        (status = 502, description = "Figma API error", body = crate::error::ApiError)
    )
)]
pub async fn info(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<InfoResponse>, Error> {
    let summary = state.sync.info(index).await?;
    Ok(Json(summary.into()))
}

/// POST /import/:index - Import assets not stored yet
#[utoipa::path(
    post,
    path = "/api/v1/import/{index}",
    tag = "sync",
    params(
        ("index" = usize, Path, description = "Profile index")
    ),
    responses(
        (status = 200, description = "Run summary", body = ImportResponse),
        (status = 400, description = "Invalid configuration", body = crate::error::ApiError),
        (status = 404, description = "Profile, container, page or frame not found", body = crate::error::ApiError),
        (status = 502, description = "Figma API error", body = crate::error::ApiError)
    )
)]
pub async fn import(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<ImportResponse>, Error> {
    let summary = state.sync.import(index).await?;
    Ok(Json(summary.into()))
}

/// POST /reimport/:index - Import every asset, overwriting existing ones
#[utoipa::path(
    post,
    path = "/api/v1/reimport/{index}",
    tag = "sync",
    params(
        ("index" = usize, Path, description = "Profile index")
    ),
    responses(
        (status = 200, description = "Run summary", body = ImportResponse),
        (status = 400, description = "Invalid configuration", body = crate::error::ApiError),
        (status = 404, description = "Profile, container, page or frame not found", body = crate::error::ApiError),
        (status = 502, description = "Figma API error", body = crate::error::ApiError)
    )
)]
pub async fn reimport(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<ImportResponse>, Error> {
    let summary = state.sync.reimport(index).await?;
    Ok(Json(summary.into()))
}

/// GET /progress/:index - Latest progress message of a profile's run
///
/// Unknown indexes answer with an empty payload so pollers stop.
#[utoipa::path(
    get,
    path = "/api/v1/progress/{index}",
    tag = "sync",
    params(
        ("index" = usize, Path, description = "Profile index")
    ),
    responses(
        (status = 200, description = "Latest progress message; no message means nothing to observe", body = ProgressMessage)
    )
)]
pub async fn progress(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Json<ProgressMessage> {
    match state.sync.progress(index).await {
        Ok(message) => Json(message),
        Err(e) => {
            tracing::debug!(profile = index, error = %e, "Progress requested for unknown profile");
            Json(ProgressMessage::default())
        }
    }
}
