//! `GET /live?camera={front|back|left|right}`: redirect to the newest clip.
//!
//! Other non-empty camera names are served the placeholder.

use crate::error::HttpAppError;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use livecam_core::RequestedCamera;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct LiveQuery {
    pub camera: Option<String>,
}

/// Redirect (302) to a short-lived signed URL of the newest clip for `camera`,
/// or of the placeholder when that camera has nothing recent.
#[tracing::instrument(skip_all, fields(operation = "get_live_clip", camera))]
pub async fn get_live_clip(
    Query(query): Query<LiveQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, HttpAppError> {
    // Validated before any store call.
    let camera: RequestedCamera = query.camera.as_deref().unwrap_or_default().parse()?;
    tracing::Span::current().record("camera", camera.as_str());

    let resolved = state.resolver.resolve(camera).await?;

    tracing::info!(
        key = %resolved.source.key(),
        placeholder = resolved.source.is_placeholder(),
        "Redirecting to clip"
    );

    Ok((
        StatusCode::FOUND,
        [
            (header::LOCATION, resolved.url),
            (header::CACHE_CONTROL, "no-store".to_string()),
        ],
    )
        .into_response())
}
