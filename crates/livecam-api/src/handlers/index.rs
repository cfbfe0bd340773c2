//! `GET /`: the viewer page.

use crate::state::AppState;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

/// Serve the configured HTML page. The file is read on every request so it can
/// be edited without a restart.
pub async fn serve_index(State(state): State<Arc<AppState>>) -> Response {
    match tokio::fs::read_to_string(state.config.index_html_path()).await {
        Ok(content) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
            content,
        )
            .into_response(),
        Err(e) => {
            tracing::error!(
                error = %e,
                path = %state.config.index_html_path(),
                "Failed to read index page"
            );
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error reading HTML file",
            )
                .into_response()
        }
    }
}
