//! Stored image retrieval.

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};

use crate::error::ApiError;
use crate::server::AppState;

/// GET /storage/:file - serve a stored original or diagram PNG.
///
/// The store validates the name against the id grammar, so arbitrary paths
/// never reach the filesystem.
pub async fn handle_storage(
    State(state): State<AppState>,
    Path(file): Path<String>,
) -> Result<Response, ApiError> {
    let bytes = state.store.read_file(&file).map_err(|e| match e {
        crate::services::store::StoreError::InvalidId(_) => ApiError::NotFound,
        crate::services::store::StoreError::Io(_) => ApiError::NotFound,
    })?;

    Ok(([(header::CONTENT_TYPE, "image/png")], bytes).into_response())
}
