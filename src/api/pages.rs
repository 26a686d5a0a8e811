//! HTML page handlers.

use axum::extract::{Path, State};
use axum::response::Html;

use crate::error::ApiError;
use crate::server::AppState;

/// GET / - upload form.
pub async fn handle_welcome(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    Ok(Html(state.pages.welcome()?))
}

/// GET /show/:id - result page for a generated pattern.
pub async fn handle_show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, ApiError> {
    if !state.store.has_diagram(&id) {
        return Err(ApiError::PatternNotFound);
    }
    Ok(Html(state.pages.show(&id)?))
}
