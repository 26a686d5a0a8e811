//! Pattern generation endpoint.

use axum::extract::{Multipart, State};
use axum::response::Redirect;

use crate::error::ApiError;
use crate::server::AppState;

/// POST /generate - accept a multipart PNG upload, build the pattern and
/// redirect to its show page.
///
/// Expected fields: `image` (the PNG file, required) and `label` (optional
/// caption for the diagram).
pub async fn handle_generate(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Redirect, ApiError> {
    let mut image: Option<Vec<u8>> = None;
    let mut label: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::InvalidUpload(e.to_string()))?
    {
        let name = field.name().map(|name| name.to_string());
        match name.as_deref() {
            Some("image") => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::InvalidUpload(e.to_string()))?;
                image = Some(bytes.to_vec());
            }
            Some("label") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ApiError::InvalidUpload(e.to_string()))?;
                let text = text.trim().to_string();
                if !text.is_empty() {
                    label = Some(text);
                }
            }
            _ => {}
        }
    }

    let image = image
        .filter(|bytes| !bytes.is_empty())
        .ok_or_else(|| ApiError::InvalidUpload("missing image field".to_string()))?;

    // Rendering is CPU-bound; keep it off the async worker
    let id = state.store.new_id();
    let pattern = {
        let service = state.service.clone();
        let bytes = image.clone();
        tokio::task::spawn_blocking(move || service.generate(&bytes, label.as_deref()))
            .await
            .map_err(|e| ApiError::Internal(e.to_string()))??
    };

    state.store.save_original(&id, &image)?;
    state.store.save_diagram(&id, &pattern.png)?;

    tracing::info!(
        id = %id,
        width = pattern.width,
        height = pattern.height,
        beads = pattern.bead_count,
        "Generated pattern"
    );

    Ok(Redirect::to(&format!("/show/{id}")))
}
