use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid upload: {0}")]
    InvalidUpload(String),

    #[error("Pattern not found")]
    PatternNotFound,

    #[error("Not found")]
    NotFound,

    #[error("Rendering error: {0}")]
    Render(#[from] RenderError),

    #[error("Pattern error: {0}")]
    Pattern(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<crate::services::PatternServiceError> for ApiError {
    fn from(e: crate::services::PatternServiceError) -> Self {
        match e {
            crate::services::PatternServiceError::Render(e) => ApiError::Render(e),
            other => ApiError::InvalidUpload(other.to_string()),
        }
    }
}

impl From<crate::services::pages::PageError> for ApiError {
    fn from(e: crate::services::pages::PageError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl From<crate::services::store::StoreError> for ApiError {
    fn from(e: crate::services::store::StoreError) -> Self {
        match e {
            crate::services::store::StoreError::InvalidId(_) => ApiError::NotFound,
            other => ApiError::Internal(other.to_string()),
        }
    }
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("SVG parse error: {0}")]
    SvgParse(String),

    #[error("Failed to allocate pixmap")]
    PixmapAllocation,

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::InvalidUpload(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::PatternNotFound => (StatusCode::NOT_FOUND, self.to_string()),
            ApiError::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            ApiError::Render(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            ApiError::Pattern(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        };

        let body = Json(json!({
            "status": status.as_u16(),
            "error": message,
        }));

        (status, body).into_response()
    }
}
