use crate::services::ProviderError;
use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Message returned when the request has no usable `image` part.
pub const NO_IMAGE_UPLOADED: &str = "No image uploaded";

/// Everything that can go wrong while analyzing one upload.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    /// The caller sent something we will not process.
    #[error("{0}")]
    ValidationError(String),

    /// The multipart body could not be read.
    #[error("{0}")]
    UploadError(#[from] MultipartError),

    #[error("{0}")]
    EncodingError(String),

    #[error(transparent)]
    ProviderError(#[from] ProviderError),
}

impl AnalyzeError {
    pub fn no_image() -> Self {
        AnalyzeError::ValidationError(NO_IMAGE_UPLOADED.to_string())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AnalyzeError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AnalyzeError::UploadError(_)
            | AnalyzeError::EncodingError(_)
            | AnalyzeError::ProviderError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            AnalyzeError::ValidationError(_) => "validation",
            AnalyzeError::UploadError(_) => "upload",
            AnalyzeError::EncodingError(_) => "encoding",
            AnalyzeError::ProviderError(_) => "provider",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for AnalyzeError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!(kind = self.kind(), error = %message, "Image analysis failed");
        } else {
            tracing::warn!(kind = self.kind(), error = %message, "Image analysis rejected");
        }

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
