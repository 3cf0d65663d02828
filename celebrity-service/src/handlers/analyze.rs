use crate::error::AnalyzeError;
use crate::services::build_parts;
use crate::startup::AppState;
use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use serde::Serialize;

/// Name of the multipart field carrying the image.
pub const IMAGE_FIELD: &str = "image";

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub response: String,
}

struct Upload {
    bytes: Vec<u8>,
    content_type: Option<String>,
    file_name: Option<String>,
}

/// `POST /analyze`: ask the vision model who is in the uploaded image.
pub async fn analyze_image(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<AnalyzeResponse>, AnalyzeError> {
    // A body that is not multipart at all carries no image either.
    let multipart = multipart.map_err(|rejection| {
        tracing::debug!(%rejection, "Request body is not multipart");
        AnalyzeError::no_image()
    })?;

    let upload = read_image_field(multipart)
        .await?
        .ok_or_else(AnalyzeError::no_image)?;

    let config = &state.config.analyze;
    let mime_type = config
        .mime_strategy
        .resolve(upload.content_type.as_deref());

    tracing::info!(
        size = upload.bytes.len(),
        declared_type = upload.content_type.as_deref().unwrap_or("-"),
        file_name = upload.file_name.as_deref().unwrap_or("-"),
        mime_type = %mime_type,
        "Image analysis started"
    );

    let parts = build_parts(&config.prompt, &mime_type, &upload.bytes)?;
    let response = state.provider.generate(&parts).await?;

    tracing::info!(response_len = response.len(), "Image analysis completed");

    Ok(Json(AnalyzeResponse { response }))
}

/// Read the first `image` field, skipping everything else.
/// An empty one counts as missing; later `image` fields are not consulted.
async fn read_image_field(mut multipart: Multipart) -> Result<Option<Upload>, AnalyzeError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        let content_type = field.content_type().map(str::to_string);
        let file_name = field.file_name().map(str::to_string);
        let bytes = field.bytes().await?;

        if bytes.is_empty() {
            return Ok(None);
        }

        return Ok(Some(Upload {
            bytes: bytes.to_vec(),
            content_type,
            file_name,
        }));
    }

    Ok(None)
}
