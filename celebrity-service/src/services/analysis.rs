//! Turns an uploaded image into the single-turn message sent to the model.

use super::providers::Part;
use crate::error::AnalyzeError;
use base64::{engine::general_purpose, Engine as _};

/// Base64 (standard alphabet, padded) text for the raw image bytes.
pub fn encode_image(bytes: &[u8]) -> String {
    general_purpose::STANDARD.encode(bytes)
}

/// Instruction first, then the image inline.
///
/// Fails when `mime_type` is not a bare `type/subtype` pair (no parameters).
pub fn build_parts(
    prompt: &str,
    mime_type: &str,
    bytes: &[u8],
) -> Result<Vec<Part>, AnalyzeError> {
    match mime_type.split_once('/') {
        Some((kind, subtype)) if is_token(kind) && is_token(subtype) => {}
        _ => {
            return Err(AnalyzeError::EncodingError(format!(
                "invalid MIME type '{}'",
                mime_type
            )))
        }
    }

    Ok(vec![
        Part::text(prompt),
        Part::inline_data(mime_type, encode_image(bytes)),
    ])
}

fn is_token(s: &str) -> bool {
    !s.is_empty()
        && s.chars()
            .all(|c| !c.is_whitespace() && !c.is_control() && !matches!(c, '/' | ';' | '='))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoded_image_decodes_to_original_bytes() {
        let bytes: Vec<u8> = (0..=255).collect();

        let encoded = encode_image(&bytes);

        assert_eq!(general_purpose::STANDARD.decode(encoded).unwrap(), bytes);
    }

    #[test]
    fn parts_are_prompt_then_image() {
        let parts = build_parts("Who?", "image/jpeg", b"\xff\xd8\xff").unwrap();

        assert_eq!(
            parts,
            vec![Part::text("Who?"), Part::inline_data("image/jpeg", "/9j/")]
        );
    }

    #[test]
    fn malformed_mime_type_is_rejected() {
        assert!(build_parts("Who?", "jpeg", b"x").is_err());
        assert!(build_parts("Who?", "image/", b"x").is_err());
        assert!(build_parts("Who?", "image/png/x", b"x").is_err());
        assert!(build_parts("Who?", "image/png; name=a", b"x").is_err());
        assert!(build_parts("Who?", "image/png;name=a", b"x").is_err());
        assert!(build_parts("Who?", " image/png", b"x").is_err());
    }
}
