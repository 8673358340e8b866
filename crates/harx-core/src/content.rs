//! Response body decoding: `response.content` to raw bytes.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;

use crate::har::HarContent;

/// Standard alphabet, padding optional. Browsers are not consistent about
/// padding in exported archives.
const HAR_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid base64 body: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// True if `encoding` names Base64 (`"base64"`, any ASCII case).
pub fn is_base64(encoding: Option<&str>) -> bool {
    encoding.is_some_and(|e| e.trim().eq_ignore_ascii_case("base64"))
}

/// Decodes a captured body.
///
/// - `encoding == "base64"`: Base64-decode `text` (ASCII whitespace such as
///   line wrapping is ignored).
/// - any other encoding: `text` as UTF-8 bytes, unchanged.
/// - no `text` at all: empty body (redirects, 204s, bodies the browser dropped).
pub fn decode(content: &HarContent) -> Result<Vec<u8>, DecodeError> {
    let Some(text) = content.text.as_deref() else {
        return Ok(Vec::new());
    };

    if is_base64(content.encoding.as_deref()) {
        let compact: Vec<u8> = text
            .bytes()
            .filter(|b| !b.is_ascii_whitespace())
            .collect();
        return Ok(HAR_BASE64.decode(compact)?);
    }

    if let Some(other) = content.encoding.as_deref() {
        tracing::debug!("unknown content encoding {other:?}; writing text as-is");
    }
    Ok(text.as_bytes().to_vec())
}
