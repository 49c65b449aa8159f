//! Helpers shared by the reqwest-backed adapters.

use serde::Deserialize;

const PREVIEW_CHAR_LIMIT: usize = 160;

/// Whitespace-compacted, length-capped rendering of an upstream body for
/// error messages and logs.
pub(crate) fn body_preview(body: &[u8]) -> String {
    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[derive(Debug, Default, Deserialize)]
struct UpstreamMessageDto {
    msg: Option<String>,
    message: Option<String>,
    error_description: Option<String>,
    error: Option<String>,
}

/// Human-readable message from a JSON error body, falling back to a
/// preview of the raw body.
pub(crate) fn upstream_message(body: &[u8]) -> String {
    let decoded: UpstreamMessageDto = serde_json::from_slice(body).unwrap_or_default();
    decoded
        .msg
        .or(decoded.message)
        .or(decoded.error_description)
        .or(decoded.error)
        .unwrap_or_else(|| body_preview(body))
}
