use serde::Deserialize;
use serde_json::Value;

/// The two shapes the document endpoint can answer with.
///
/// Small documents come back inline; large ones come back as a
/// time-limited pre-signed URL that requires a second, unauthenticated
/// GET. The redirect shape is exactly `{ "url": ... }`, so decoding is
/// structural rather than a key-presence probe on an untyped map.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DocumentResponse {
    Presigned(PresignedRedirect),
    Direct(Value),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PresignedRedirect {
    pub url: String,
}

/// Headline path inside a full document payload.
pub fn document_headline(document: &Value) -> Option<&str> {
    document
        .pointer("/content/title/text")
        .and_then(Value::as_str)
}
