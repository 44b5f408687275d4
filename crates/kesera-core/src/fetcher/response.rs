//! Validate a completed transfer: status, content type, JSON body.

use serde_json::Value;

use super::FetchError;

/// True if the Content-Type declares JSON (`application/json` or a `+json` subtype).
pub(crate) fn is_json_content_type(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();
    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}

/// Turn status, content type and body into the parsed JSON or a typed failure.
pub(crate) fn parse_response(
    status: u32,
    content_type: Option<&str>,
    body: &[u8],
) -> Result<Value, FetchError> {
    if !(200..300).contains(&status) {
        return Err(FetchError::HttpError {
            status,
            body: String::from_utf8_lossy(body).into_owned(),
        });
    }
    if !content_type.is_some_and(is_json_content_type) {
        return Err(FetchError::UnexpectedFormat {
            content_type: content_type.map(str::to_string),
            body: String::from_utf8_lossy(body).into_owned(),
        });
    }
    Ok(serde_json::from_slice(body)?)
}
