//! Student photo retrieval.
//!
//! The `photo` field is either an inline `data:` URL or a link to an image on
//! the results site (absolute, or relative to the base URL).

use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::fetcher::ResultFetcher;

/// Image bytes plus a file extension sniffed from them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Photo {
    pub bytes: Vec<u8>,
    pub extension: &'static str,
}

impl Photo {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        let extension = infer::get(&bytes)
            .filter(|t| t.matcher_type() == infer::MatcherType::Image)
            .map(|t| t.extension())
            .unwrap_or("jpg");
        Self { bytes, extension }
    }
}

/// Loads the photo a record points at. Only `data:` and http(s) references are followed.
pub fn load(fetcher: &ResultFetcher, reference: &str) -> Result<Photo> {
    let bytes = match decode_data_url(reference)? {
        Some(bytes) => bytes,
        None => {
            let url = parse_reference(fetcher.base_url(), reference)?;
            if !matches!(url.scheme(), "http" | "https") {
                anyhow::bail!("photo reference is not an http(s) URL: {url}");
            }
            fetcher
                .download(url.as_str())
                .with_context(|| format!("download photo: {url}"))?
        }
    };
    if bytes.is_empty() {
        anyhow::bail!("photo is empty");
    }
    Ok(Photo::from_bytes(bytes))
}

/// Absolute URL for a photo reference. Fails for schemes other than http, https and data.
pub fn resolve(base_url: &str, reference: &str) -> Result<String> {
    Ok(parse_reference(base_url, reference)?.into())
}

fn parse_reference(base_url: &str, reference: &str) -> Result<url::Url> {
    let reference = reference.trim();
    let url = match url::Url::parse(reference) {
        Ok(url) => url,
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let base = url::Url::parse(&crate::fetcher::root_url(base_url))
                .with_context(|| format!("invalid base_url: {base_url}"))?;
            base.join(reference)
                .with_context(|| format!("invalid photo reference: {reference}"))?
        }
        Err(e) => return Err(e).with_context(|| format!("invalid photo reference: {reference}")),
    };
    if !matches!(url.scheme(), "http" | "https" | "data") {
        anyhow::bail!("unsupported photo URL scheme: {}", url.scheme());
    }
    Ok(url)
}

/// Decodes `data:<mime>;base64,<payload>`. `Ok(None)` for anything that is not a data URL.
fn decode_data_url(reference: &str) -> Result<Option<Vec<u8>>> {
    let Some(rest) = reference.trim().strip_prefix("data:") else {
        return Ok(None);
    };
    let (meta, payload) = rest
        .split_once(',')
        .context("data URL without payload")?;
    if !meta.to_ascii_lowercase().ends_with(";base64") {
        anyhow::bail!("unsupported data URL encoding: {meta}");
    }
    let bytes = STANDARD
        .decode(payload.trim())
        .context("decode base64 photo")?;
    Ok(Some(bytes))
}
