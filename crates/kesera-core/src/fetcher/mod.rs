//! Student result query over HTTP.
//!
//! Uses the curl crate (libcurl) for a single GET against the results site,
//! with browser-like headers, fixed timeouts and no retry. With
//! `warm_session` the site root is fetched first on the same handle so its
//! cookies travel with the result query.

mod error;
mod headers;
mod query;
mod request;
mod response;

use anyhow::Result;
use serde_json::Value;
use std::time::Duration;

use crate::config::KeseraConfig;
use crate::source::{Lookup, ResultSource};

pub use error::FetchError;
pub use query::{result_url, root_url};
pub use request::{FetchRequest, InvalidRequest};

const MAX_REDIRECTS: u32 = 5;

/// Status, content type and body of one completed GET.
struct Completed {
    status: u32,
    content_type: Option<String>,
    body: Vec<u8>,
}

/// Queries the results site. Stateless: every call builds a fresh handle.
///
/// Blocks the current thread; call from `spawn_blocking` if used from async code.
#[derive(Debug, Clone)]
pub struct ResultFetcher {
    base_url: String,
    user_agent: String,
    timeout: Duration,
    connect_timeout: Duration,
    max_body_bytes: usize,
    warm_session: bool,
}

impl ResultFetcher {
    pub fn new(cfg: &KeseraConfig) -> Result<Self> {
        cfg.validate()?;
        Ok(Self {
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            user_agent: cfg.user_agent.clone(),
            timeout: cfg.timeout(),
            connect_timeout: cfg.connect_timeout(),
            max_body_bytes: usize::try_from(cfg.max_body_bytes).unwrap_or(usize::MAX),
            warm_session: cfg.warm_session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Performs the result query and returns the parsed JSON unmodified.
    pub fn fetch(&self, request: &FetchRequest) -> Result<Value, FetchError> {
        let url = result_url(&self.base_url, request);
        let mut easy = self.easy()?;
        if self.warm_session {
            self.warm(&mut easy);
        }

        tracing::debug!(%url, "fetching student result");
        let done = perform_get(&mut easy, &url, self.max_body_bytes).map_err(|cause| {
            tracing::warn!(%url, "result request failed: {}", cause);
            FetchError::from(cause)
        })?;

        response::parse_response(done.status, done.content_type.as_deref(), &done.body).map_err(
            |e| {
                tracing::warn!(
                    %url,
                    status = done.status,
                    content_type = done.content_type.as_deref().unwrap_or(""),
                    body = e.body().unwrap_or(""),
                    "result response rejected: {}",
                    e
                );
                e
            },
        )
    }

    /// Downloads a resource (the student photo) with the same headers and timeouts.
    pub fn download(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let mut easy = self.easy()?;
        let done = perform_get(&mut easy, url, self.max_body_bytes)?;
        if !(200..300).contains(&done.status) {
            return Err(FetchError::HttpError {
                status: done.status,
                body: String::from_utf8_lossy(&done.body).into_owned(),
            });
        }
        tracing::debug!(%url, bytes = done.body.len(), "downloaded");
        Ok(done.body)
    }

    fn easy(&self) -> Result<curl::easy::Easy, curl::Error> {
        let mut easy = curl::easy::Easy::new();
        easy.follow_location(true)?;
        easy.max_redirections(MAX_REDIRECTS)?;
        easy.connect_timeout(self.connect_timeout)?;
        easy.timeout(self.timeout)?;
        // Empty path: in-memory cookie engine, shared by every transfer on this handle.
        easy.cookie_file("")?;

        let mut list = curl::easy::List::new();
        for line in headers::browser_headers(&self.base_url, &self.user_agent) {
            list.append(&line)?;
        }
        easy.http_headers(list)?;
        Ok(easy)
    }

    /// GET the site root to pick up cookies. Failure only costs the warm-up.
    fn warm(&self, easy: &mut curl::easy::Easy) {
        let root = root_url(&self.base_url);
        match perform_get(easy, &root, self.max_body_bytes) {
            Ok(done) => tracing::debug!(url = %root, status = done.status, "session warmed"),
            Err(e) => tracing::warn!(url = %root, "session warm-up failed: {}", e),
        }
    }
}

impl ResultSource for ResultFetcher {
    fn lookup(&self, request: &FetchRequest) -> Result<Lookup, FetchError> {
        let value = self.fetch(request)?;
        let outcome = Lookup::from_response(&value);
        if matches!(outcome, Lookup::NoStudentData) {
            tracing::info!(
                registration_number = request.registration_number(),
                "no student data in response"
            );
        }
        Ok(outcome)
    }
}

/// GET `url`, collecting at most `max_body` bytes. A longer body aborts the
/// transfer with a curl write error.
fn perform_get(
    easy: &mut curl::easy::Easy,
    url: &str,
    max_body: usize,
) -> Result<Completed, curl::Error> {
    let mut body = Vec::new();
    easy.url(url)?;
    easy.get(true)?;
    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            if body.len() + data.len() > max_body {
                tracing::warn!(url, limit = max_body, "response body too large, aborting");
                return Ok(0);
            }
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()?;
    }
    let status = easy.response_code()?;
    let content_type = easy.content_type()?.map(str::to_string);
    Ok(Completed {
        status,
        content_type,
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_trims_base_url() {
        let mut cfg = KeseraConfig::default();
        cfg.base_url = "https://sw.ministry.et/".to_string();
        let f = ResultFetcher::new(&cfg).unwrap();
        assert_eq!(f.base_url(), "https://sw.ministry.et");
    }

    #[test]
    fn new_rejects_invalid_base_url() {
        let mut cfg = KeseraConfig::default();
        cfg.base_url = "sw.ministry.et".to_string();
        assert!(ResultFetcher::new(&cfg).is_err());
    }
}
