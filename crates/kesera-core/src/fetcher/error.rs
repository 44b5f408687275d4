//! Fetch failure taxonomy.

use thiserror::Error;

/// Why a result query produced no parsed body.
///
/// A body without a `student` key is not an error; see [`crate::source::Lookup`].
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure: DNS, connect, TLS, timeout.
    #[error("request failed: {cause}")]
    RequestFailed {
        #[source]
        cause: curl::Error,
    },
    /// Server answered with a non-2xx status.
    #[error("HTTP {status}")]
    HttpError { status: u32, body: String },
    /// Success status, but the payload is not declared as JSON.
    #[error("unexpected content type: {}", content_type.as_deref().unwrap_or("<none>"))]
    UnexpectedFormat {
        content_type: Option<String>,
        body: String,
    },
    /// Declared as JSON but failed to parse.
    #[error("malformed JSON response: {0}")]
    MalformedResponse(#[from] serde_json::Error),
}

impl From<curl::Error> for FetchError {
    fn from(cause: curl::Error) -> Self {
        FetchError::RequestFailed { cause }
    }
}

impl FetchError {
    /// Raw response body, when the server sent one.
    pub fn body(&self) -> Option<&str> {
        match self {
            FetchError::HttpError { body, .. } | FetchError::UnexpectedFormat { body, .. } => {
                Some(body)
            }
            FetchError::RequestFailed { .. } | FetchError::MalformedResponse(_) => None,
        }
    }

    /// True for transport failures, where trying again later may help.
    pub fn is_transient(&self) -> bool {
        matches!(self, FetchError::RequestFailed { .. })
    }
}
