//! Lookup interface shared by the presentation adapters.
//!
//! CLI, web and chat code only depend on this trait, so they can be driven by
//! the real [`crate::fetcher::ResultFetcher`] or by a canned source in tests.

use serde_json::Value;

use crate::fetcher::{FetchError, FetchRequest};
use crate::record::StudentRecord;

/// Outcome of a successful query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Found(StudentRecord),
    /// Valid JSON without a `student` object; the usual answer for unknown numbers.
    NoStudentData,
}

impl Lookup {
    pub fn from_response(response: &Value) -> Self {
        match StudentRecord::from_response(response) {
            Some(record) => Lookup::Found(record),
            None => Lookup::NoStudentData,
        }
    }
}

/// Anything that can answer a result query.
pub trait ResultSource: Send + Sync {
    fn lookup(&self, request: &FetchRequest) -> Result<Lookup, FetchError>;
}
