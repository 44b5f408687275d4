//! Lookup key: registration number plus first name.

use thiserror::Error;

/// Rejected lookup input. Raised before any network traffic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidRequest {
    #[error("registration number must not be empty")]
    EmptyRegistrationNumber,
    #[error("first name must not be empty")]
    EmptyFirstName,
}

/// One result query. Both values are opaque; surrounding whitespace is trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    registration_number: String,
    first_name: String,
}

impl FetchRequest {
    pub fn new(
        registration_number: impl AsRef<str>,
        first_name: impl AsRef<str>,
    ) -> Result<Self, InvalidRequest> {
        let registration_number = registration_number.as_ref().trim();
        let first_name = first_name.as_ref().trim();
        if registration_number.is_empty() {
            return Err(InvalidRequest::EmptyRegistrationNumber);
        }
        if first_name.is_empty() {
            return Err(InvalidRequest::EmptyFirstName);
        }
        Ok(Self {
            registration_number: registration_number.to_string(),
            first_name: first_name.to_string(),
        })
    }

    pub fn registration_number(&self) -> &str {
        &self.registration_number
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }
}
