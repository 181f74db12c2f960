//! Form Source Port - where schemas come from
//!
//! Any failure (transport, non-success status, undecodable body, a schema that
//! breaks the domain invariants) is a `FetchError`. Callers treat all of them
//! the same way: the session cannot proceed. There is no retry and no partial
//! schema.

use async_trait::async_trait;

use formwalk_domain::FormSchema;

use crate::session_types::SessionKey;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("Request failed: {0}")]
    RequestFailed(String),
    #[error("Form service responded with HTTP {status}")]
    HttpStatus { status: u16 },
    #[error("Invalid form response: {0}")]
    InvalidResponse(String),
}

#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait FormSourcePort: Send + Sync {
    /// Fetch the form assigned to `session_key`.
    async fn fetch_form(&self, session_key: SessionKey) -> Result<FormSchema, FetchError>;
}
