//! Form Sink Port - where completed answers go
//!
//! Called exactly once per successful submit. The session only records whether
//! the sink accepted the submission; it does not interpret the failure.

use async_trait::async_trait;

use crate::session_types::FormSubmission;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error("Submission rejected: {0}")]
    Rejected(String),
    #[error("Could not write submission: {0}")]
    Io(String),
}

#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait FormSinkPort: Send + Sync {
    async fn submit(&self, submission: FormSubmission) -> Result<(), SubmitError>;
}
