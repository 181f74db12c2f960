//! Identity Port - user registration ahead of the form
//!
//! Uses the shared wire types directly: they are the contract with the form
//! service and the application layer has nothing to add to them.

use async_trait::async_trait;

use formwalk_shared::{CreateUserRequest, CreateUserResponse};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityError {
    #[error("Request failed: {0}")]
    RequestFailed(String),
    #[error("Form service responded with HTTP {status}")]
    HttpStatus { status: u16 },
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait IdentityPort: Send + Sync {
    async fn create_user(
        &self,
        request: CreateUserRequest,
    ) -> Result<CreateUserResponse, IdentityError>;
}
