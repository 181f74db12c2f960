//! Login - turns a roll number and name into a session key.

use std::sync::Arc;

use formwalk_shared::CreateUserRequest;

use crate::ports::outbound::{IdentityError, IdentityPort};
use crate::session_types::SessionKey;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginError {
    #[error("Roll number is required")]
    MissingRollNumber,
    #[error("Name is required")]
    MissingName,
    /// Shown to the user verbatim; the cause is only logged
    #[error("Failed to login. Please try again.")]
    Failed(#[source] IdentityError),
}

#[derive(Clone)]
pub struct LoginService {
    identity: Arc<dyn IdentityPort>,
}

impl LoginService {
    pub fn new(identity: Arc<dyn IdentityPort>) -> Self {
        Self { identity }
    }

    /// Register the user and return the roll number as the session key.
    pub async fn login(&self, roll_number: &str, name: &str) -> Result<SessionKey, LoginError> {
        let key = SessionKey::new(roll_number).ok_or(LoginError::MissingRollNumber)?;
        let name = name.trim();
        if name.is_empty() {
            return Err(LoginError::MissingName);
        }

        let request = CreateUserRequest::new(key.as_str(), name);
        match self.identity.create_user(request).await {
            Ok(response) => {
                tracing::info!(roll_number = %key, message = %response.message, "User registered");
                Ok(key)
            }
            Err(e) => {
                tracing::error!(roll_number = %key, error = %e, "Login failed");
                Err(LoginError::Failed(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::outbound::MockIdentityPort;
    use formwalk_shared::CreateUserResponse;
    use mockall::predicate::*;

    #[tokio::test]
    async fn returns_trimmed_roll_number_as_session_key() {
        let mut identity = MockIdentityPort::new();
        identity
            .expect_create_user()
            .with(eq(CreateUserRequest::new("RA001", "Ann")))
            .times(1)
            .returning(|_| {
                Ok(CreateUserResponse {
                    message: "User created".into(),
                })
            });

        let service = LoginService::new(Arc::new(identity));
        let key = service.login(" RA001 ", " Ann ").await.unwrap();
        assert_eq!(key.as_str(), "RA001");
    }

    #[tokio::test]
    async fn both_inputs_are_required() {
        let mut identity = MockIdentityPort::new();
        identity.expect_create_user().never();
        let service = LoginService::new(Arc::new(identity));

        assert_eq!(
            service.login("", "Ann").await,
            Err(LoginError::MissingRollNumber)
        );
        assert_eq!(service.login("RA001", "  ").await, Err(LoginError::MissingName));
    }

    #[tokio::test]
    async fn identity_failure_shows_generic_message() {
        let mut identity = MockIdentityPort::new();
        identity
            .expect_create_user()
            .returning(|_| Err(IdentityError::HttpStatus { status: 500 }));
        let service = LoginService::new(Arc::new(identity));

        let err = service.login("RA001", "Ann").await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to login. Please try again.");
    }
}
