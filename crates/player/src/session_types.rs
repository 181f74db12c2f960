//! Session-related types shared by ports, application and adapters.
//!
//! These types are owned by the ports layer and define the contract
//! between the application layer and the adapters layer.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use formwalk_domain::FormValues;

/// Identifies the user to the form service (the roll number from login).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionKey(String);

impl SessionKey {
    /// Returns `None` for blank input.
    pub fn new(key: impl Into<String>) -> Option<Self> {
        let key = key.into();
        let trimmed = key.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Local identifier of one form-filling session, for log correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FormSessionId(Uuid);

impl FormSessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for FormSessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for FormSessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What a Form Sink receives on a successful submit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSubmission {
    pub session_key: SessionKey,
    pub form_title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form_id: Option<String>,
    pub values: FormValues,
}
