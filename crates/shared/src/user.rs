//! Login payloads for `POST /create-user`.

use serde::{Deserialize, Serialize};

/// Registers a user; the roll number then identifies them to `get-form`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub roll_number: String,
    pub name: String,
}

impl CreateUserRequest {
    pub fn new(roll_number: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            roll_number: roll_number.into(),
            name: name.into(),
        }
    }
}

/// Acknowledgement from the service. Only `message` is documented.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserResponse {
    #[serde(default)]
    pub message: String,
}
