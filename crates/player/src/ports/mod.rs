//! Player port definitions.

pub use crate::session_types::{FormSessionId, FormSubmission, SessionKey};

pub mod outbound;
