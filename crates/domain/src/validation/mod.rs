//! Field and section validation.
//!
//! Validation failures are ordinary data: a section check produces a
//! [`SectionReport`] whose `ErrorMap` the caller puts on display. Nothing in
//! here aborts a session.

mod field;
mod section;

pub use field::{is_email_shaped, validate_field, FieldValidationError, DEFAULT_REQUIRED_MESSAGE};
pub use section::{validate_section, SectionReport};
