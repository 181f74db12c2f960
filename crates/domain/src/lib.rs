//! Formwalk Domain - the dynamic-form engine core.
//!
//! Everything in this crate is pure: no I/O, no async, no clocks. The player
//! crate composes these types into a form-filling session and wires them to
//! the remote form source.
//!
//! ## Structure
//!
//! - `schema` - Form, section and field definitions with construction-time invariants
//! - `validation` - Per-field rules and whole-section validation
//! - `answers` - The value store and the live error map
//! - `navigation` - The section cursor state machine

pub mod answers;
pub mod error;
pub mod ids;
pub mod navigation;
pub mod schema;
pub mod validation;

pub use answers::{AnswerValue, ErrorMap, FormValues, CHECKBOX_SEPARATOR};
pub use error::DomainError;
pub use ids::{FieldId, SectionId};
pub use navigation::{NavigationActions, SectionCursor};
pub use schema::{FieldDefinition, FieldOption, FieldType, FormSchema, FormSection};
pub use validation::{
    is_email_shaped, validate_field, validate_section, FieldValidationError, SectionReport,
    DEFAULT_REQUIRED_MESSAGE,
};
