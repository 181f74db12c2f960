use serde::Serialize;

use crate::answers::{ErrorMap, FormValues};
use crate::schema::FormSection;

use super::field::validate_field;

/// Outcome of validating every field in one section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SectionReport {
    /// One message per failing field; empty when the section passes
    pub errors: ErrorMap,
}

impl SectionReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_errors(self) -> ErrorMap {
        self.errors
    }
}

/// Validate all fields of `section` against the current answers.
///
/// Every field is checked (no early exit across fields) and the report holds
/// a fresh error map: a field that passes this time never carries a message
/// from an earlier attempt.
pub fn validate_section(section: &FormSection, values: &FormValues) -> SectionReport {
    let mut errors = ErrorMap::new();
    for field in &section.fields {
        if let Err(err) = validate_field(field, values.get(field.field_id.as_str())) {
            errors.insert(field.field_id.clone(), err.to_string());
        }
    }
    SectionReport { errors }
}
