//! Form Schema Types for Runtime-Delivered Forms
//!
//! A form is described entirely by data fetched at runtime: an ordered list of
//! sections, each holding an ordered list of fields. The client knows nothing
//! about a particular form ahead of time; it renders and validates whatever
//! the schema says.
//!
//! # Invariants
//!
//! Enforced once, by [`FormSchema::new`]:
//!
//! - At least one section (section order is navigation order)
//! - Section ids are unique within the form
//! - Field ids are unique across the *whole form*, because answers are keyed
//!   globally by field id
//! - Choice fields (dropdown, radio, checkbox) carry a non-empty option list,
//!   and no other field type carries options
//! - Option values are unique within a field; checkbox option values never
//!   contain the checkbox separator

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::answers::CHECKBOX_SEPARATOR;
use crate::error::DomainError;
use crate::ids::{FieldId, SectionId};

// =============================================================================
// Field Types
// =============================================================================

/// Closed set of supported input kinds.
///
/// Behaviour that depends on the kind (which control to draw, whether the
/// email rule applies, whether values are multi-select) is resolved by
/// matching on this enum, never by inspecting raw strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Single-line free text
    Text,
    /// Single-line text that must look like an email address
    Email,
    /// Single-line numeric input
    Number,
    /// Single-line telephone number
    Tel,
    /// Single-line date input
    Date,
    /// Single-line masked input
    Password,
    /// Single-line web address
    Url,
    /// Single-line search box
    Search,
    /// Single-line time of day
    Time,
    /// Single-line local date and time
    #[serde(rename = "datetime-local")]
    DatetimeLocal,
    /// Single-line year and month
    Month,
    /// Single-line year and week
    Week,
    /// Multi-line free text
    Textarea,
    /// Pick exactly one option from a list
    Dropdown,
    /// Pick exactly one option from an inline group
    Radio,
    /// Pick any number of options; stored comma-joined
    Checkbox,
}

impl FieldType {
    pub const ALL: [FieldType; 16] = [
        FieldType::Text,
        FieldType::Email,
        FieldType::Number,
        FieldType::Tel,
        FieldType::Date,
        FieldType::Password,
        FieldType::Url,
        FieldType::Search,
        FieldType::Time,
        FieldType::DatetimeLocal,
        FieldType::Month,
        FieldType::Week,
        FieldType::Textarea,
        FieldType::Dropdown,
        FieldType::Radio,
        FieldType::Checkbox,
    ];

    /// Wire tag for this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Email => "email",
            FieldType::Number => "number",
            FieldType::Tel => "tel",
            FieldType::Date => "date",
            FieldType::Password => "password",
            FieldType::Url => "url",
            FieldType::Search => "search",
            FieldType::Time => "time",
            FieldType::DatetimeLocal => "datetime-local",
            FieldType::Month => "month",
            FieldType::Week => "week",
            FieldType::Textarea => "textarea",
            FieldType::Dropdown => "dropdown",
            FieldType::Radio => "radio",
            FieldType::Checkbox => "checkbox",
        }
    }

    /// Whether this field is answered by picking from `options`.
    pub fn is_choice(&self) -> bool {
        matches!(
            self,
            FieldType::Dropdown | FieldType::Radio | FieldType::Checkbox
        )
    }

    /// Whether more than one option may be selected at once.
    pub fn is_multi_select(&self) -> bool {
        matches!(self, FieldType::Checkbox)
    }

    /// Whether this is one of the single-line input kinds.
    pub fn is_single_line(&self) -> bool {
        !self.is_choice() && *self != FieldType::Textarea
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_ascii_lowercase();
        FieldType::ALL
            .into_iter()
            .find(|t| t.as_str() == tag)
            .ok_or_else(|| DomainError::parse(format!("Unknown field type: {}", s)))
    }
}

// =============================================================================
// Options
// =============================================================================

/// One selectable option of a dropdown, radio or checkbox field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldOption {
    /// Stored value
    pub value: String,
    /// Display label
    pub label: String,
    /// Automation hook for UI tests
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_id: Option<String>,
}

impl FieldOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            test_id: None,
        }
    }

    pub fn with_test_id(mut self, test_id: impl Into<String>) -> Self {
        self.test_id = Some(test_id.into());
        self
    }
}

// =============================================================================
// Field Definitions
// =============================================================================

/// Definition of a single field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    /// Unique across the entire form
    pub field_id: FieldId,
    /// Kind of input
    pub field_type: FieldType,
    /// Display label
    pub label: String,
    /// Whether an empty answer fails validation
    #[serde(default)]
    pub required: bool,
    /// Placeholder text for empty inputs
    #[serde(default)]
    pub placeholder: Option<String>,
    /// Minimum length in characters
    #[serde(default)]
    pub min_length: Option<usize>,
    /// Maximum length in characters
    #[serde(default)]
    pub max_length: Option<usize>,
    /// Replaces the default message when a required field is empty
    #[serde(default)]
    pub validation_message: Option<String>,
    /// Options for choice fields, in display order
    #[serde(default)]
    pub options: Vec<FieldOption>,
    /// Automation hook for UI tests
    #[serde(default)]
    pub test_id: Option<String>,
}

impl FieldDefinition {
    pub fn new(field_id: FieldId, field_type: FieldType, label: impl Into<String>) -> Self {
        Self {
            field_id,
            field_type,
            label: label.into(),
            required: false,
            placeholder: None,
            min_length: None,
            max_length: None,
            validation_message: None,
            options: Vec::new(),
            test_id: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn with_min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    pub fn with_max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    pub fn with_validation_message(mut self, message: impl Into<String>) -> Self {
        self.validation_message = Some(message.into());
        self
    }

    pub fn with_options(mut self, options: Vec<FieldOption>) -> Self {
        self.options = options;
        self
    }

    pub fn with_test_id(mut self, test_id: impl Into<String>) -> Self {
        self.test_id = Some(test_id.into());
        self
    }

    /// Look up an option by its stored value.
    pub fn option(&self, value: &str) -> Option<&FieldOption> {
        self.options.iter().find(|o| o.value == value)
    }

    fn check_options(&self) -> Result<(), DomainError> {
        if self.field_type.is_choice() && self.options.is_empty() {
            return Err(DomainError::validation(format!(
                "Field '{}' is a {} field but has no options",
                self.field_id, self.field_type
            )));
        }
        if !self.field_type.is_choice() && !self.options.is_empty() {
            return Err(DomainError::validation(format!(
                "Field '{}' is a {} field and cannot have options",
                self.field_id, self.field_type
            )));
        }

        let mut seen = HashSet::new();
        for option in &self.options {
            if !seen.insert(option.value.as_str()) {
                return Err(DomainError::duplicate_id(
                    "option",
                    format!("{}/{}", self.field_id, option.value),
                ));
            }
            if self.field_type.is_multi_select() && option.value.contains(CHECKBOX_SEPARATOR) {
                return Err(DomainError::validation(format!(
                    "Checkbox option '{}' of field '{}' cannot contain '{}'",
                    option.value, self.field_id, CHECKBOX_SEPARATOR
                )));
            }
        }
        Ok(())
    }
}

// =============================================================================
// Sections
// =============================================================================

/// A named group of fields presented and validated together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSection {
    /// Unique within the form
    pub section_id: SectionId,
    /// Section heading
    pub title: String,
    /// Help text under the heading
    #[serde(default)]
    pub description: Option<String>,
    /// Fields in presentation (and validation) order
    pub fields: Vec<FieldDefinition>,
}

impl FormSection {
    pub fn new(section_id: SectionId, title: impl Into<String>) -> Self {
        Self {
            section_id,
            title: title.into(),
            description: None,
            fields: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_field(mut self, field: FieldDefinition) -> Self {
        self.fields.push(field);
        self
    }

    pub fn field(&self, field_id: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.field_id.as_str() == field_id)
    }
}

// =============================================================================
// Form Schema
// =============================================================================

/// A complete, invariant-checked form.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSchema {
    form_title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    form_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<String>,
    sections: Vec<FormSection>,
}

impl FormSchema {
    /// Build a schema, checking every structural invariant.
    ///
    /// # Errors
    ///
    /// - `DomainError::Validation` if there are no sections, or a field's
    ///   options do not match its type
    /// - `DomainError::DuplicateId` if a section id, field id or option value
    ///   is reused where it must be unique
    pub fn new(
        form_title: impl Into<String>,
        sections: Vec<FormSection>,
    ) -> Result<Self, DomainError> {
        if sections.is_empty() {
            return Err(DomainError::validation("A form needs at least one section"));
        }

        let mut section_ids = HashSet::new();
        let mut field_ids = HashSet::new();
        for section in &sections {
            if !section_ids.insert(section.section_id.as_str()) {
                return Err(DomainError::duplicate_id(
                    "section",
                    section.section_id.as_str(),
                ));
            }
            for field in &section.fields {
                if !field_ids.insert(field.field_id.as_str()) {
                    return Err(DomainError::duplicate_id("field", field.field_id.as_str()));
                }
                field.check_options()?;
            }
        }

        Ok(Self {
            form_title: form_title.into(),
            form_id: None,
            version: None,
            sections,
        })
    }

    pub fn with_form_id(mut self, form_id: impl Into<String>) -> Self {
        self.form_id = Some(form_id.into());
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn form_title(&self) -> &str {
        &self.form_title
    }

    pub fn form_id(&self) -> Option<&str> {
        self.form_id.as_deref()
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn sections(&self) -> &[FormSection] {
        &self.sections
    }

    /// Never zero.
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    pub fn section(&self, index: usize) -> Option<&FormSection> {
        self.sections.get(index)
    }

    /// Find a field anywhere in the form.
    pub fn field(&self, field_id: &str) -> Option<&FieldDefinition> {
        self.sections.iter().find_map(|s| s.field(field_id))
    }

    /// All fields in navigation order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.sections.iter().flat_map(|s| s.fields.iter())
    }
}
