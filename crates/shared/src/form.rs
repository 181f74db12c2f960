//! Wire types for `GET /get-form`.
//!
//! The service wraps the form in an envelope:
//!
//! ```json
//! {
//!   "message": "Form fetched",
//!   "form": {
//!     "formTitle": "Student Registration",
//!     "formId": "student-reg",
//!     "version": "1.0",
//!     "sections": [
//!       {
//!         "sectionId": 1,
//!         "title": "Personal",
//!         "description": "Tell us about yourself",
//!         "fields": [
//!           { "fieldId": "firstName", "type": "text", "label": "First Name",
//!             "required": true, "dataTestId": "text-firstName",
//!             "validation": { "message": "First name is required" },
//!             "minLength": 2 }
//!         ]
//!       }
//!     ]
//!   }
//! }
//! ```
//!
//! Nothing here is trusted as-is: [`FormDto::into_schema`] runs the domain's
//! invariant checks and names the offending section or field on failure.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use formwalk_domain::{
    DomainError, FieldDefinition, FieldId, FieldOption, FieldType, FormSchema, FormSection,
    SectionId,
};

// =============================================================================
// Identifiers
// =============================================================================

/// Section ids arrive as numbers from some deployments and strings from others.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireId {
    Number(i64),
    Text(String),
}

impl fmt::Display for WireId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireId::Number(n) => write!(f, "{}", n),
            WireId::Text(s) => f.write_str(s),
        }
    }
}

// =============================================================================
// DTOs
// =============================================================================

/// Response envelope for `get-form`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub form: FormDto,
}

impl FormResponse {
    pub fn into_schema(self) -> Result<FormSchema, SchemaConversionError> {
        self.form.into_schema()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormDto {
    pub form_title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default)]
    pub sections: Vec<SectionDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionDto {
    pub section_id: WireId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub fields: Vec<FieldDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDto {
    pub field_id: String,
    /// Raw type tag; parsed into the closed `FieldType` set during conversion
    #[serde(rename = "type")]
    pub field_type: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_test_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<FieldValidationDto>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<OptionDto>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldValidationDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionDto {
    pub value: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_test_id: Option<String>,
}

// =============================================================================
// Conversion
// =============================================================================

/// A wire form that does not describe a usable schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaConversionError {
    #[error("section '{section_id}': {source}")]
    Section {
        section_id: String,
        #[source]
        source: DomainError,
    },

    #[error("field '{field_id}': {source}")]
    Field {
        field_id: String,
        #[source]
        source: DomainError,
    },

    #[error("form: {0}")]
    Form(#[from] DomainError),
}

impl FormDto {
    pub fn into_schema(self) -> Result<FormSchema, SchemaConversionError> {
        let sections = self
            .sections
            .into_iter()
            .map(SectionDto::into_section)
            .collect::<Result<Vec<_>, _>>()?;

        let mut schema = FormSchema::new(self.form_title, sections)?;
        if let Some(form_id) = self.form_id {
            schema = schema.with_form_id(form_id);
        }
        if let Some(version) = self.version {
            schema = schema.with_version(version);
        }
        Ok(schema)
    }
}

impl SectionDto {
    fn into_section(self) -> Result<FormSection, SchemaConversionError> {
        let raw_id = self.section_id.to_string();
        let section_id =
            SectionId::new(raw_id.clone()).map_err(|source| SchemaConversionError::Section {
                section_id: raw_id,
                source,
            })?;

        let fields = self
            .fields
            .into_iter()
            .map(FieldDto::into_field)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(FormSection {
            section_id,
            title: self.title,
            description: self.description,
            fields,
        })
    }
}

impl FieldDto {
    fn into_field(self) -> Result<FieldDefinition, SchemaConversionError> {
        let field_err = |source| SchemaConversionError::Field {
            field_id: self.field_id.clone(),
            source,
        };

        let field_id = FieldId::new(self.field_id.clone()).map_err(field_err)?;
        let field_type: FieldType = self.field_type.parse().map_err(field_err)?;

        Ok(FieldDefinition {
            field_id,
            field_type,
            label: self.label,
            required: self.required,
            placeholder: self.placeholder,
            min_length: self.min_length,
            max_length: self.max_length,
            validation_message: self.validation.and_then(|v| v.message),
            options: self
                .options
                .unwrap_or_default()
                .into_iter()
                .map(OptionDto::into_option)
                .collect(),
            test_id: self.data_test_id,
        })
    }
}

impl OptionDto {
    fn into_option(self) -> FieldOption {
        FieldOption {
            value: self.value,
            label: self.label,
            test_id: self.data_test_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "message": "Form fetched successfully",
        "form": {
            "formTitle": "Student Registration",
            "formId": "reg-1",
            "version": "1.0",
            "sections": [
                {
                    "sectionId": 1,
                    "title": "Personal",
                    "description": "About you",
                    "fields": [
                        {
                            "fieldId": "firstName",
                            "type": "text",
                            "label": "First Name",
                            "required": true,
                            "dataTestId": "text-firstName",
                            "validation": { "message": "First name is required" },
                            "minLength": 2,
                            "maxLength": 40
                        },
                        {
                            "fieldId": "email",
                            "type": "email",
                            "label": "Email",
                            "placeholder": "you@example.com",
                            "required": true,
                            "dataTestId": "email-input"
                        }
                    ]
                },
                {
                    "sectionId": "prefs",
                    "title": "Preferences",
                    "fields": [
                        {
                            "fieldId": "colors",
                            "type": "checkbox",
                            "label": "Colours",
                            "required": false,
                            "dataTestId": "colors",
                            "options": [
                                { "value": "red", "label": "Red", "dataTestId": "colors-red" },
                                { "value": "blue", "label": "Blue" }
                            ]
                        }
                    ]
                }
            ]
        }
    }"#;

    #[test]
    fn converts_sample_response() {
        let response: FormResponse = serde_json::from_str(SAMPLE).unwrap();
        let schema = response.into_schema().unwrap();

        assert_eq!(schema.form_title(), "Student Registration");
        assert_eq!(schema.form_id(), Some("reg-1"));
        assert_eq!(schema.section_count(), 2);
        assert_eq!(schema.sections()[0].section_id.as_str(), "1");
        assert_eq!(schema.sections()[1].section_id.as_str(), "prefs");

        let first = schema.field("firstName").unwrap();
        assert!(first.required);
        assert_eq!(first.min_length, Some(2));
        assert_eq!(
            first.validation_message.as_deref(),
            Some("First name is required")
        );
        assert_eq!(first.test_id.as_deref(), Some("text-firstName"));

        let colors = schema.field("colors").unwrap();
        assert_eq!(colors.field_type, FieldType::Checkbox);
        assert_eq!(colors.options.len(), 2);
        assert_eq!(colors.options[0].test_id.as_deref(), Some("colors-red"));
        assert_eq!(colors.options[1].test_id, None);
    }

    #[test]
    fn unknown_field_type_names_the_field() {
        let json = r#"{
            "formTitle": "T",
            "sections": [{ "sectionId": "s", "title": "S", "fields": [
                { "fieldId": "when", "type": "signature", "label": "When" }
            ]}]
        }"#;
        let dto: FormDto = serde_json::from_str(json).unwrap();
        let err = dto.into_schema().unwrap_err();
        assert!(matches!(err, SchemaConversionError::Field { ref field_id, .. } if field_id == "when"));
        assert!(err.to_string().contains("Unknown field type"));
    }

    #[test]
    fn html_input_types_load_as_single_line_fields() {
        let json = r#"{
            "formTitle": "T",
            "sections": [{ "sectionId": "s", "title": "S", "fields": [
                { "fieldId": "when", "type": "datetime-local", "label": "When" },
                { "fieldId": "site", "type": "url", "label": "Website" },
                { "fieldId": "secret", "type": "password", "label": "Password" }
            ]}]
        }"#;
        let dto: FormDto = serde_json::from_str(json).unwrap();
        let schema = dto.into_schema().unwrap();
        assert_eq!(schema.field("when").unwrap().field_type, FieldType::DatetimeLocal);
        assert_eq!(schema.field("site").unwrap().field_type, FieldType::Url);
        assert!(schema.fields().all(|f| f.field_type.is_single_line()));
    }

    #[test]
    fn form_without_sections_is_rejected() {
        let dto: FormDto = serde_json::from_str(r#"{ "formTitle": "Empty" }"#).unwrap();
        assert!(matches!(
            dto.into_schema(),
            Err(SchemaConversionError::Form(DomainError::Validation(_)))
        ));
    }

    #[test]
    fn dropdown_without_options_is_rejected() {
        let json = r#"{
            "formTitle": "T",
            "sections": [{ "sectionId": 1, "title": "S", "fields": [
                { "fieldId": "city", "type": "dropdown", "label": "City" }
            ]}]
        }"#;
        let dto: FormDto = serde_json::from_str(json).unwrap();
        assert!(dto.into_schema().is_err());
    }

    #[test]
    fn wire_ids_display_without_quotes() {
        assert_eq!(WireId::Number(7).to_string(), "7");
        assert_eq!(WireId::Text("a".into()).to_string(), "a");
    }
}
