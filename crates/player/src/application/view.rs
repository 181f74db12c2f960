//! Render Surface views.
//!
//! A `SessionView` is a complete, self-contained snapshot of what the user
//! should see. Front-ends draw it as-is; they never reach into the session.

use serde::Serialize;

use formwalk_domain::{
    AnswerValue, ErrorMap, FieldDefinition, FieldType, FormValues, NavigationActions,
};

/// Top-level view of a form session.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionView {
    /// Schema fetch outstanding
    Loading,
    /// Schema fetch failed; nothing else will happen in this session
    Failed { message: String },
    /// A section of the loaded form
    Form(FormView),
    /// Session torn down
    Closed,
}

impl SessionView {
    pub fn as_form(&self) -> Option<&FormView> {
        match self {
            SessionView::Form(form) => Some(form),
            _ => None,
        }
    }
}

/// Outcome of the most recent submit attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SubmissionStatus {
    #[default]
    NotSubmitted,
    Submitted,
    Rejected { message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormView {
    pub form_title: String,
    /// Zero-based
    pub section_index: usize,
    pub section_count: usize,
    pub section_id: String,
    pub section_title: String,
    pub section_description: Option<String>,
    pub fields: Vec<FieldView>,
    pub actions: NavigationActions,
    pub submission: SubmissionStatus,
}

impl FormView {
    pub fn field(&self, field_id: &str) -> Option<&FieldView> {
        self.fields.iter().find(|f| f.field_id == field_id)
    }

    /// Errors shown in this view, in field order.
    pub fn errors(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .filter_map(|f| f.error.as_deref().map(|e| (f.field_id.as_str(), e)))
    }
}

/// How a field is drawn. Chosen by field type, once, here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Control {
    /// Single-line input; `input_type` is the HTML-style input type
    Input { input_type: &'static str },
    TextArea,
    Select,
    RadioGroup,
    CheckboxGroup,
}

impl Control {
    pub fn for_field_type(field_type: FieldType) -> Self {
        if field_type.is_single_line() {
            return Control::Input {
                input_type: field_type.as_str(),
            };
        }
        match field_type {
            FieldType::Dropdown => Control::Select,
            FieldType::Radio => Control::RadioGroup,
            FieldType::Checkbox => Control::CheckboxGroup,
            _ => Control::TextArea,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldView {
    pub field_id: String,
    pub label: String,
    pub field_type: FieldType,
    pub control: Control,
    pub required: bool,
    pub placeholder: Option<String>,
    /// Current answer; empty when unanswered
    pub value: String,
    pub error: Option<String>,
    pub options: Vec<OptionView>,
    pub test_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionView {
    pub value: String,
    pub label: String,
    pub selected: bool,
    pub test_id: Option<String>,
}

impl FieldView {
    pub(crate) fn build(field: &FieldDefinition, values: &FormValues, errors: &ErrorMap) -> Self {
        let answer = values.get(field.field_id.as_str());
        let options = field
            .options
            .iter()
            .map(|o| OptionView {
                value: o.value.clone(),
                label: o.label.clone(),
                selected: is_selected(field.field_type, answer, &o.value),
                test_id: o.test_id.clone(),
            })
            .collect();

        Self {
            field_id: field.field_id.to_string(),
            label: field.label.clone(),
            field_type: field.field_type,
            control: Control::for_field_type(field.field_type),
            required: field.required,
            placeholder: field.placeholder.clone(),
            value: answer.map(AnswerValue::to_string).unwrap_or_default(),
            error: errors.get(field.field_id.as_str()).map(str::to_string),
            options,
            test_id: field.test_id.clone(),
        }
    }
}

fn is_selected(field_type: FieldType, answer: Option<&AnswerValue>, option: &str) -> bool {
    let Some(answer) = answer else {
        return false;
    };
    if field_type.is_multi_select() {
        answer.contains_selection(option)
    } else {
        answer.as_str() == option
    }
}
