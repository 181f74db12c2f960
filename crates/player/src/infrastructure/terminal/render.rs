use std::fmt::Write;

use crate::application::view::{Control, FieldView, FormView, SessionView, SubmissionStatus};

/// Plain-text rendering of a session view.
pub fn render_view(view: &SessionView) -> String {
    match view {
        SessionView::Loading => "Loading form...\n".to_string(),
        SessionView::Failed { message } => format!("Could not load the form: {}\n", message),
        SessionView::Closed => "Session closed.\n".to_string(),
        SessionView::Form(form) => render_form(form),
    }
}

fn render_form(form: &FormView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==", form.form_title);
    let _ = writeln!(
        out,
        "Section {} of {}: {}",
        form.section_index + 1,
        form.section_count,
        form.section_title
    );
    if let Some(description) = &form.section_description {
        let _ = writeln!(out, "{}", description);
    }
    out.push('\n');

    for field in &form.fields {
        render_field(&mut out, field);
    }

    let mut actions = Vec::new();
    if form.actions.prev {
        actions.push("prev");
    }
    if form.actions.next {
        actions.push("next");
    }
    if form.actions.submit {
        actions.push("submit");
    }
    let _ = writeln!(out, "\nActions: {}", actions.join(" | "));

    match &form.submission {
        SubmissionStatus::NotSubmitted => {}
        SubmissionStatus::Submitted => out.push_str("Form submitted.\n"),
        SubmissionStatus::Rejected { message } => {
            let _ = writeln!(out, "Submission failed: {}", message);
        }
    }
    out
}

fn render_field(out: &mut String, field: &FieldView) {
    let marker = if field.required { " *" } else { "" };
    let _ = writeln!(
        out,
        "  [{}] {}{} ({})",
        field.field_id, field.label, marker, field.field_type
    );

    match field.control {
        Control::Input { .. } | Control::TextArea => {
            if field.value.is_empty() {
                match &field.placeholder {
                    Some(placeholder) => {
                        let _ = writeln!(out, "      > ({})", placeholder);
                    }
                    None => out.push_str("      >\n"),
                }
            } else {
                let _ = writeln!(out, "      > {}", field.value);
            }
        }
        Control::Select | Control::RadioGroup | Control::CheckboxGroup => {
            let (on, off) = match field.control {
                Control::CheckboxGroup => ("[x]", "[ ]"),
                _ => ("(*)", "( )"),
            };
            for option in &field.options {
                let mark = if option.selected { on } else { off };
                let _ = writeln!(out, "      {} {}  {}", mark, option.value, option.label);
            }
        }
    }

    if let Some(error) = &field.error {
        let _ = writeln!(out, "      ! {}", error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::view::OptionView;
    use formwalk_domain::{FieldType, NavigationActions};

    fn field(id: &str, field_type: FieldType) -> FieldView {
        FieldView {
            field_id: id.into(),
            label: id.to_uppercase(),
            field_type,
            control: Control::for_field_type(field_type),
            required: false,
            placeholder: None,
            value: String::new(),
            error: None,
            options: Vec::new(),
            test_id: None,
        }
    }

    fn form(fields: Vec<FieldView>) -> FormView {
        FormView {
            form_title: "Registration".into(),
            section_index: 1,
            section_count: 2,
            section_id: "2".into(),
            section_title: "Contact".into(),
            section_description: Some("How to reach you".into()),
            fields,
            actions: NavigationActions {
                prev: true,
                next: false,
                submit: true,
            },
            submission: SubmissionStatus::NotSubmitted,
        }
    }

    #[test]
    fn renders_header_fields_errors_and_actions() {
        let mut email = field("email", FieldType::Email);
        email.required = true;
        email.value = "bad".into();
        email.error = Some("Please enter a valid email address".into());

        let text = render_view(&SessionView::Form(form(vec![email])));
        assert!(text.contains("== Registration =="));
        assert!(text.contains("Section 2 of 2: Contact"));
        assert!(text.contains("[email] EMAIL * (email)"));
        assert!(text.contains("> bad"));
        assert!(text.contains("! Please enter a valid email address"));
        assert!(text.contains("Actions: prev | submit"));
    }

    #[test]
    fn renders_checkbox_selection_marks() {
        let mut colors = field("colors", FieldType::Checkbox);
        colors.options = vec![
            OptionView {
                value: "red".into(),
                label: "Red".into(),
                selected: true,
                test_id: None,
            },
            OptionView {
                value: "blue".into(),
                label: "Blue".into(),
                selected: false,
                test_id: None,
            },
        ];
        let text = render_view(&SessionView::Form(form(vec![colors])));
        assert!(text.contains("[x] red  Red"));
        assert!(text.contains("[ ] blue  Blue"));
    }

    #[test]
    fn renders_placeholder_for_empty_input() {
        let mut name = field("name", FieldType::Text);
        name.placeholder = Some("Your name".into());
        let text = render_view(&SessionView::Form(form(vec![name])));
        assert!(text.contains("> (Your name)"));
    }

    #[test]
    fn renders_failure_and_submission_status() {
        let failed = render_view(&SessionView::Failed {
            message: "Form service responded with HTTP 404".into(),
        });
        assert!(failed.contains("HTTP 404"));

        let mut done = form(Vec::new());
        done.submission = SubmissionStatus::Rejected {
            message: "Submission rejected: down".into(),
        };
        let text = render_view(&SessionView::Form(done));
        assert!(text.contains("Submission failed: Submission rejected: down"));
    }
}
