use thiserror::Error;

use crate::answers::AnswerValue;
use crate::schema::{FieldDefinition, FieldType};

/// Shown for an empty required field when the schema gives no message.
pub const DEFAULT_REQUIRED_MESSAGE: &str = "This field is required";

/// Why a single answer was rejected.
///
/// `Display` yields exactly the message shown next to the field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldValidationError {
    /// Required field left empty
    #[error("{message}")]
    Required { message: String },
    /// Shorter than `minLength`
    #[error("Minimum length is {min} characters")]
    TooShort { min: usize },
    /// Longer than `maxLength`
    #[error("Maximum length is {max} characters")]
    TooLong { max: usize },
    /// Email field that does not look like `local@domain.tld`
    #[error("Please enter a valid email address")]
    InvalidEmail,
}

/// Check one answer against its field definition.
///
/// Rules run in a fixed order and the first failure wins:
///
/// 1. required and empty
/// 2. shorter than `min_length`
/// 3. longer than `max_length`
/// 4. email shape, for email fields
///
/// An absent answer reads as the empty string. Rules 2-4 still run when an
/// optional field is empty, so an optional email field left blank fails the
/// email rule and an optional field with `min_length` fails the length rule.
/// Limits of zero are treated as unset.
pub fn validate_field(
    field: &FieldDefinition,
    value: Option<&AnswerValue>,
) -> Result<(), FieldValidationError> {
    let text = value.map(AnswerValue::as_str).unwrap_or("");

    if field.required && text.is_empty() {
        return Err(FieldValidationError::Required {
            message: field
                .validation_message
                .clone()
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| DEFAULT_REQUIRED_MESSAGE.to_string()),
        });
    }

    let len = value.map_or(0, AnswerValue::char_len);

    if let Some(min) = field.min_length.filter(|&n| n > 0) {
        if len < min {
            return Err(FieldValidationError::TooShort { min });
        }
    }

    if let Some(max) = field.max_length.filter(|&n| n > 0) {
        if len > max {
            return Err(FieldValidationError::TooLong { max });
        }
    }

    match field.field_type {
        FieldType::Email if !is_email_shaped(text) => Err(FieldValidationError::InvalidEmail),
        _ => Ok(()),
    }
}

/// Whether `value` has the shape `local@domain.tld`.
///
/// No whitespace anywhere, exactly one `@` with text before it, and a `.`
/// inside the domain with text on both sides. This is a shape check, not
/// RFC 5322 parsing.
pub fn is_email_shaped(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::FieldId;
    use crate::schema::FieldOption;

    fn field(field_type: FieldType) -> FieldDefinition {
        FieldDefinition::new(FieldId::new("f").unwrap(), field_type, "F")
    }

    fn check(field: &FieldDefinition, value: &str) -> Result<(), FieldValidationError> {
        validate_field(field, Some(&AnswerValue::new(value)))
    }

    #[test]
    fn required_rejects_absent_and_empty() {
        let f = field(FieldType::Text).required();
        let expected = Err(FieldValidationError::Required {
            message: DEFAULT_REQUIRED_MESSAGE.to_string(),
        });
        assert_eq!(validate_field(&f, None), expected);
        assert_eq!(check(&f, ""), expected);
        assert_eq!(check(&f, "Ann"), Ok(()));
    }

    #[test]
    fn required_uses_schema_message_when_given() {
        let f = field(FieldType::Text)
            .required()
            .with_validation_message("Tell us your name");
        let err = validate_field(&f, None).unwrap_err();
        assert_eq!(err.to_string(), "Tell us your name");
    }

    #[test]
    fn whitespace_counts_as_an_answer() {
        let f = field(FieldType::Text).required();
        assert_eq!(check(&f, " "), Ok(()));
    }

    #[test]
    fn min_length_applies_whether_or_not_required() {
        let optional = field(FieldType::Text).with_min_length(3);
        let required = field(FieldType::Text).required().with_min_length(3);
        for f in [&optional, &required] {
            let err = check(f, "ab").unwrap_err();
            assert_eq!(err.to_string(), "Minimum length is 3 characters");
            assert_eq!(check(f, "abc"), Ok(()));
        }
    }

    #[test]
    fn optional_empty_field_still_hits_min_length() {
        let f = field(FieldType::Text).with_min_length(2);
        assert_eq!(
            validate_field(&f, None),
            Err(FieldValidationError::TooShort { min: 2 })
        );
    }

    #[test]
    fn max_length_message() {
        let f = field(FieldType::Textarea).with_max_length(5);
        let err = check(&f, "abcdef").unwrap_err();
        assert_eq!(err.to_string(), "Maximum length is 5 characters");
        assert_eq!(check(&f, "abcde"), Ok(()));
    }

    #[test]
    fn zero_limits_are_ignored() {
        let f = field(FieldType::Text).with_min_length(0).with_max_length(0);
        assert_eq!(check(&f, "anything at all"), Ok(()));
    }

    #[test]
    fn lengths_count_characters() {
        let f = field(FieldType::Text).with_max_length(4);
        assert_eq!(check(&f, "żółw"), Ok(()));
    }

    #[test]
    fn first_failure_wins() {
        let f = field(FieldType::Email).required().with_min_length(10);
        assert!(matches!(
            validate_field(&f, None),
            Err(FieldValidationError::Required { .. })
        ));
        assert_eq!(
            check(&f, "a@b.co"),
            Err(FieldValidationError::TooShort { min: 10 })
        );
    }

    #[test]
    fn email_format_rule() {
        let f = field(FieldType::Email);
        assert_eq!(check(&f, "a@b.com"), Ok(()));
        let err = check(&f, "not-an-email").unwrap_err();
        assert_eq!(err.to_string(), "Please enter a valid email address");
    }

    #[test]
    fn optional_empty_email_fails_format() {
        let f = field(FieldType::Email);
        assert_eq!(
            validate_field(&f, None),
            Err(FieldValidationError::InvalidEmail)
        );
    }

    #[test]
    fn email_rule_only_applies_to_email_fields() {
        let f = field(FieldType::Text);
        assert_eq!(check(&f, "not-an-email"), Ok(()));
    }

    #[test]
    fn choice_fields_only_check_required() {
        let f = field(FieldType::Radio)
            .required()
            .with_options(vec![FieldOption::new("y", "Yes")]);
        assert!(validate_field(&f, None).is_err());
        assert_eq!(check(&f, "y"), Ok(()));
    }

    #[test]
    fn email_shapes() {
        assert!(is_email_shaped("ann@example.com"));
        assert!(is_email_shaped("first.last@sub.example.org"));
        assert!(!is_email_shaped("ann@example"));
        assert!(!is_email_shaped("@example.com"));
        assert!(!is_email_shaped("ann@.com"));
        assert!(!is_email_shaped("ann@example."));
        assert!(!is_email_shaped("ann@@example.com"));
        assert!(!is_email_shaped("a b@example.com"));
        assert!(!is_email_shaped(""));
    }
}
