//! Answer collection: the value store and the live error map.
//!
//! `FormValues` holds one answer per field for the whole form, independent of
//! which section is on screen. Entries are created or overwritten on every
//! edit and never removed during a session.
//!
//! `ErrorMap` holds the validation messages currently on display. It is
//! replaced wholesale by each section validation and loses individual entries
//! as soon as the user edits the corresponding field.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ids::FieldId;

/// Separator used to store a checkbox group's selections as one string.
pub const CHECKBOX_SEPARATOR: char = ',';

// =============================================================================
// AnswerValue
// =============================================================================

/// A single stored answer.
///
/// Every field type shares this one representation. Checkbox groups store
/// their selections joined by [`CHECKBOX_SEPARATOR`], in the order they were
/// checked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerValue(String);

impl AnswerValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Join a list of checkbox selections.
    pub fn from_selections<I, S>(selections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut joined = String::new();
        for (i, s) in selections.into_iter().enumerate() {
            if i > 0 {
                joined.push(CHECKBOX_SEPARATOR);
            }
            joined.push_str(s.as_ref());
        }
        Self(joined)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Length in characters, as seen by the length rules.
    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }

    /// Split a checkbox answer back into its selections.
    pub fn selections(&self) -> Vec<&str> {
        if self.0.is_empty() {
            return Vec::new();
        }
        self.0.split(CHECKBOX_SEPARATOR).collect()
    }

    /// Whether a checkbox answer includes `option`.
    pub fn contains_selection(&self, option: &str) -> bool {
        self.selections().iter().any(|s| *s == option)
    }

    /// Check or uncheck `option`, returning the new joined answer.
    ///
    /// Checking an already-checked option and unchecking an absent one are
    /// both no-ops.
    pub fn toggled(&self, option: &str, checked: bool) -> Self {
        let mut selections = self.selections();
        if checked {
            if !selections.contains(&option) {
                selections.push(option);
            }
        } else {
            selections.retain(|s| *s != option);
        }
        Self::from_selections(selections)
    }
}

impl fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for AnswerValue {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for AnswerValue {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<AnswerValue> for String {
    fn from(value: AnswerValue) -> String {
        value.0
    }
}

// =============================================================================
// FormValues
// =============================================================================

/// Answers for the whole form, keyed by field id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormValues(BTreeMap<FieldId, AnswerValue>);

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create or overwrite the answer for `field_id`.
    pub fn set(&mut self, field_id: FieldId, value: impl Into<AnswerValue>) {
        self.0.insert(field_id, value.into());
    }

    /// The stored answer, or `None` if the field was never edited.
    pub fn get(&self, field_id: &str) -> Option<&AnswerValue> {
        self.0.get(field_id)
    }

    /// Apply a checkbox toggle to the stored answer and return the new value.
    pub fn toggle(&mut self, field_id: FieldId, option: &str, checked: bool) -> &AnswerValue {
        let next = self
            .0
            .get(field_id.as_str())
            .cloned()
            .unwrap_or_default()
            .toggled(option, checked);
        let slot = self.0.entry(field_id).or_default();
        *slot = next;
        slot
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FieldId, &AnswerValue)> {
        self.0.iter()
    }

    /// Flatten into a plain string map, the shape a submission carries.
    pub fn to_record(&self) -> BTreeMap<String, String> {
        self.0
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }
}

impl<'a> IntoIterator for &'a FormValues {
    type Item = (&'a FieldId, &'a AnswerValue);
    type IntoIter = std::collections::btree_map::Iter<'a, FieldId, AnswerValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// =============================================================================
// ErrorMap
// =============================================================================

/// Validation messages currently on display, keyed by field id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorMap(BTreeMap<FieldId, String>);

impl ErrorMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field_id: FieldId, message: impl Into<String>) {
        self.0.insert(field_id, message.into());
    }

    /// Drop the message for one field. Returns whether one was present.
    pub fn clear_field(&mut self, field_id: &str) -> bool {
        self.0.remove(field_id).is_some()
    }

    pub fn get(&self, field_id: &str) -> Option<&str> {
        self.0.get(field_id).map(String::as_str)
    }

    pub fn contains(&self, field_id: &str) -> bool {
        self.0.contains_key(field_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FieldId, &str)> {
        self.0.iter().map(|(k, v)| (k, v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fid(id: &str) -> FieldId {
        FieldId::new(id).unwrap()
    }

    #[test]
    fn set_overwrites_previous_answer() {
        let mut values = FormValues::new();
        values.set(fid("name"), "An");
        values.set(fid("name"), "Ann");
        assert_eq!(values.get("name").unwrap().as_str(), "Ann");
        assert_eq!(values.len(), 1);
    }

    #[test]
    fn unanswered_fields_have_no_entry() {
        let values = FormValues::new();
        assert!(values.get("name").is_none());
    }

    #[test]
    fn checkbox_toggles_build_an_ordered_set() {
        let mut values = FormValues::new();
        values.toggle(fid("colors"), "red", true);
        values.toggle(fid("colors"), "blue", true);
        assert_eq!(values.get("colors").unwrap().as_str(), "red,blue");

        values.toggle(fid("colors"), "red", false);
        assert_eq!(values.get("colors").unwrap().as_str(), "blue");
    }

    #[test]
    fn checking_twice_does_not_duplicate() {
        let value = AnswerValue::new("red").toggled("red", true);
        assert_eq!(value.selections(), vec!["red"]);
    }

    #[test]
    fn unchecking_last_selection_leaves_empty_answer() {
        let value = AnswerValue::new("red").toggled("red", false);
        assert!(value.is_empty());
        assert!(value.selections().is_empty());
    }

    #[test]
    fn selection_membership_is_exact() {
        let value = AnswerValue::from_selections(["darkred", "blue"]);
        assert!(value.contains_selection("blue"));
        assert!(!value.contains_selection("red"));
    }

    #[test]
    fn char_len_counts_characters_not_bytes() {
        assert_eq!(AnswerValue::new("héllo").char_len(), 5);
    }

    #[test]
    fn record_is_a_flat_string_map() {
        let mut values = FormValues::new();
        values.set(fid("name"), "Ann");
        values.set(fid("contact"), "ann@example.com");
        let record = values.to_record();
        assert_eq!(record.get("name").map(String::as_str), Some("Ann"));
        let json = serde_json::to_value(&values).unwrap();
        assert_eq!(json["contact"], "ann@example.com");
    }

    #[test]
    fn clearing_an_error_removes_only_that_field() {
        let mut errors = ErrorMap::new();
        errors.insert(fid("name"), "This field is required");
        errors.insert(fid("email"), "Please enter a valid email address");
        assert!(errors.clear_field("name"));
        assert!(!errors.clear_field("name"));
        assert!(errors.contains("email"));
        assert_eq!(errors.len(), 1);
    }
}
