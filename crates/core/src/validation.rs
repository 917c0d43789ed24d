//! Field-level validation errors.
//!
//! Rejected writes report every problem at once as a map from field name to
//! messages, e.g. `{"name": ["This field is required."]}`.

use crate::NAME_MAX_LEN;
use crate::error::{Error, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

pub const MSG_REQUIRED: &str = "This field is required.";
pub const MSG_BLANK: &str = "This field may not be blank.";
pub const MSG_NOT_A_STRING: &str = "Not a valid string.";
pub const MSG_NULL: &str = "This field may not be null.";

/// Accumulated validation errors keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message against a field.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Messages recorded for a field.
    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Merge another set of errors into this one.
    pub fn extend(&mut self, other: FieldErrors) {
        for (field, messages) in other.0 {
            self.0.entry(field).or_default().extend(messages);
        }
    }

    /// `Ok(())` when no errors were recorded, otherwise a validation error.
    pub fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation(self))
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Check the generic constraints every entity name carries.
///
/// Returns `true` when the name passed.
pub fn check_name(errors: &mut FieldErrors, field: &str, name: &str) -> bool {
    if name.trim().is_empty() {
        errors.add(field, MSG_BLANK);
        return false;
    }
    if name.chars().count() > NAME_MAX_LEN {
        errors.add(
            field,
            format!("Ensure this field has no more than {NAME_MAX_LEN} characters."),
        );
        return false;
    }
    true
}

/// Message for a parent reference that points at nothing.
pub fn missing_pk_message(id: i64) -> String {
    format!("Invalid pk \"{id}\" - object does not exist.")
}

/// Message for a parent reference of the wrong JSON type.
pub fn pk_type_message(received: &str) -> String {
    format!("Incorrect type. Expected pk value, received {received}.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_errors_are_ok() {
        assert!(FieldErrors::new().into_result().is_ok());
    }

    #[test]
    fn test_errors_serialize_as_field_map() {
        let mut errors = FieldErrors::new();
        errors.add("name", MSG_REQUIRED);
        errors.add("location", missing_pk_message(9));

        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "location": ["Invalid pk \"9\" - object does not exist."],
                "name": ["This field is required."]
            })
        );
    }

    #[test]
    fn test_check_name_rejects_blank_and_long() {
        let mut errors = FieldErrors::new();
        assert!(!check_name(&mut errors, "name", "   "));
        assert_eq!(errors.get("name"), [MSG_BLANK]);

        let mut errors = FieldErrors::new();
        assert!(!check_name(&mut errors, "name", &"x".repeat(NAME_MAX_LEN + 1)));
        assert!(errors.get("name")[0].contains("no more than 100"));

        let mut errors = FieldErrors::new();
        assert!(check_name(&mut errors, "name", "East"));
        assert!(errors.is_empty());
    }

    #[test]
    fn test_display_joins_messages() {
        let mut errors = FieldErrors::new();
        errors.add("name", "a");
        errors.add("name", "b");
        assert_eq!(errors.to_string(), "name: a; name: b");
    }
}
