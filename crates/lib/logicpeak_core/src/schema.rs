//! Declarative field validation for incoming JSON payloads.
//!
//! Record kinds describe their fields through a [`FieldValidator`]; every
//! failure is collected so the client sees all offending fields at once.

use std::fmt;

use serde_json::{Map, Value};
use thiserror::Error;

/// Maximum length of an email address.
const MAX_EMAIL_LEN: usize = 254;

/// Pseudo-field name used when the payload itself is not a JSON object.
pub const BODY_FIELD: &str = "body";

/// Reason a single field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldErrorKind {
    /// A required field is absent or `null`.
    Missing,
    /// The field is present but is not of the expected JSON type.
    WrongType(&'static str),
    /// A required text field is present but empty.
    Empty,
    /// The field is not a well-formed email address.
    InvalidEmail,
}

impl fmt::Display for FieldErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => f.write_str("field required"),
            Self::WrongType(expected) => write!(f, "expected {expected}"),
            Self::Empty => f.write_str("must not be empty"),
            Self::InvalidEmail => f.write_str("value is not a valid email address"),
        }
    }
}

/// A rejected field and the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub kind: FieldErrorKind,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.kind)
    }
}

/// All field failures for one payload. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", join_errors(.0))]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    /// Field failures in declaration order.
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// Whether the named field was rejected.
    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }
}

fn join_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// A record kind that can be built from an untyped JSON payload.
pub trait Validate: Sized {
    /// Validate `value` and build the typed record.
    fn validate(value: &Value) -> Result<Self, ValidationErrors>;
}

/// Builder that reads typed fields out of a JSON object and collects failures.
///
/// Accessors return a placeholder when a field is rejected; the values must
/// only be used after [`FieldValidator::finish`] returns `Ok`.
pub struct FieldValidator<'a> {
    fields: Option<&'a Map<String, Value>>,
    errors: Vec<FieldError>,
}

impl<'a> FieldValidator<'a> {
    /// Start validating `value`. A non-object payload is recorded as a
    /// failure of the whole body and every field then reads as absent.
    pub fn new(value: &'a Value) -> Self {
        match value.as_object() {
            Some(map) => Self {
                fields: Some(map),
                errors: Vec::new(),
            },
            None => Self {
                fields: None,
                errors: vec![FieldError {
                    field: BODY_FIELD,
                    kind: FieldErrorKind::WrongType("a JSON object"),
                }],
            },
        }
    }

    /// Required, non-empty text.
    pub fn required_text(&mut self, field: &'static str) -> String {
        match self.text(field) {
            Some(s) if s.is_empty() => {
                self.reject(field, FieldErrorKind::Empty);
                String::new()
            }
            Some(s) => s,
            None => {
                if self.fields.is_some() && !self.is_wrong_type(field) {
                    self.reject(field, FieldErrorKind::Missing);
                }
                String::new()
            }
        }
    }

    /// Optional text; absent and `null` both read as `None`.
    pub fn optional_text(&mut self, field: &'static str) -> Option<String> {
        self.text(field)
    }

    /// Text that falls back to `default` when absent.
    pub fn text_or_default(&mut self, field: &'static str, default: &str) -> String {
        self.text(field).unwrap_or_else(|| default.to_string())
    }

    /// Optional email address, checked for a well-formed shape when present.
    pub fn optional_email(&mut self, field: &'static str) -> Option<String> {
        let email = self.text(field)?;
        if is_valid_email(&email) {
            Some(email)
        } else {
            self.reject(field, FieldErrorKind::InvalidEmail);
            None
        }
    }

    /// Finish validation, returning every collected failure.
    pub fn finish(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(self.errors))
        }
    }

    fn text(&mut self, field: &'static str) -> Option<String> {
        match self.fields?.get(field) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => {
                self.reject(field, FieldErrorKind::WrongType("a string"));
                None
            }
        }
    }

    fn is_wrong_type(&self, field: &str) -> bool {
        self.errors
            .iter()
            .any(|e| e.field == field && matches!(e.kind, FieldErrorKind::WrongType(_)))
    }

    fn reject(&mut self, field: &'static str, kind: FieldErrorKind) {
        self.errors.push(FieldError { field, kind });
    }
}

/// Structural email check: one `@`, a non-empty local part and a dotted
/// domain with non-empty labels, no whitespace.
pub fn is_valid_email(email: &str) -> bool {
    if email.len() > MAX_EMAIL_LEN || email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && domain.split('.').all(|label| !label.is_empty())
}
