//! Validation rules for each field.
//!
//! Rules are evaluated independently per field; there are no cross-field
//! rules. Every function here is pure and cheap enough to run on every
//! keystroke.

use std::sync::LazyLock;

use regex::Regex;

use super::field::{Field, FieldError};
use crate::config::WizardConfig;

/// Syntactic email check: `local@label(.label)+`, no whitespace anywhere.
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$",
    )
    .expect("email pattern is a valid regex")
});

/// Inclusive length bounds, counted in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthBounds {
    pub min: usize,
    pub max: usize,
}

impl LengthBounds {
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    /// Check `value` against the bounds, returning the length error if any.
    fn check(&self, field: Field, value: &str) -> Option<FieldError> {
        let len = value.chars().count();
        if len < self.min {
            Some(FieldError::TooShort {
                field,
                min: self.min,
            })
        } else if len > self.max {
            Some(FieldError::TooLong {
                field,
                max: self.max,
            })
        } else {
            None
        }
    }
}

impl Default for LengthBounds {
    fn default() -> Self {
        Self::new(6, 16)
    }
}

/// Whether `value` is a syntactically valid email address.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// Per-field validation rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FieldValidator {
    name: LengthBounds,
    password: LengthBounds,
}

impl FieldValidator {
    pub fn new(name: LengthBounds, password: LengthBounds) -> Self {
        Self { name, password }
    }

    pub fn from_config(config: &WizardConfig) -> Self {
        Self::new(config.name_length, config.password_length)
    }

    /// Validate a single field value. An empty list means the value is valid.
    ///
    /// Errors are ordered by precedence: the first entry is the one the
    /// presentation layer surfaces.
    pub fn validate(&self, field: Field, value: &str) -> Vec<FieldError> {
        match field {
            Field::Email => {
                let mut errors = Vec::new();
                if value.is_empty() {
                    errors.push(FieldError::Required { field });
                }
                if !is_valid_email(value) {
                    errors.push(FieldError::Format { field });
                }
                errors
            }
            Field::Name => Self::required_with_length(field, value, &self.name),
            Field::Password => Self::required_with_length(field, value, &self.password),
        }
    }

    fn required_with_length(field: Field, value: &str, bounds: &LengthBounds) -> Vec<FieldError> {
        if value.is_empty() {
            return vec![FieldError::Required { field }];
        }
        bounds.check(field, value).into_iter().collect()
    }
}

/// Validate with the default rules (6–16 characters for name and password).
pub fn validate(field: Field, value: &str) -> Vec<FieldError> {
    FieldValidator::default().validate(field, value)
}
