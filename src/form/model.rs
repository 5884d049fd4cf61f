//! `StepForm`: the state behind one wizard step's inputs.
//!
//! Errors exist as soon as a value is invalid, but are only surfaced once
//! the field has been touched (blurred, or included in a submit attempt).

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::WizardError;
use crate::validation::{Field, FieldError, FieldValidator};
use crate::wizard::WizardStep;

/// Returned by [`StepForm::attempt_submit`] when at least one field is invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid fields on {step}: {}", join_fields(.invalid))]
pub struct ValidationFailure {
    pub step: WizardStep,
    pub invalid: Vec<Field>,
}

fn join_fields(fields: &[Field]) -> String {
    fields
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Snapshot of a form's values after a successful submit.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct FormValues(BTreeMap<Field, String>);

impl FormValues {
    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

}

impl std::fmt::Debug for FormValues {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for (field, value) in &self.0 {
            if field.is_secret() {
                map.entry(field, &"[REDACTED]");
            } else {
                map.entry(field, value);
            }
        }
        map.finish()
    }
}

#[derive(Debug, Clone)]
struct FieldState {
    field: Field,
    value: String,
    touched: bool,
    /// Cached result of the validator for `value`, refreshed on every change.
    errors: Vec<FieldError>,
}

/// Form model for one wizard step.
#[derive(Debug, Clone)]
pub struct StepForm {
    step: WizardStep,
    validator: FieldValidator,
    fields: Vec<FieldState>,
}

impl StepForm {
    /// Create a form declaring `fields`, all empty and untouched.
    pub fn new(step: WizardStep, fields: &[Field], validator: FieldValidator) -> Self {
        let fields = fields
            .iter()
            .map(|&field| FieldState {
                field,
                value: String::new(),
                touched: false,
                errors: validator.validate(field, ""),
            })
            .collect();
        Self {
            step,
            validator,
            fields,
        }
    }

    /// The email step's form: a single `email` field.
    pub fn email_step(validator: FieldValidator) -> Self {
        Self::new(WizardStep::Email, &[Field::Email], validator)
    }

    /// The info step's form: `name` and `password`.
    pub fn info_step(validator: FieldValidator) -> Self {
        Self::new(WizardStep::Info, &[Field::Name, Field::Password], validator)
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    /// Declared fields, in display order.
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.fields.iter().map(|s| s.field)
    }

    /// Current value of a field; `None` if the field is not declared here.
    pub fn value(&self, field: Field) -> Option<&str> {
        self.state(field).map(|s| s.value.as_str())
    }

    /// Update a field's value. Does not change its touched flag.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) -> Result<(), WizardError> {
        let validator = self.validator;
        let step = self.step;
        let state = self
            .state_mut(field)
            .ok_or(WizardError::UndeclaredField { step, field })?;
        state.value = value.into();
        state.errors = validator.validate(field, &state.value);
        debug!(
            step = %step,
            field = %field,
            len = state.value.chars().count(),
            valid = state.errors.is_empty(),
            "Field changed"
        );
        Ok(())
    }

    /// Mark a field as touched. Idempotent.
    pub fn touch_field(&mut self, field: Field) -> Result<(), WizardError> {
        let step = self.step;
        let state = self
            .state_mut(field)
            .ok_or(WizardError::UndeclaredField { step, field })?;
        if !state.touched {
            debug!(step = %step, field = %field, "Field touched");
        }
        state.touched = true;
        Ok(())
    }

    pub fn is_touched(&self, field: Field) -> bool {
        self.state(field).is_some_and(|s| s.touched)
    }

    /// All current validation errors for a field, most important first.
    pub fn errors(&self, field: Field) -> &[FieldError] {
        self.state(field).map(|s| s.errors.as_slice()).unwrap_or(&[])
    }

    /// The error that would be surfaced for a field, whether or not it is visible.
    pub fn error(&self, field: Field) -> Option<&FieldError> {
        self.errors(field).first()
    }

    /// True iff the field has an error AND has been touched.
    pub fn is_field_error_visible(&self, field: Field) -> bool {
        self.state(field).is_some_and(|s| s.touched && !s.errors.is_empty())
    }

    /// The surfaced error, only when the visibility policy allows it.
    pub fn visible_error(&self, field: Field) -> Option<&FieldError> {
        if self.is_field_error_visible(field) {
            self.error(field)
        } else {
            None
        }
    }

    /// Touch every declared field, re-validate, and return the values if
    /// all of them pass.
    pub fn attempt_submit(&mut self) -> Result<FormValues, ValidationFailure> {
        let validator = self.validator;
        for state in &mut self.fields {
            state.touched = true;
            state.errors = validator.validate(state.field, &state.value);
        }

        let invalid: Vec<Field> = self
            .fields
            .iter()
            .filter(|s| !s.errors.is_empty())
            .map(|s| s.field)
            .collect();

        if invalid.is_empty() {
            Ok(self.values())
        } else {
            Err(ValidationFailure {
                step: self.step,
                invalid,
            })
        }
    }

    /// Current values of every declared field.
    pub fn values(&self) -> FormValues {
        FormValues(
            self.fields
                .iter()
                .map(|s| (s.field, s.value.clone()))
                .collect(),
        )
    }

    fn state(&self, field: Field) -> Option<&FieldState> {
        self.fields.iter().find(|s| s.field == field)
    }

    fn state_mut(&mut self, field: Field) -> Option<&mut FieldState> {
        self.fields.iter_mut().find(|s| s.field == field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email_form() -> StepForm {
        StepForm::email_step(FieldValidator::default())
    }

    fn info_form() -> StepForm {
        StepForm::info_step(FieldValidator::default())
    }

    #[test]
    fn new_form_is_empty_and_untouched() {
        let form = info_form();
        assert_eq!(form.step(), WizardStep::Info);
        assert_eq!(form.fields().collect::<Vec<_>>(), vec![Field::Name, Field::Password]);
        for field in [Field::Name, Field::Password] {
            assert_eq!(form.value(field), Some(""));
            assert!(!form.is_touched(field));
            // invalid from the start, but not shown
            assert!(form.error(field).is_some());
            assert!(!form.is_field_error_visible(field));
        }
    }

    #[test]
    fn errors_hidden_until_touched_regardless_of_validity() {
        let mut form = email_form();
        for value in ["", "not-an-email", "a@b.com"] {
            form.set_field(Field::Email, value).unwrap();
            assert!(!form.is_field_error_visible(Field::Email));
            assert!(form.visible_error(Field::Email).is_none());
        }
    }

    #[test]
    fn visibility_tracks_validity_after_touch() {
        let mut form = email_form();
        form.touch_field(Field::Email).unwrap();

        for value in ["", "not-an-email", "a@b.com", "a@b"] {
            form.set_field(Field::Email, value).unwrap();
            let expected = !crate::validation::validate(Field::Email, value).is_empty();
            assert_eq!(form.is_field_error_visible(Field::Email), expected, "{value}");
        }
    }

    #[test]
    fn length_field_visibility_tracks_validity_after_touch() {
        let mut form = info_form();
        for field in [Field::Name, Field::Password] {
            form.touch_field(field).unwrap();
            for value in ["", "ab", "validname", "abcdefghijklmnopq"] {
                form.set_field(field, value).unwrap();
                let expected = !crate::validation::validate(field, value).is_empty();
                assert_eq!(form.is_field_error_visible(field), expected, "{field}={value}");
            }
        }
    }

    #[test]
    fn set_field_does_not_touch() {
        let mut form = info_form();
        form.set_field(Field::Name, "ab").unwrap();
        assert!(!form.is_touched(Field::Name));
        assert_eq!(form.value(Field::Name), Some("ab"));
    }

    #[test]
    fn touch_is_idempotent() {
        let mut once = info_form();
        let mut twice = info_form();
        once.set_field(Field::Name, "ab").unwrap();
        twice.set_field(Field::Name, "ab").unwrap();

        once.touch_field(Field::Name).unwrap();
        twice.touch_field(Field::Name).unwrap();
        twice.touch_field(Field::Name).unwrap();

        assert_eq!(once.is_touched(Field::Name), twice.is_touched(Field::Name));
        assert_eq!(
            once.visible_error(Field::Name),
            twice.visible_error(Field::Name)
        );
        assert!(!twice.is_touched(Field::Password));
    }

    #[test]
    fn undeclared_fields_are_rejected() {
        let mut form = email_form();
        assert_eq!(
            form.set_field(Field::Password, "secret"),
            Err(WizardError::UndeclaredField {
                step: WizardStep::Email,
                field: Field::Password
            })
        );
        assert!(form.touch_field(Field::Name).is_err());
        assert_eq!(form.value(Field::Name), None);
        assert!(!form.is_field_error_visible(Field::Name));
        assert!(form.errors(Field::Name).is_empty());
    }

    #[test]
    fn failed_submit_touches_every_field() {
        let mut form = info_form();
        let failure = form.attempt_submit().unwrap_err();
        assert_eq!(failure.invalid, vec![Field::Name, Field::Password]);
        assert!(form.is_touched(Field::Name));
        assert!(form.is_touched(Field::Password));
        assert_eq!(
            form.visible_error(Field::Name).map(FieldError::message),
            Some("Name Required!".to_string())
        );
        assert_eq!(
            form.visible_error(Field::Password).map(FieldError::message),
            Some("Password Required!".to_string())
        );
    }

    #[test]
    fn submit_reports_only_invalid_fields() {
        let mut form = info_form();
        form.set_field(Field::Name, "ab").unwrap();
        form.set_field(Field::Password, "validpass").unwrap();

        let failure = form.attempt_submit().unwrap_err();
        assert_eq!(failure.invalid, vec![Field::Name]);
        assert!(form.visible_error(Field::Name).is_some_and(FieldError::is_length));
        assert!(!form.is_field_error_visible(Field::Password));
        assert_eq!(failure.to_string(), "invalid fields on info: name");
    }

    #[test]
    fn successful_submit_returns_values() {
        let mut form = info_form();
        form.set_field(Field::Name, "validname").unwrap();
        form.set_field(Field::Password, "validpass").unwrap();

        let values = form.attempt_submit().unwrap();
        assert_eq!(values.get(Field::Name), Some("validname"));
        assert_eq!(values.get(Field::Password), Some("validpass"));
        assert_eq!(values.get(Field::Email), None);
        assert!(form.errors(Field::Name).is_empty());
        assert!(form.errors(Field::Password).is_empty());
    }

    #[test]
    fn email_submit_succeeds_iff_valid() {
        for (value, ok) in [("", false), ("not-an-email", false), ("a@b.com", true)] {
            let mut form = email_form();
            form.set_field(Field::Email, value).unwrap();
            assert_eq!(form.attempt_submit().is_ok(), ok, "{value}");
            assert!(form.is_touched(Field::Email));
        }
    }

    #[test]
    fn debug_redacts_password() {
        let mut form = info_form();
        form.set_field(Field::Name, "validname").unwrap();
        form.set_field(Field::Password, "hunter2hunter2").unwrap();
        let rendered = format!("{:?}", form.values());
        assert!(rendered.contains("validname"));
        assert!(!rendered.contains("hunter2hunter2"));
    }
}
