//! Derived presentation values.
//!
//! Everything here is a pure function of wizard state; the presentation
//! layer renders a [`StepView`] and never reaches into the forms directly.

use serde::Serialize;

use super::state::WizardStep;
use crate::form::StepForm;
use crate::validation::Field;

/// Heading shown once registration has gone through.
pub const SUCCESS_BANNER: &str = "Register Success!!!";

/// Submit button text for a step.
pub fn button_label(step: WizardStep) -> &'static str {
    match step {
        WizardStep::Email => "Continue",
        WizardStep::Info => "Agree and continue",
        // not reached in the normal flow
        _ => "Next step",
    }
}

/// Step heading, if the step has one.
pub fn title(step: WizardStep) -> Option<&'static str> {
    match step {
        WizardStep::Email => Some("Hi!"),
        WizardStep::Info => Some("Sign up"),
        WizardStep::Success => None,
    }
}

/// Line shown above the info step's inputs, naming the live email.
pub fn intro(step: WizardStep, email: &str) -> Option<String> {
    match step {
        WizardStep::Info => Some(format!(
            "Looks like you don't have an account. Let's create a new account for {email}"
        )),
        _ => None,
    }
}

/// One input row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldView {
    pub field: Field,
    pub label: &'static str,
    pub value: String,
    pub secret: bool,
    pub error_visible: bool,
    /// Surfaced message; `None` unless `error_visible`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FieldView {
    pub(crate) fn of(form: &StepForm, field: Field) -> FieldView {
        FieldView {
            field,
            label: field.label(),
            value: form.value(field).unwrap_or_default().to_string(),
            secret: field.is_secret(),
            error_visible: form.is_field_error_visible(field),
            error: form.visible_error(field).map(|e| e.message()),
        }
    }

    pub(crate) fn rows(form: &StepForm) -> Vec<FieldView> {
        form.fields().map(|field| FieldView::of(form, field)).collect()
    }
}

/// Everything the presentation layer needs to render the current step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepView {
    pub step: WizardStep,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intro: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner: Option<&'static str>,
    pub fields: Vec<FieldView>,
    pub button_label: &'static str,
    pub can_go_back: bool,
    /// Wizard-level failure from the last submission, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submission_error: Option<String>,
}

impl StepView {
    /// The row for `field`, if the current step shows it.
    pub fn field(&self, field: Field) -> Option<&FieldView> {
        self.fields.iter().find(|f| f.field == field)
    }
}
