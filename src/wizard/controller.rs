//! WizardController: owns the current step and both step forms, and
//! gates every forward transition on validation and on the backend.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::state::WizardStep;
use super::view::{self, FieldView, StepView};
use crate::config::WizardConfig;
use crate::error::{AdvanceError, ConfigError, SubmissionError, WizardError};
use crate::form::StepForm;
use crate::submission::{RegistrationBackend, RegistrationPayload};
use crate::validation::{Field, FieldValidator};

/// Drives the signup wizard.
///
/// All mutation goes through the named transition methods
/// ([`attempt_advance`](Self::attempt_advance), [`retreat`](Self::retreat))
/// or the field event handlers. `attempt_advance` holds `&mut self` across
/// the backend call, so no field can change while a submission is pending.
pub struct WizardController {
    session: Uuid,
    config: WizardConfig,
    step: WizardStep,
    email_form: StepForm,
    info_form: StepForm,
    backend: Arc<dyn RegistrationBackend>,
    submission_error: Option<SubmissionError>,
    completed_at: Option<DateTime<Utc>>,
}

impl WizardController {
    /// Create a wizard with the default configuration.
    pub fn new(backend: Arc<dyn RegistrationBackend>) -> Self {
        Self::build(WizardConfig::default(), backend)
    }

    /// Create a wizard with a custom configuration.
    pub fn with_config(
        config: WizardConfig,
        backend: Arc<dyn RegistrationBackend>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, backend))
    }

    fn build(config: WizardConfig, backend: Arc<dyn RegistrationBackend>) -> Self {
        let validator = FieldValidator::from_config(&config);
        let session = Uuid::new_v4();
        debug!(session = %session, "Wizard created");
        Self {
            session,
            config,
            step: WizardStep::Email,
            email_form: StepForm::email_step(validator),
            info_form: StepForm::info_step(validator),
            backend,
            submission_error: None,
            completed_at: None,
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session
    }

    pub fn config(&self) -> &WizardConfig {
        &self.config
    }

    pub fn current_step(&self) -> WizardStep {
        self.step
    }

    /// The live email from the first step.
    pub fn email(&self) -> &str {
        self.email_form.value(Field::Email).unwrap_or_default()
    }

    pub fn email_form(&self) -> &StepForm {
        &self.email_form
    }

    pub fn info_form(&self) -> &StepForm {
        &self.info_form
    }

    /// The form behind `step`, if it has one.
    pub fn form(&self, step: WizardStep) -> Option<&StepForm> {
        match step {
            WizardStep::Email => Some(&self.email_form),
            WizardStep::Info => Some(&self.info_form),
            WizardStep::Success => None,
        }
    }

    fn form_mut(&mut self, step: WizardStep) -> Result<&mut StepForm, WizardError> {
        match step {
            WizardStep::Email => Ok(&mut self.email_form),
            WizardStep::Info => Ok(&mut self.info_form),
            WizardStep::Success => Err(WizardError::NoFormForStep { step }),
        }
    }

    /// Failure from the most recent backend call, if it has not been
    /// cleared since.
    pub fn submission_error(&self) -> Option<&SubmissionError> {
        self.submission_error.as_ref()
    }

    /// When the wizard reached the success step.
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// A field's input changed.
    pub fn on_field_change(
        &mut self,
        step: WizardStep,
        field: Field,
        value: impl Into<String>,
    ) -> Result<(), WizardError> {
        self.form_mut(step)?.set_field(field, value)?;
        // The email feeds both backend calls, so editing it always
        // invalidates the last submission outcome.
        if step == self.step || field == Field::Email {
            self.submission_error = None;
        }
        Ok(())
    }

    /// A field lost focus.
    pub fn on_field_blur(&mut self, step: WizardStep, field: Field) -> Result<(), WizardError> {
        self.form_mut(step)?.touch_field(field)
    }

    /// The submit button was clicked.
    pub async fn on_submit_click(&mut self) -> Result<WizardStep, AdvanceError> {
        self.attempt_advance().await
    }

    /// The back affordance was clicked.
    pub fn on_back_click(&mut self) -> WizardStep {
        self.retreat()
    }

    /// Submit the current step and move forward if both local validation
    /// and the backend accept it. Returns the new step.
    pub async fn attempt_advance(&mut self) -> Result<WizardStep, AdvanceError> {
        self.submission_error = None;
        match self.step {
            WizardStep::Email => {
                let values = self.email_form.attempt_submit().map_err(|failure| {
                    warn!(session = %self.session, %failure, "Email step rejected");
                    failure
                })?;
                let email = values.get(Field::Email).unwrap_or_default().to_string();

                let backend = Arc::clone(&self.backend);
                let result = tokio::time::timeout(
                    self.config.submission_timeout,
                    backend.verify_email(&email),
                )
                .await;
                self.settle(result)?;

                self.transition(WizardStep::Info);
                Ok(WizardStep::Info)
            }
            WizardStep::Info => {
                let values = self.info_form.attempt_submit().map_err(|failure| {
                    warn!(session = %self.session, %failure, "Info step rejected");
                    failure
                })?;
                // The email may have been edited since the first step.
                self.email_form.attempt_submit().map_err(|failure| {
                    warn!(session = %self.session, %failure, "Email no longer valid");
                    failure
                })?;

                let payload = RegistrationPayload::new(
                    values.get(Field::Name).unwrap_or_default(),
                    values.get(Field::Password).unwrap_or_default(),
                    self.email(),
                );

                let backend = Arc::clone(&self.backend);
                let result = tokio::time::timeout(
                    self.config.submission_timeout,
                    backend.register_account(&payload),
                )
                .await;
                self.settle(result)?;

                self.transition(WizardStep::Success);
                self.completed_at = Some(Utc::now());
                info!(session = %self.session, "Registration complete");
                Ok(WizardStep::Success)
            }
            WizardStep::Success => Err(AdvanceError::Terminal),
        }
    }

    /// Go back one step. A no-op on the first and on the terminal step.
    /// Returns the (possibly unchanged) current step.
    pub fn retreat(&mut self) -> WizardStep {
        match self.step.previous() {
            Some(previous) => {
                self.submission_error = None;
                self.transition(previous);
            }
            None => {
                debug!(session = %self.session, step = %self.step, "Back ignored");
            }
        }
        self.step
    }

    /// Render-ready snapshot of the current step.
    pub fn view(&self) -> StepView {
        let step = self.step;
        StepView {
            step,
            title: view::title(step),
            intro: view::intro(step, self.email()),
            banner: step.is_terminal().then_some(view::SUCCESS_BANNER),
            fields: self.rows(step),
            button_label: view::button_label(step),
            can_go_back: step.previous().is_some(),
            submission_error: self.submission_error.as_ref().map(|e| e.to_string()),
        }
    }

    /// Input rows for `step`. On the info step the email row is added back
    /// while its error is visible, since the final submit re-checks it.
    fn rows(&self, step: WizardStep) -> Vec<FieldView> {
        let mut rows = Vec::new();
        if step == WizardStep::Info && self.email_form.is_field_error_visible(Field::Email) {
            rows.push(FieldView::of(&self.email_form, Field::Email));
        }
        if let Some(form) = self.form(step) {
            rows.extend(FieldView::rows(form));
        }
        rows
    }

    /// Record the outcome of a backend call.
    fn settle(
        &mut self,
        result: Result<Result<(), SubmissionError>, tokio::time::error::Elapsed>,
    ) -> Result<(), AdvanceError> {
        let err = match result {
            Ok(Ok(())) => return Ok(()),
            Ok(Err(e)) => e,
            Err(_) => SubmissionError::Timeout(self.config.submission_timeout),
        };
        warn!(session = %self.session, step = %self.step, kind = err.kind(), "Submission failed");
        self.submission_error = Some(err.clone());
        Err(err.into())
    }

    fn transition(&mut self, to: WizardStep) {
        debug_assert!(
            self.step.can_transition_to(to),
            "{}",
            WizardError::InvalidTransition {
                from: self.step,
                to
            }
        );
        info!(session = %self.session, from = %self.step, to = %to, "Wizard step changed");
        self.step = to;
    }
}
