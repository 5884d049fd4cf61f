//! Error types for the signup wizard.

use std::time::Duration;

use crate::form::ValidationFailure;
use crate::validation::Field;
use crate::wizard::WizardStep;

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Misuse of the rendering boundary (events addressed to something that
/// does not exist).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WizardError {
    #[error("Field {field} is not declared on step {step}")]
    UndeclaredField { step: WizardStep, field: Field },

    #[error("Step {step} has no form")]
    NoFormForStep { step: WizardStep },

    #[error("Cannot transition from {from} to {to}")]
    InvalidTransition { from: WizardStep, to: WizardStep },
}

/// Failures reported by the registration backend.
///
/// These are wizard-level: they are not tied to a single field and they
/// block the step transition that triggered the submission.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionError {
    #[error("An account already exists for {email}")]
    EmailAlreadyRegistered { email: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Registration rejected: {0}")]
    Rejected(String),

    #[error("Submission timed out after {0:?}")]
    Timeout(Duration),
}

impl SubmissionError {
    /// Short identifier that carries no user data, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::EmailAlreadyRegistered { .. } => "email_already_registered",
            Self::Network(_) => "network",
            Self::Rejected(_) => "rejected",
            Self::Timeout(_) => "timeout",
        }
    }
}

/// Why `attempt_advance` did not move the wizard forward.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdvanceError {
    #[error("{0}")]
    Validation(#[from] ValidationFailure),

    #[error("{0}")]
    Submission(#[from] SubmissionError),

    #[error("Wizard is already complete")]
    Terminal,
}
