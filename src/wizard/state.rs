//! Wizard step state machine: which step the user is on and where they
//! may go next.

use serde::Serialize;

/// The steps of the signup wizard.
///
/// Progresses linearly: Email → Info → Success. Back-navigation is only
/// possible from Info; Success is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Email,
    Info,
    Success,
}

impl WizardStep {
    /// Check if a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: WizardStep) -> bool {
        use WizardStep::*;
        matches!((self, target), (Email, Info) | (Info, Success) | (Info, Email))
    }

    /// Whether this step is terminal (the wizard is done).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// The step reached by a successful submit, if any.
    pub fn next(&self) -> Option<WizardStep> {
        match self {
            Self::Email => Some(Self::Info),
            Self::Info => Some(Self::Success),
            Self::Success => None,
        }
    }

    /// The step reached by back-navigation, if any.
    pub fn previous(&self) -> Option<WizardStep> {
        match self {
            Self::Info => Some(Self::Email),
            Self::Email | Self::Success => None,
        }
    }
}

impl Default for WizardStep {
    fn default() -> Self {
        Self::Email
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Email => "email",
            Self::Info => "info",
            Self::Success => "success",
        };
        write!(f, "{s}")
    }
}
