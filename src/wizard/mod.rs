//! Signup wizard: step sequencing over the two step forms.
//!
//! The wizard collects an email, then a display name and password. Each
//! step's submit is gated on local validation and on the registration
//! backend accepting the data; only then does the wizard move on.

pub mod controller;
pub mod state;
pub mod view;

pub use controller::WizardController;
pub use state::WizardStep;
pub use view::{FieldView, StepView, button_label, title};
