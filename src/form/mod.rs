//! Per-step form model: field values, touched flags and the error
//! visibility policy.

pub mod model;

pub use model::{FormValues, StepForm, ValidationFailure};
