//! Field validation: pure per-field rules, independent of form or step state.

pub mod field;
pub mod rules;

pub use field::{Field, FieldError};
pub use rules::{FieldValidator, LengthBounds, is_valid_email, validate};
