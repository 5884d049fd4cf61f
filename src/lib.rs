//! Signup wizard: two-step registration flow with per-field validation.

pub mod config;
pub mod error;
pub mod form;
pub mod submission;
pub mod validation;
pub mod wizard;
