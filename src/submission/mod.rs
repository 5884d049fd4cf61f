//! Submission boundary: the backend the wizard hands collected data to.

pub mod memory;
pub mod traits;

pub use memory::InMemoryBackend;
pub use traits::{RegistrationBackend, RegistrationPayload};
