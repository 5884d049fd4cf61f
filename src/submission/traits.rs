//! `RegistrationBackend` trait: async interface to whatever verifies
//! emails and creates accounts.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use crate::error::SubmissionError;

/// Data sent to the backend when the info step is submitted.
///
/// `email` is read from the email step at submit time, never copied
/// earlier.
#[derive(Debug, Clone)]
pub struct RegistrationPayload {
    pub name: String,
    pub password: SecretString,
    pub email: String,
}

impl RegistrationPayload {
    pub fn new(
        name: impl Into<String>,
        password: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            password: SecretString::from(password.into()),
            email: email.into(),
        }
    }

    /// Compare two payloads field by field, including the password.
    pub fn same_as(&self, other: &RegistrationPayload) -> bool {
        self.name == other.name
            && self.email == other.email
            && self.password.expose_secret() == other.password.expose_secret()
    }
}

/// Backend consulted before leaving the email step and before entering the
/// success step. Both calls gate the corresponding transition.
#[async_trait]
pub trait RegistrationBackend: Send + Sync {
    /// Check that an account can be created for `email`.
    async fn verify_email(&self, email: &str) -> Result<(), SubmissionError>;

    /// Create the account.
    async fn register_account(
        &self,
        payload: &RegistrationPayload,
    ) -> Result<(), SubmissionError>;
}
