//! In-memory registration backend.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{info, warn};

use super::traits::{RegistrationBackend, RegistrationPayload};
use crate::error::SubmissionError;

/// Keeps registered accounts in memory. Emails are compared
/// case-insensitively.
pub struct InMemoryBackend {
    accounts: RwLock<Vec<RegistrationPayload>>,
}

impl InMemoryBackend {
    /// Create an empty backend.
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            accounts: RwLock::new(Vec::new()),
        })
    }

    /// Create a backend that already knows the given emails.
    pub async fn with_registered(emails: &[&str]) -> Arc<Self> {
        let backend = Self::new();
        {
            let mut accounts = backend.accounts.write().await;
            for email in emails {
                accounts.push(RegistrationPayload::new("", "", *email));
            }
        }
        backend
    }

    /// Every account created so far, in registration order.
    pub async fn accounts(&self) -> Vec<RegistrationPayload> {
        self.accounts.read().await.clone()
    }

    pub async fn is_registered(&self, email: &str) -> bool {
        self.accounts
            .read()
            .await
            .iter()
            .any(|a| a.email.eq_ignore_ascii_case(email))
    }
}

#[async_trait]
impl RegistrationBackend for InMemoryBackend {
    async fn verify_email(&self, email: &str) -> Result<(), SubmissionError> {
        if self.is_registered(email).await {
            warn!("Email already registered");
            return Err(SubmissionError::EmailAlreadyRegistered {
                email: email.to_string(),
            });
        }
        Ok(())
    }

    async fn register_account(
        &self,
        payload: &RegistrationPayload,
    ) -> Result<(), SubmissionError> {
        let mut accounts = self.accounts.write().await;
        if accounts
            .iter()
            .any(|a| a.email.eq_ignore_ascii_case(&payload.email))
        {
            warn!("Registration for existing email");
            return Err(SubmissionError::EmailAlreadyRegistered {
                email: payload.email.clone(),
            });
        }
        accounts.push(payload.clone());
        info!(total = accounts.len(), "Account registered");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fresh_email_verifies() {
        let backend = InMemoryBackend::new();
        assert!(backend.verify_email("a@b.com").await.is_ok());
    }

    #[tokio::test]
    async fn known_email_is_rejected_case_insensitively() {
        let backend = InMemoryBackend::with_registered(&["Taken@Example.com"]).await;
        assert_eq!(
            backend.verify_email("taken@example.com").await,
            Err(SubmissionError::EmailAlreadyRegistered {
                email: "taken@example.com".to_string()
            })
        );
    }

    #[tokio::test]
    async fn register_records_payload_once() {
        let backend = InMemoryBackend::new();
        let payload = RegistrationPayload::new("validname", "validpass", "a@b.com");

        backend.register_account(&payload).await.unwrap();
        assert!(backend.is_registered("a@b.com").await);
        assert!(backend.verify_email("A@B.COM").await.is_err());

        let again = backend.register_account(&payload).await;
        assert!(matches!(again, Err(SubmissionError::EmailAlreadyRegistered { .. })));

        let accounts = backend.accounts().await;
        assert_eq!(accounts.len(), 1);
        assert!(accounts[0].same_as(&payload));
    }
}
