use std::future::Future;

use studio_models::email_address::{EmailAddress, EmailAddressWithName};
use thiserror::Error;

/// A transactional email provider.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait EmailService: Send + Sync + 'static {
    /// Hand `email` to the provider. Exactly one attempt is made.
    fn send(&self, email: Email) -> impl Future<Output = Result<DeliveryId, EmailSendError>> + Send;

    /// Check that the provider is reachable.
    fn ping(&self) -> impl Future<Output = anyhow::Result<()>> + Send;
}

/// An outgoing email. The sender identity is fixed by the provider
/// configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    pub recipient: EmailAddressWithName,
    pub subject: String,
    pub html_body: String,
    pub text_body: String,
    pub reply_to: Option<EmailAddress>,
}

/// Identifier assigned to an accepted email, for tracing it at the provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeliveryId(pub String);

impl std::fmt::Display for DeliveryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Error)]
pub enum EmailSendError {
    #[error("The email provider rejected the message: {0}")]
    Rejected(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockEmailService {
    pub fn with_send(mut self, email: Email, result: Result<DeliveryId, EmailSendError>) -> Self {
        self.expect_send()
            .once()
            .with(mockall::predicate::eq(email))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }

    pub fn with_ping(mut self, result: anyhow::Result<()>) -> Self {
        self.expect_ping()
            .once()
            .return_once(move || Box::pin(std::future::ready(result)));
        self
    }
}
