use std::future::Future;

use studio_email_contracts::{DeliveryId, EmailSendError};
use studio_models::contact::{schema::ValidationErrors, ContactInput};
use thiserror::Error;

pub const SUBMIT_OK_MESSAGE: &str = "Dziękujemy za wiadomość! Skontaktujemy się wkrótce.";
pub const VALIDATION_ERROR_MESSAGE: &str = "Błąd walidacji formularza.";
pub const DELIVERY_ERROR_MESSAGE: &str =
    "Nie udało się wysłać wiadomości. Spróbuj ponownie później.";

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactService: Send + Sync + 'static {
    /// Validate a contact form submission and relay it to the studio inbox.
    fn submit(
        &self,
        input: ContactInput,
    ) -> impl Future<Output = Result<DeliveryId, ContactSubmitError>> + Send;
}

#[derive(Debug, Error)]
pub enum ContactSubmitError {
    #[error("Invalid contact form submission: {0}")]
    Validation(ValidationErrors),
    #[error("Failed to deliver contact form submission: {0}")]
    Delivery(#[from] EmailSendError),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ContactSubmitError {
    /// The message shown to the visitor. Details stay in the logs.
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::Validation(_) => VALIDATION_ERROR_MESSAGE,
            Self::Delivery(_) | Self::Other(_) => DELIVERY_ERROR_MESSAGE,
        }
    }
}

#[cfg(feature = "mock")]
impl MockContactService {
    pub fn with_submit(
        mut self,
        input: ContactInput,
        result: Result<DeliveryId, ContactSubmitError>,
    ) -> Self {
        self.expect_submit()
            .once()
            .with(mockall::predicate::eq(input))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }
}
